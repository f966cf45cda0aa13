// src/credentials.rs
//! The Bing Webmaster credential: what it stores, how it authenticates a
//! request, and how to check that it works.
//!
//! Bing authenticates with query parameters rather than headers. Both values
//! always come from the stored credential, never from an item.

use crate::api::WebmasterTransport;
use crate::constants::BING_DOCUMENTATION_URL;
use crate::error::AppError;
use crate::operations::{Method, RequestDescriptor};
use crate::types::{ApiKey, SiteUrl};

/// Query parameter carrying the API key.
pub const API_KEY_QUERY_PARAM: &str = "apikey";
/// Query parameter carrying the verified site URL.
pub const SITE_URL_QUERY_PARAM: &str = "siteUrl";

/// Path used by the connectivity self-test.
const CONNECTIVITY_TEST_PATH: &str = "/GetUserSites";

/// A stored credential field as a host should render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialField {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub placeholder: Option<&'static str>,
    pub secret: bool,
    pub required: bool,
}

/// Static description of the `bingWebmasterApi` credential type.
#[derive(Debug, Clone, Copy)]
pub struct CredentialDescriptor;

impl CredentialDescriptor {
    pub const NAME: &'static str = "bingWebmasterApi";
    pub const DISPLAY_NAME: &'static str = "Bing Webmaster Tools API";
    pub const DOCUMENTATION_URL: &'static str = BING_DOCUMENTATION_URL;

    pub const FIELDS: [CredentialField; 2] = [
        CredentialField {
            name: "apiKey",
            display_name: "API Key",
            description: "Your Bing Webmaster Tools API Key. Get it from Settings > API Access in Bing Webmaster Tools.",
            placeholder: None,
            secret: true,
            required: true,
        },
        CredentialField {
            name: "siteUrl",
            display_name: "Site URL",
            description: "The URL of your verified site in Bing Webmaster Tools (include https://)",
            placeholder: Some("https://example.com"),
            secret: false,
            required: true,
        },
    ];

    /// The request issued by the connectivity self-test.
    pub fn test_request(credentials: &Credentials) -> RequestDescriptor {
        RequestDescriptor::authenticated(Method::Get, CONNECTIVITY_TEST_PATH, credentials)
    }

    /// Issues a single `GET /GetUserSites`. Any non-error response passes.
    pub async fn test_connectivity(
        transport: &dyn WebmasterTransport,
        credentials: &Credentials,
    ) -> Result<(), AppError> {
        let request = Self::test_request(credentials);
        log::info!(
            "Testing credentials for {} via {} {}",
            credentials.site_url(),
            request.method,
            request.path
        );
        transport.send(&request).await?;
        log::info!("Credential test passed");
        Ok(())
    }
}

/// The immutable credential value shared by every item of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: ApiKey,
    site_url: SiteUrl,
}

impl Credentials {
    pub fn new(api_key: ApiKey, site_url: SiteUrl) -> Self {
        Self { api_key, site_url }
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn site_url(&self) -> &SiteUrl {
        &self.site_url
    }

    /// The query parameters that authenticate every request.
    pub fn auth_query(&self) -> [(&'static str, &str); 2] {
        [
            (API_KEY_QUERY_PARAM, self.api_key.as_str()),
            (SITE_URL_QUERY_PARAM, self.site_url.as_str()),
        ]
    }
}
