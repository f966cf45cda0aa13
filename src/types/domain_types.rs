// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use std::fmt;
use url::Url;

/// API key for Bing Webmaster Tools authentication
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        let trimmed = key.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot contain whitespace".to_string(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        let visible: String = self.0.chars().take(4).collect();
        write!(f, "{}...", visible)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// The verified site a credential is bound to.
///
/// Validated as an absolute http(s) URL, but the user's text is kept
/// verbatim: `url::Url` would append a trailing slash to bare hosts, and
/// Bing compares site URLs textually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrl(String);

impl SiteUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::EmptyField("siteUrl"));
        }

        let parsed = Url::parse(input).map_err(|e| ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: "Only HTTP and HTTPS URLs are supported".to_string(),
            });
        }

        if parsed.host_str().is_none() {
            return Err(ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: "Site URL must include a host".to_string(),
            });
        }

        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_validation() {
        assert!(ApiKey::new("0123456789abcdef").is_ok());
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("   ").is_err());
        assert!(ApiKey::new("abc def").is_err());
        assert_eq!(ApiKey::new("  key123  ").unwrap().as_str(), "key123");
    }

    #[test]
    fn test_api_key_is_redacted() {
        let key = ApiKey::new("supersecretvalue").unwrap();
        assert_eq!(key.to_string(), "supe...");
        assert!(!format!("{:?}", key).contains("secretvalue"));
    }

    #[test]
    fn test_site_url_validation() {
        assert!(SiteUrl::parse("https://example.com").is_ok());
        assert!(SiteUrl::parse("http://localhost:8080/").is_ok());
        assert!(SiteUrl::parse("ftp://example.com").is_err());
        assert!(SiteUrl::parse("example.com").is_err());
        assert_eq!(
            SiteUrl::parse("").unwrap_err(),
            ValidationError::EmptyField("siteUrl")
        );
    }

    #[test]
    fn test_site_url_keeps_user_text() {
        let site = SiteUrl::parse("https://example.com").unwrap();
        assert_eq!(site.as_str(), "https://example.com");

        let site = SiteUrl::parse("https://example.com/").unwrap();
        assert_eq!(site.as_str(), "https://example.com/");
    }
}
