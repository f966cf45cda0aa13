// src/api/client.rs
//! Pure HTTP client wrapper for the Bing Webmaster JSON API.
//!
//! This module provides a thin wrapper around reqwest. It turns a
//! [`RequestDescriptor`] into exactly one HTTP call and hands back the
//! parsed body, without any knowledge of resources or normalization.

use super::WebmasterTransport;
use crate::constants::{BING_API_BASE_URL, ERROR_BODY_PREVIEW_LENGTH};
use crate::error::{AppError, TransportError};
use crate::operations::{Method, RequestDescriptor};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// A thin wrapper around reqwest Client for Bing Webmaster API requests.
#[derive(Clone)]
pub struct BingHttpClient {
    client: Client,
    base_url: String,
}

impl BingHttpClient {
    /// Creates a client against the public Bing endpoint.
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::InternalError {
                message: "Failed to build HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: BING_API_BASE_URL.to_string(),
        })
    }

    /// Points the client at another base URL (a proxy or a local stand-in).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full request URL: base, path and the encoded query string.
    pub fn build_url(&self, request: &RequestDescriptor) -> Result<Url, TransportError> {
        let endpoint = format!("{}{}", self.base_url, request.path);
        Url::parse_with_params(&endpoint, request.query.iter())
            .map_err(|e| TransportError::Network(format!("Invalid request URL {}: {}", endpoint, e)))
    }
}

#[async_trait::async_trait]
impl WebmasterTransport for BingHttpClient {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, TransportError> {
        let url = self.build_url(request)?;
        let timeout = request.timeout();

        // The query carries the API key; log the path only.
        log::debug!("{} {}{}", request.method, self.base_url, request.path);

        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => {
                let builder = self.client.post(url);
                match &request.body {
                    Some(body) => builder.json(body),
                    None => builder.header(reqwest::header::CONTENT_TYPE, "application/json"),
                }
            }
        };

        let response = builder
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(e, timeout))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(e, timeout))?;

        log::debug!(
            "{} {} -> {} ({} bytes)",
            request.method,
            request.path,
            status,
            text.len()
        );

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: parse_error_body(&text),
            });
        }

        Ok(parse_success_body(text))
    }
}

/// Maps a reqwest failure onto the transport vocabulary.
fn classify_reqwest_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            millis: timeout.as_millis(),
        }
    } else {
        TransportError::from(err)
    }
}

/// Parses a 2xx body. Non-JSON text is kept as a JSON string.
fn parse_success_body(text: String) -> Value {
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    }
}

/// Parses an error body, previewing non-JSON text.
fn parse_error_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }

    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(
            text.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect(),
        )),
    }
}
