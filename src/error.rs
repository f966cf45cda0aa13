// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system. Three
//! layers exist:
//!
//! - [`TransportError`]: what went wrong on the wire (status, timeout, network).
//! - [`AppError`]: every failure the library or binary can produce.
//! - [`ItemError`]: the per-item failure handed back to the host, carrying the
//!   index of the item that produced it and the user-facing message.

use crate::constants::PROVIDER_MESSAGE_KEY;
use crate::operations::{Operation, Resource};
use serde_json::Value;
use thiserror::Error;

/// Failure of a single HTTP round trip to the Bing API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The provider answered with a non-2xx status.
    ///
    /// `body` holds the parsed JSON error document when there was one, or a
    /// preview of the raw text otherwise.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: Option<Value> },

    /// The fixed per-call deadline elapsed.
    #[error("timeout of {millis}ms exceeded")]
    Timeout { millis: u128 },

    /// Connection, TLS or protocol failure before any response arrived.
    #[error("{0}")]
    Network(String),
}

impl TransportError {
    /// The provider's own `Message` text from the error body, if present and non-empty.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                body: Some(body), ..
            } => body
                .get(PROVIDER_MESSAGE_KEY)
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty()),
            _ => None,
        }
    }

    /// Best human-readable description: the provider's message, else our own.
    pub fn describe(&self) -> String {
        self.provider_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }

    /// HTTP status of the failed call, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    /// Statuses are classified from the response, so this only sees failures
    /// that never got one. The URL is dropped: its query carries the API key.
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url().to_string())
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Unknown resource '{0}'")]
    UnknownResource(String),

    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("The operation '{operation}' is not supported for resource '{resource}'")]
    UnsupportedSelection {
        resource: Resource,
        operation: Operation,
    },

    #[error("The parameter '{0}' is required")]
    MissingParameter(&'static str),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output delivery to {destination} failed: {source}")]
    DeliveryFailed {
        destination: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{failed} of {total} items failed")]
    ItemsFailed { failed: usize, total: usize },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedInput(err.to_string())
    }
}

/// Where an item failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOrigin {
    /// The HTTP call failed or the provider reported an error.
    Provider,
    /// The request could not be built from the item.
    Local,
}

impl FailureOrigin {
    /// Prefix that tells users which side of the wire failed.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Provider => "Bing API Error: ",
            Self::Local => "Error: ",
        }
    }
}

/// A failure attributed to one input item.
///
/// The item emits no records. Items after it still run; whether the whole run
/// is aborted is up to the host.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}{}", .origin.prefix(), .message)]
pub struct ItemError {
    pub index: usize,
    pub origin: FailureOrigin,
    message: String,
    status: Option<u16>,
}

impl ItemError {
    /// Wraps an error raised while processing the item at `index`.
    pub fn new(index: usize, error: AppError) -> Self {
        match error {
            AppError::Transport(transport) => Self {
                index,
                origin: FailureOrigin::Provider,
                message: transport.describe(),
                status: transport.status(),
            },
            other => Self {
                index,
                origin: FailureOrigin::Local,
                message: other.to_string(),
                status: None,
            },
        }
    }

    /// The message without the origin prefix; the provider's text verbatim when it sent one.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the failed call, if the provider answered.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn provider_message_wins_over_status_text() {
        let err = TransportError::Status {
            status: 400,
            body: Some(json!({ "ErrorCode": 3, "Message": "Invalid API key" })),
        };
        assert_eq!(err.provider_message(), Some("Invalid API key"));
        assert_eq!(err.describe(), "Invalid API key");
    }

    #[test]
    fn empty_provider_message_falls_back() {
        let err = TransportError::Status {
            status: 500,
            body: Some(json!({ "Message": "" })),
        };
        assert_eq!(err.describe(), "Request failed with status code 500");
    }

    #[test]
    fn non_object_body_falls_back() {
        let err = TransportError::Status {
            status: 502,
            body: Some(json!("<html>Bad Gateway</html>")),
        };
        assert_eq!(err.provider_message(), None);
        assert_eq!(err.describe(), "Request failed with status code 502");
    }

    #[test]
    fn timeout_reads_like_the_deadline() {
        let err = TransportError::Timeout { millis: 30000 };
        assert_eq!(err.to_string(), "timeout of 30000ms exceeded");
    }

    #[test]
    fn item_error_prefixes_provider_failures() {
        let err = ItemError::new(
            2,
            AppError::Transport(TransportError::Status {
                status: 401,
                body: Some(json!({ "Message": "Invalid API key" })),
            }),
        );
        assert_eq!(err.index, 2);
        assert_eq!(err.origin, FailureOrigin::Provider);
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.message(), "Invalid API key");
        assert_eq!(err.to_string(), "Bing API Error: Invalid API key");
    }

    #[test]
    fn item_error_keeps_network_text_verbatim() {
        let err = ItemError::new(
            0,
            AppError::Transport(TransportError::Network(
                "error sending request for url".to_string(),
            )),
        );
        assert_eq!(err.message(), "error sending request for url");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn item_error_prefixes_local_failures() {
        let err = ItemError::new(5, AppError::MissingParameter("pageUrl"));
        assert_eq!(err.origin, FailureOrigin::Local);
        assert_eq!(err.to_string(), "Error: The parameter 'pageUrl' is required");
    }
}
