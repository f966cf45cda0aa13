// src/api/mod.rs
//! Bing Webmaster API interaction — the ability to issue one described request.
//!
//! Business logic depends on [`WebmasterTransport`], never on HTTP details,
//! so the dispatcher can be driven by an in-memory transport in tests.

pub mod client;

use crate::error::TransportError;
use crate::operations::RequestDescriptor;
use serde_json::Value;

/// Issues a single request and returns the parsed body.
///
/// Implementations make exactly one attempt, honour the descriptor's
/// timeout, and report any non-2xx answer as [`TransportError::Status`]
/// carrying the provider's error body. A success body that is not JSON is
/// returned as a JSON string.
#[async_trait::async_trait]
pub trait WebmasterTransport: Send + Sync {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, TransportError>;
}

// Re-export the public interface
pub use client::BingHttpClient;
