// tests/common/mod.rs
//! Shared fixtures: credentials and an in-memory transport that records
//! every request and replays scripted replies in order.

#![allow(dead_code)]

use async_trait::async_trait;
use bing_webmaster::{
    ApiKey, Credentials, RequestDescriptor, SiteUrl, TransportError, WebmasterTransport,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const TEST_API_KEY: &str = "test-api-key-0001";
pub const TEST_SITE_URL: &str = "https://example.com";

pub fn credentials() -> Credentials {
    Credentials::new(
        ApiKey::new(TEST_API_KEY).expect("test key is valid"),
        SiteUrl::parse(TEST_SITE_URL).expect("test site is valid"),
    )
}

/// Replays scripted replies; once exhausted, answers `{"d": null}`.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<Value, TransportError>>>,
    requests: Mutex<Vec<RequestDescriptor>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Result<Value, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().expect("lock").clone()
    }
}

#[async_trait]
impl WebmasterTransport for ScriptedTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, TransportError> {
        self.requests.lock().expect("lock").push(request.clone());
        self.replies
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(serde_json::json!({ "d": null })))
    }
}
