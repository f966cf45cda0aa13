// src/lib.rs
//! bing-webmaster library — Bing Webmaster Tools API operations as
//! selectable (resource, operation) invocations.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ItemError`, `TransportError`, `ValidationError`
//! - **Configuration** — `RunConfig`, `CommandLineInput`
//! - **Credentials** — `Credentials`, `CredentialDescriptor`
//! - **Operations** — `Resource`, `Operation`, `Item`, `Selection`, the dispatch table
//! - **Transport** — `WebmasterTransport`, `BingHttpClient`
//! - **Dispatch** — `OperationDispatcher`, `ItemOutcome`, normalization helpers
//! - **Output** — JSON Lines rendering and delivery

pub mod api;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod normalize;
pub mod operations;
pub mod output;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, FailureOrigin, ItemError, TransportError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CliCommand, CommandLineInput, RunConfig, RunMode};

// --- Domain Types ---
pub use crate::types::{ApiKey, SiteUrl};

// --- Credentials ---
pub use crate::credentials::{CredentialDescriptor, CredentialField, Credentials};

// --- Operations ---
pub use crate::operations::{
    build_request, resolve, split_url_batch, Endpoint, Item, Method, Operation, RequestDescriptor,
    Resource, Route, Selection, DISPATCH_TABLE,
};

// --- API Client ---
pub use crate::api::{BingHttpClient, WebmasterTransport};

// --- Dispatch & Normalization ---
pub use crate::dispatcher::{ItemOutcome, OperationDispatcher, RunSummary};
pub use crate::normalize::{
    into_records, normalize_response, strip_trailing_slash, unwrap_envelope, verify_site, Record,
    SiteVerification,
};
