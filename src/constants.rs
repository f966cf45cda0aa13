// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these constants should tell you how the adapter talks to Bing: where it
//! connects, how long it waits, and where credentials come from.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Bing Webmaster API boundaries
// ---------------------------------------------------------------------------

/// JSON flavour of the Bing Webmaster Tools API. Every endpoint path is
/// appended to this base.
pub const BING_API_BASE_URL: &str = "https://ssl.bing.com/webmaster/api.svc/json";

/// Where users find the API key and the documentation for every endpoint.
pub const BING_DOCUMENTATION_URL: &str = "https://learn.microsoft.com/en-us/bingwebmaster/";

/// Deadline for a single GET round trip. Fixed, never retried.
pub const GET_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Deadline for a single POST round trip. Batch submissions carry a body
/// and are given twice as long as reads.
pub const POST_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Bing's documented cap on URLs per `SubmitUrlBatch` request.
///
/// Not enforced here: the provider rejects oversized batches itself. The
/// dispatcher only logs a warning when a batch exceeds it.
pub const SUBMIT_BATCH_DOCUMENTED_LIMIT: usize = 500;

// ---------------------------------------------------------------------------
// Response conventions
// ---------------------------------------------------------------------------

/// Key of the envelope Bing wraps every JSON payload in (`{"d": ...}`).
pub const RESPONSE_ENVELOPE_KEY: &str = "d";

/// Field carrying the human-readable message in Bing error bodies.
pub const PROVIDER_MESSAGE_KEY: &str = "Message";

// ---------------------------------------------------------------------------
// Configuration sources
// ---------------------------------------------------------------------------

/// Environment variable holding the Bing Webmaster API key.
pub const API_KEY_ENV_VAR: &str = "BING_WEBMASTER_API_KEY";

/// Environment variable holding the verified site URL.
pub const SITE_URL_ENV_VAR: &str = "BING_WEBMASTER_SITE_URL";

/// File name of the debug log written to the system temp directory.
pub const LOG_FILE_NAME: &str = "bing_webmaster.log";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing non-JSON error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
