// src/normalize.rs
//! Response normalization: unwrap Bing's `{"d": ...}` envelope, apply the
//! `verifySite` check, and split the payload into output records.
//!
//! Every function here is pure. The dispatcher feeds them the parsed body
//! and the selection; they never touch the network.

use crate::constants::RESPONSE_ENVELOPE_KEY;
use crate::operations::{Operation, Resource, Selection};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One emitted output record.
pub type Record = Value;

/// Result of checking the configured site against the account's sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteVerification {
    pub verified: bool,
    pub site_url: String,
    pub sites_count: usize,
}

/// Returns `body.d` when the body is an object carrying the envelope key,
/// otherwise the body unchanged.
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key(RESPONSE_ENVELOPE_KEY) => map
            .remove(RESPONSE_ENVELOPE_KEY)
            .unwrap_or(Value::Null),
        other => other,
    }
}

/// Removes at most one trailing `/`.
pub fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// Checks whether `site_url` is among the sites in `payload`.
///
/// Anything other than an array counts as zero sites. Entries without a
/// string `Url` never match.
pub fn verify_site(payload: &Value, site_url: &str) -> SiteVerification {
    let wanted = strip_trailing_slash(site_url);
    let sites = payload.as_array().map(Vec::as_slice).unwrap_or_default();

    let verified = sites.iter().any(|site| {
        site.get("Url")
            .and_then(Value::as_str)
            .is_some_and(|url| strip_trailing_slash(url) == wanted)
    });

    SiteVerification {
        verified,
        site_url: site_url.to_string(),
        sites_count: sites.len(),
    }
}

/// Splits a payload into records: one per element of an array, otherwise one.
pub fn into_records(payload: Value) -> Vec<Record> {
    match payload {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Applies the full normalization contract to a response body.
pub fn normalize_response(selection: &Selection, site_url: &str, body: Value) -> Vec<Record> {
    if selection.return_raw_data {
        return into_records(body);
    }

    let payload = unwrap_envelope(body);

    if selection.resource == Resource::Site && selection.operation == Operation::VerifySite {
        let verification = verify_site(&payload, site_url);
        log::debug!(
            "Site {} verified: {} ({} sites on account)",
            verification.site_url,
            verification.verified,
            verification.sites_count
        );
        return vec![serde_json::json!(verification)];
    }

    into_records(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Item;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn selection(resource: Resource, operation: Operation, raw: bool) -> Selection {
        Selection::from_item(&Item::new(resource, operation).with_raw_data(raw)).unwrap()
    }

    #[test]
    fn envelope_array_becomes_one_record_per_element() {
        let records = normalize_response(
            &selection(Resource::Traffic, Operation::GetQueryStats, false),
            "https://example.com",
            json!({ "d": [{ "Query": "a" }, { "Query": "b" }] }),
        );
        assert_eq!(records, vec![json!({ "Query": "a" }), json!({ "Query": "b" })]);
    }

    #[test]
    fn envelope_object_becomes_one_record() {
        let records = normalize_response(
            &selection(Resource::Backlink, Operation::GetLinkCounts, false),
            "https://example.com",
            json!({ "d": { "k": 1 } }),
        );
        assert_eq!(records, vec![json!({ "k": 1 })]);
    }

    #[test]
    fn body_without_envelope_is_used_as_is() {
        let body = json!({ "TotalPages": 3, "Links": [] });
        assert_eq!(unwrap_envelope(body.clone()), body);
        assert_eq!(unwrap_envelope(json!([1, 2])), json!([1, 2]));
        assert_eq!(unwrap_envelope(json!("ok")), json!("ok"));
    }

    #[test]
    fn null_envelope_is_one_null_record() {
        let records = normalize_response(
            &selection(Resource::UrlSubmission, Operation::SubmitUrl, false),
            "https://example.com",
            json!({ "d": null }),
        );
        assert_eq!(records, vec![Value::Null]);
    }

    #[test]
    fn empty_array_emits_nothing() {
        let records = normalize_response(
            &selection(Resource::Crawl, Operation::GetCrawlIssues, false),
            "https://example.com",
            json!({ "d": [] }),
        );
        assert!(records.is_empty());
    }

    #[test]
    fn verify_site_matches_across_trailing_slash() {
        let payload = json!([{ "Url": "https://example.com/" }]);
        assert_eq!(
            verify_site(&payload, "https://example.com"),
            SiteVerification {
                verified: true,
                site_url: "https://example.com".to_string(),
                sites_count: 1,
            }
        );
    }

    #[test]
    fn verify_site_reports_mismatch() {
        let payload = json!([{ "Url": "https://other.com/" }]);
        let result = verify_site(&payload, "https://example.com");
        assert!(!result.verified);
        assert_eq!(result.sites_count, 1);
    }

    #[test]
    fn verify_site_counts_zero_for_non_arrays() {
        let result = verify_site(&json!({ "Url": "https://example.com" }), "https://example.com");
        assert_eq!(result.sites_count, 0);
        assert!(!result.verified);
    }

    #[test]
    fn verify_site_skips_entries_without_url() {
        let payload = json!([{ "IsVerified": true }, { "Url": null }, { "Url": "https://example.com" }]);
        let result = verify_site(&payload, "https://example.com/");
        assert!(result.verified);
        assert_eq!(result.sites_count, 3);
        assert_eq!(result.site_url, "https://example.com/");
    }

    #[test]
    fn trailing_slash_normalization_is_idempotent() {
        assert_eq!(
            strip_trailing_slash("https://example.com"),
            strip_trailing_slash("https://example.com/")
        );
        let once = strip_trailing_slash("https://example.com/");
        assert_eq!(strip_trailing_slash(once), once);
        // Only one slash is removed.
        assert_eq!(strip_trailing_slash("https://example.com//"), "https://example.com/");
    }

    #[test]
    fn verify_site_emits_single_record() {
        let records = normalize_response(
            &selection(Resource::Site, Operation::VerifySite, false),
            "https://example.com",
            json!({ "d": [{ "Url": "https://example.com/" }, { "Url": "https://other.com" }] }),
        );
        assert_eq!(
            records,
            vec![json!({ "verified": true, "siteUrl": "https://example.com", "sitesCount": 2 })]
        );
    }

    #[test]
    fn raw_data_skips_unwrapping_and_verification() {
        let body = json!({ "d": [{ "Url": "https://example.com/" }] });
        let records = normalize_response(
            &selection(Resource::Site, Operation::VerifySite, true),
            "https://example.com",
            body.clone(),
        );
        assert_eq!(records, vec![body]);
    }
}
