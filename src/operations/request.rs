// src/operations/request.rs
//! Turns an item into a request descriptor.
//!
//! Building is pure: the same selection and credentials always produce the
//! same descriptor, and nothing is remembered between items.

use super::{resolve, Method, Operation, Resource};
use crate::constants::SUBMIT_BATCH_DOCUMENTED_LIMIT;
use crate::credentials::Credentials;
use crate::error::AppError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Item parameter holding the page for `page/getUrlInfo`.
pub const PAGE_URL_PARAM: &str = "pageUrl";
/// Item parameter narrowing `backlink/getUrlLinks` to one page.
pub const PAGE_URL_OPTIONAL_PARAM: &str = "pageUrlOptional";
/// Item parameter holding the URL for `urlSubmission/submitUrl`.
pub const URL_TO_SUBMIT_PARAM: &str = "urlToSubmit";
/// Item parameter holding newline-separated URLs for `urlSubmission/submitUrlBatch`.
pub const URLS_TO_SUBMIT_PARAM: &str = "urlsToSubmit";

/// One unit of work as a host supplies it.
///
/// Names and parameter values are kept as the document wrote them, so a typo
/// or a wrongly shaped value still reaches the dispatcher and fails as that
/// item's error, not as a whole-run parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub parameters: IndexMap<String, Value>,
    #[serde(default)]
    pub return_raw_data: bool,
}

impl Item {
    pub fn new(resource: Resource, operation: Operation) -> Self {
        Self {
            resource: Some(resource.as_str().to_string()),
            operation: Some(operation.as_str().to_string()),
            ..Self::default()
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .insert(name.into(), Value::String(value.into()));
        self
    }

    pub fn with_raw_data(mut self, return_raw_data: bool) -> Self {
        self.return_raw_data = return_raw_data;
        self
    }
}

/// A validated (resource, operation) choice plus its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub resource: Resource,
    pub operation: Operation,
    pub parameters: IndexMap<String, String>,
    pub return_raw_data: bool,
}

impl Selection {
    /// Parses the item's names, applying the host defaults for missing ones.
    pub fn from_item(item: &Item) -> Result<Self, AppError> {
        let resource = match item.resource.as_deref() {
            Some(name) => name.parse()?,
            None => Resource::default(),
        };
        let operation = match item.operation.as_deref() {
            Some(name) => name.parse()?,
            None => resource.default_operation(),
        };

        let mut parameters = IndexMap::with_capacity(item.parameters.len());
        for (name, value) in &item.parameters {
            if let Some(text) = parameter_text(name, value)? {
                parameters.insert(name.clone(), text);
            }
        }

        Ok(Self {
            resource,
            operation,
            parameters,
            return_raw_data: item.return_raw_data,
        })
    }

    /// `"<operation>: <resource>"`, as shown next to an item in logs.
    pub fn subtitle(&self) -> String {
        format!("{}: {}", self.operation, self.resource)
    }

    /// A parameter value, treating blank text as absent.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &'static str) -> Result<&str, AppError> {
        self.parameter(name).ok_or(AppError::MissingParameter(name))
    }
}

/// Text form of a parameter value. Numbers and booleans are written out,
/// lists become one line per element and `null` counts as absent.
fn parameter_text(name: &str, value: &Value) -> Result<Option<String>, AppError> {
    let malformed = || {
        AppError::MalformedInput(format!(
            "parameter '{}' must be text, a number, a boolean or a list of those",
            name
        ))
    };

    match value {
        Value::Null => Ok(None),
        Value::Array(values) => values
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(|lines| Some(lines.join("\n")))
            .ok_or_else(malformed),
        other => scalar_text(other).map(Some).ok_or_else(malformed),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
        _ => None,
    }
}

/// Everything needed to issue one HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: &'static str,
    /// Query parameters in insertion order; authentication comes first.
    pub query: IndexMap<String, String>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// An authenticated request with no extra parameters.
    pub fn authenticated(method: Method, path: &'static str, credentials: &Credentials) -> Self {
        let query = credentials
            .auth_query()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Self {
            method,
            path,
            query,
            body: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.method.timeout()
    }

    fn with_query(mut self, name: &str, value: &str) -> Self {
        self.query.insert(name.to_string(), value.to_string());
        self
    }

    fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Builds the request for a selection.
///
/// Returns `Ok(None)` when the pair is not in the dispatch table; the caller
/// decides what an absent request means.
pub fn build_request(
    selection: &Selection,
    credentials: &Credentials,
) -> Result<Option<RequestDescriptor>, AppError> {
    let Some(endpoint) = resolve(selection.resource, selection.operation) else {
        return Ok(None);
    };

    let request = RequestDescriptor::authenticated(endpoint.method, endpoint.path, credentials);

    let request = match selection.operation {
        Operation::GetUrlInfo => {
            let page_url = selection.required(PAGE_URL_PARAM)?;
            request.with_query("pageUrl", page_url)
        }
        Operation::GetUrlLinks => match selection.parameter(PAGE_URL_OPTIONAL_PARAM) {
            Some(page_url) => request.with_query("pageUrl", page_url),
            None => request,
        },
        Operation::SubmitUrl => {
            let url = selection.required(URL_TO_SUBMIT_PARAM)?;
            request.with_query("pageUrl", url)
        }
        Operation::SubmitUrlBatch => {
            let urls = split_url_batch(selection.required(URLS_TO_SUBMIT_PARAM)?);
            if urls.len() > SUBMIT_BATCH_DOCUMENTED_LIMIT {
                log::warn!(
                    "Submitting {} URLs in one batch; Bing documents a limit of {} per request",
                    urls.len(),
                    SUBMIT_BATCH_DOCUMENTED_LIMIT
                );
            }
            request.with_body(json!({ "urlList": urls }))
        }
        _ => request,
    };

    Ok(Some(request))
}

/// Splits newline-separated URLs, trimming each line and dropping blank ones.
pub fn split_url_batch(input: &str) -> Vec<String> {
    input
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
