// src/operations/table.rs
//! The dispatch table: every supported (resource, operation) pair and the
//! Bing endpoint it calls.
//!
//! Adding an operation means adding one row here. Anything not listed
//! resolves to `None`.

use super::{Operation, Resource};
use crate::constants::{GET_REQUEST_TIMEOUT, POST_REQUEST_TIMEOUT};
use std::fmt;
use std::time::Duration;

/// HTTP verbs the Bing JSON API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }

    /// Fixed deadline for one call with this verb.
    pub fn timeout(&self) -> Duration {
        match self {
            Self::Get => GET_REQUEST_TIMEOUT,
            Self::Post => POST_REQUEST_TIMEOUT,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a request goes: verb plus path below the API base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub resource: Resource,
    pub operation: Operation,
    pub endpoint: Endpoint,
}

const fn route(
    resource: Resource,
    operation: Operation,
    method: Method,
    path: &'static str,
) -> Route {
    Route {
        resource,
        operation,
        endpoint: Endpoint { method, path },
    }
}

pub const DISPATCH_TABLE: &[Route] = &[
    route(Resource::Site, Operation::GetUserSites, Method::Get, "/GetUserSites"),
    route(Resource::Site, Operation::VerifySite, Method::Get, "/GetUserSites"),
    route(
        Resource::Traffic,
        Operation::GetRankAndTrafficStats,
        Method::Get,
        "/GetRankAndTrafficStats",
    ),
    route(Resource::Traffic, Operation::GetQueryStats, Method::Get, "/GetQueryStats"),
    route(Resource::Crawl, Operation::GetCrawlStats, Method::Get, "/GetCrawlStats"),
    route(Resource::Crawl, Operation::GetCrawlIssues, Method::Get, "/GetCrawlIssues"),
    route(Resource::Backlink, Operation::GetUrlLinks, Method::Get, "/GetUrlLinks"),
    route(Resource::Backlink, Operation::GetLinkCounts, Method::Get, "/GetLinkCounts"),
    route(Resource::Keyword, Operation::GetKeywordStats, Method::Get, "/GetKeywordStats"),
    route(Resource::Page, Operation::GetPageStats, Method::Get, "/GetPageStats"),
    route(Resource::Page, Operation::GetUrlInfo, Method::Get, "/GetUrlInfo"),
    route(Resource::UrlSubmission, Operation::SubmitUrl, Method::Get, "/SubmitUrl"),
    route(
        Resource::UrlSubmission,
        Operation::SubmitUrlBatch,
        Method::Post,
        "/SubmitUrlBatch",
    ),
];

/// Looks up the endpoint for a pair. Pairs outside the table yield `None`.
pub fn resolve(resource: Resource, operation: Operation) -> Option<Endpoint> {
    DISPATCH_TABLE
        .iter()
        .find(|route| route.resource == resource && route.operation == operation)
        .map(|route| route.endpoint)
}
