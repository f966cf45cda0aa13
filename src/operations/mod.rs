// src/operations/mod.rs
//! The selectable surface of the adapter: resources, their operations, and
//! the static table that maps each pair onto a Bing endpoint.
//!
//! Names are the camelCase identifiers hosts use in item documents
//! (`urlSubmission`, `getRankAndTrafficStats`, ...). Parsing an unknown name
//! is a local error; pairing a known operation with the wrong resource is
//! not an error at this level (see [`table::resolve`]).

mod request;
mod table;

pub use request::{
    build_request, split_url_batch, Item, RequestDescriptor, Selection, PAGE_URL_OPTIONAL_PARAM,
    PAGE_URL_PARAM, URLS_TO_SUBMIT_PARAM, URL_TO_SUBMIT_PARAM,
};
pub use table::{resolve, Endpoint, Method, Route, DISPATCH_TABLE};

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level category of Bing Webmaster functionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Site,
    #[default]
    Traffic,
    Crawl,
    Backlink,
    Keyword,
    Page,
    UrlSubmission,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Site,
        Resource::Traffic,
        Resource::Crawl,
        Resource::Backlink,
        Resource::Keyword,
        Resource::Page,
        Resource::UrlSubmission,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Site => "site",
            Self::Traffic => "traffic",
            Self::Crawl => "crawl",
            Self::Backlink => "backlink",
            Self::Keyword => "keyword",
            Self::Page => "page",
            Self::UrlSubmission => "urlSubmission",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Site => "Site",
            Self::Traffic => "Traffic",
            Self::Crawl => "Crawl",
            Self::Backlink => "Backlink",
            Self::Keyword => "Keyword",
            Self::Page => "Page",
            Self::UrlSubmission => "URL Submission",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Site => "Site management operations",
            Self::Traffic => "Traffic and ranking statistics",
            Self::Crawl => "Crawl statistics and issues",
            Self::Backlink => "Backlink analysis",
            Self::Keyword => "Keyword statistics",
            Self::Page => "Page statistics and info",
            Self::UrlSubmission => "Submit URLs for indexing",
        }
    }

    /// The operation selected when an item names only the resource.
    pub fn default_operation(&self) -> Operation {
        match self {
            Self::Site => Operation::GetUserSites,
            Self::Traffic => Operation::GetRankAndTrafficStats,
            Self::Crawl => Operation::GetCrawlStats,
            Self::Backlink => Operation::GetUrlLinks,
            Self::Keyword => Operation::GetKeywordStats,
            Self::Page => Operation::GetPageStats,
            Self::UrlSubmission => Operation::SubmitUrl,
        }
    }

    /// Operations valid for this resource, in table order.
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        DISPATCH_TABLE
            .iter()
            .filter(move |route| route.resource == *self)
            .map(|route| route.operation)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Resource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.as_str() == s.trim())
            .ok_or_else(|| AppError::UnknownResource(s.to_string()))
    }
}

/// A specific action within a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    GetUserSites,
    VerifySite,
    GetRankAndTrafficStats,
    GetQueryStats,
    GetCrawlStats,
    GetCrawlIssues,
    GetUrlLinks,
    GetLinkCounts,
    GetKeywordStats,
    GetPageStats,
    GetUrlInfo,
    SubmitUrl,
    SubmitUrlBatch,
}

impl Operation {
    pub const ALL: [Operation; 13] = [
        Operation::GetUserSites,
        Operation::VerifySite,
        Operation::GetRankAndTrafficStats,
        Operation::GetQueryStats,
        Operation::GetCrawlStats,
        Operation::GetCrawlIssues,
        Operation::GetUrlLinks,
        Operation::GetLinkCounts,
        Operation::GetKeywordStats,
        Operation::GetPageStats,
        Operation::GetUrlInfo,
        Operation::SubmitUrl,
        Operation::SubmitUrlBatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetUserSites => "getUserSites",
            Self::VerifySite => "verifySite",
            Self::GetRankAndTrafficStats => "getRankAndTrafficStats",
            Self::GetQueryStats => "getQueryStats",
            Self::GetCrawlStats => "getCrawlStats",
            Self::GetCrawlIssues => "getCrawlIssues",
            Self::GetUrlLinks => "getUrlLinks",
            Self::GetLinkCounts => "getLinkCounts",
            Self::GetKeywordStats => "getKeywordStats",
            Self::GetPageStats => "getPageStats",
            Self::GetUrlInfo => "getUrlInfo",
            Self::SubmitUrl => "submitUrl",
            Self::SubmitUrlBatch => "submitUrlBatch",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GetUserSites => "Get All Sites",
            Self::VerifySite => "Verify Connection",
            Self::GetRankAndTrafficStats => "Get Rank and Traffic Stats",
            Self::GetQueryStats => "Get Query Stats",
            Self::GetCrawlStats => "Get Crawl Stats",
            Self::GetCrawlIssues => "Get Crawl Issues",
            Self::GetUrlLinks => "Get URL Links",
            Self::GetLinkCounts => "Get Link Counts",
            Self::GetKeywordStats => "Get Keyword Stats",
            Self::GetPageStats => "Get Page Stats",
            Self::GetUrlInfo => "Get URL Info",
            Self::SubmitUrl => "Submit URL",
            Self::SubmitUrlBatch => "Submit URL Batch",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::GetUserSites => "Get all verified sites for the user",
            Self::VerifySite => "Verify the site is correctly configured",
            Self::GetRankAndTrafficStats => "Get daily ranking and traffic statistics",
            Self::GetQueryStats => "Get statistics by search queries",
            Self::GetCrawlStats => "Get Bingbot crawl statistics (API exclusive data)",
            Self::GetCrawlIssues => "Get crawl issues and errors",
            Self::GetUrlLinks => "Get backlinks for a URL or entire site",
            Self::GetLinkCounts => "Get total backlink counts",
            Self::GetKeywordStats => "Get historical keyword statistics",
            Self::GetPageStats => "Get statistics by page",
            Self::GetUrlInfo => "Get indexation info for a specific URL",
            Self::SubmitUrl => "Submit a single URL for indexing",
            Self::SubmitUrlBatch => "Submit multiple URLs for indexing (up to 10,000 per day)",
        }
    }

    /// Short imperative label, e.g. "Get crawl stats".
    pub fn action(&self) -> String {
        let name = self.display_name();
        let mut words = name.split(' ');
        let mut action = words.next().unwrap_or_default().to_string();
        for word in words {
            action.push(' ');
            // Acronyms stay upper-case ("URL"), other words are lowered.
            if word.chars().all(|c| c.is_ascii_uppercase()) {
                action.push_str(word);
            } else {
                action.push_str(&word.to_lowercase());
            }
        }
        action
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.as_str() == s.trim())
            .ok_or_else(|| AppError::UnknownOperation(s.to_string()))
    }
}
