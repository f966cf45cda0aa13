// src/config.rs
use crate::constants::{API_KEY_ENV_VAR, SITE_URL_ENV_VAR};
use crate::credentials::Credentials;
use crate::error::AppError;
use crate::operations::{
    Item, Operation, PAGE_URL_OPTIONAL_PARAM, PAGE_URL_PARAM, URLS_TO_SUBMIT_PARAM,
    URL_TO_SUBMIT_PARAM,
};
use crate::types::{ApiKey, SiteUrl};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(name = "bingwm", author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Write JSON Lines output to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output_file: Option<String>,

    /// Exit successfully even when some items failed
    #[arg(long, global = true, default_value_t = false)]
    pub continue_on_fail: bool,

    /// Verified site URL (overrides BING_WEBMASTER_SITE_URL)
    #[arg(long, global = true)]
    pub site_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run a single operation, e.g. `run crawl getCrawlIssues`
    Run {
        /// Resource name (site, traffic, crawl, backlink, keyword, page, urlSubmission)
        resource: String,

        /// Operation name; defaults to the resource's default operation
        operation: Option<String>,

        /// Page URL for getUrlInfo, or to narrow getUrlLinks to one page
        #[arg(long)]
        page_url: Option<String>,

        /// URL to submit with submitUrl
        #[arg(long)]
        url: Option<String>,

        /// Newline-separated URLs for submitUrlBatch
        #[arg(long, conflicts_with = "urls_file")]
        urls: Option<String>,

        /// File with one URL per line for submitUrlBatch
        #[arg(long)]
        urls_file: Option<String>,

        /// Extra item parameter as NAME=VALUE (repeatable)
        #[arg(long = "param", value_parser = parse_parameter)]
        params: Vec<(String, String)>,

        /// Return the raw API response without unwrapping
        #[arg(long, default_value_t = false)]
        raw: bool,
    },

    /// Run every item of a JSON document (an item object or an array of them)
    Batch {
        /// Path to the items file
        items_file: String,
    },

    /// Check that the configured credentials can reach Bing
    TestCredentials,

    /// List resources and their operations
    List,
}

fn parse_parameter(input: &str) -> Result<(String, String), String> {
    input
        .split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", input))
}

/// What the binary has been asked to do.
#[derive(Debug, Clone)]
pub enum RunMode {
    Dispatch {
        credentials: Credentials,
        items: Vec<Item>,
    },
    TestCredentials {
        credentials: Credentials,
    },
    ListOperations,
}

/// Resolved run configuration — validated and ready to drive the dispatcher.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: RunMode,
    pub output_file: Option<PathBuf>,
    pub continue_on_fail: bool,
    pub verbose: bool,
}

impl RunConfig {
    /// Resolves a complete configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Resolves using `lookup` in place of the process environment.
    pub fn resolve_with(
        cli: CommandLineInput,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let site_override = cli.site_url.as_deref();

        let mode = match cli.command {
            CliCommand::List => RunMode::ListOperations,
            CliCommand::TestCredentials => RunMode::TestCredentials {
                credentials: resolve_credentials(&lookup, site_override)?,
            },
            CliCommand::Batch { items_file } => {
                let content = std::fs::read_to_string(&items_file)?;
                RunMode::Dispatch {
                    credentials: resolve_credentials(&lookup, site_override)?,
                    items: parse_items(&content)?,
                }
            }
            CliCommand::Run {
                resource,
                operation,
                page_url,
                url,
                urls,
                urls_file,
                params,
                raw,
            } => {
                let urls = match urls_file {
                    Some(path) => Some(std::fs::read_to_string(path)?),
                    None => urls,
                };
                let item = item_from_flags(resource, operation, page_url, url, urls, params, raw);
                RunMode::Dispatch {
                    credentials: resolve_credentials(&lookup, site_override)?,
                    items: vec![item],
                }
            }
        };

        Ok(RunConfig {
            mode,
            output_file: cli.output_file.map(PathBuf::from),
            continue_on_fail: cli.continue_on_fail,
            verbose: cli.verbose,
        })
    }
}

/// Reads the credential pair, letting `--site-url` override the environment.
fn resolve_credentials(
    lookup: &impl Fn(&str) -> Option<String>,
    site_override: Option<&str>,
) -> Result<Credentials, AppError> {
    let api_key = lookup(API_KEY_ENV_VAR).ok_or_else(|| {
        AppError::MissingConfiguration(format!("{} environment variable not set", API_KEY_ENV_VAR))
    })?;

    let site_url = match site_override {
        Some(site) => site.to_string(),
        None => lookup(SITE_URL_ENV_VAR).ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "{} environment variable not set (or pass --site-url)",
                SITE_URL_ENV_VAR
            ))
        })?,
    };

    Ok(Credentials::new(
        ApiKey::new(api_key)?,
        SiteUrl::parse(&site_url)?,
    ))
}

/// Parses an items document: a single item object or an array of items.
pub fn parse_items(content: &str) -> Result<Vec<Item>, AppError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ItemsDocument {
        Many(Vec<Item>),
        One(Item),
    }

    match serde_json::from_str(content)? {
        ItemsDocument::Many(items) => Ok(items),
        ItemsDocument::One(item) => Ok(vec![item]),
    }
}

/// Builds the item for `run`, routing flags to the parameter names the
/// operation reads.
fn item_from_flags(
    resource: String,
    operation: Option<String>,
    page_url: Option<String>,
    url: Option<String>,
    urls: Option<String>,
    params: Vec<(String, String)>,
    raw: bool,
) -> Item {
    let page_url_param = match operation.as_deref() {
        Some(name) if name == Operation::GetUrlLinks.as_str() => PAGE_URL_OPTIONAL_PARAM,
        None if resource == "backlink" => PAGE_URL_OPTIONAL_PARAM,
        _ => PAGE_URL_PARAM,
    };

    let item = Item {
        resource: Some(resource),
        operation,
        return_raw_data: raw,
        ..Item::default()
    };

    let flagged = [
        (page_url_param, page_url),
        (URL_TO_SUBMIT_PARAM, url),
        (URLS_TO_SUBMIT_PARAM, urls),
    ];
    let flagged = flagged
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name.to_string(), value)));

    flagged
        .chain(params)
        .fold(item, |item, (name, value)| item.with_parameter(name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env(name: &str) -> Option<String> {
        match name {
            API_KEY_ENV_VAR => Some("test-key".to_string()),
            SITE_URL_ENV_VAR => Some("https://example.com".to_string()),
            _ => None,
        }
    }

    fn cli(args: &[&str]) -> CommandLineInput {
        CommandLineInput::try_parse_from(std::iter::once("bingwm").chain(args.iter().copied()))
            .unwrap()
    }

    fn single_item(config: RunConfig) -> Item {
        match config.mode {
            RunMode::Dispatch { mut items, .. } => {
                assert_eq!(items.len(), 1);
                items.remove(0)
            }
            other => panic!("expected dispatch, got {:?}", other),
        }
    }

    #[test]
    fn run_routes_page_url_to_url_info() {
        let config = RunConfig::resolve_with(
            cli(&["run", "page", "getUrlInfo", "--page-url", "https://example.com/a"]),
            env,
        )
        .unwrap();
        let item = single_item(config);
        assert_eq!(item.parameters[PAGE_URL_PARAM], "https://example.com/a");
        assert!(!item.parameters.contains_key(PAGE_URL_OPTIONAL_PARAM));
    }

    #[test]
    fn run_routes_page_url_to_backlinks_filter() {
        let config = RunConfig::resolve_with(
            cli(&["run", "backlink", "--page-url", "https://example.com/b", "--raw"]),
            env,
        )
        .unwrap();
        let item = single_item(config);
        assert_eq!(item.operation, None);
        assert!(item.return_raw_data);
        assert_eq!(item.parameters[PAGE_URL_OPTIONAL_PARAM], "https://example.com/b");
    }

    #[test]
    fn run_collects_generic_parameters() {
        let config = RunConfig::resolve_with(
            cli(&["run", "urlSubmission", "submitUrl", "--param", "urlToSubmit=https://x.com/=1"]),
            env,
        )
        .unwrap();
        let item = single_item(config);
        assert_eq!(item.parameters[URL_TO_SUBMIT_PARAM], "https://x.com/=1");
    }

    #[test]
    fn site_url_flag_overrides_environment() {
        let config = RunConfig::resolve_with(
            cli(&["test-credentials", "--site-url", "https://override.example/"]),
            env,
        )
        .unwrap();
        match config.mode {
            RunMode::TestCredentials { credentials } => {
                assert_eq!(credentials.site_url().as_str(), "https://override.example/");
                assert_eq!(credentials.api_key().as_str(), "test-key");
            }
            other => panic!("expected credential test, got {:?}", other),
        }
    }

    #[test]
    fn missing_api_key_is_reported() {
        let err = RunConfig::resolve_with(cli(&["test-credentials"]), |_| None).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(msg) if msg.contains(API_KEY_ENV_VAR)));
    }

    #[test]
    fn list_needs_no_credentials() {
        let config = RunConfig::resolve_with(cli(&["list", "--verbose"]), |_| None).unwrap();
        assert!(matches!(config.mode, RunMode::ListOperations));
        assert!(config.verbose);
    }

    #[test]
    fn items_document_accepts_object_or_array() {
        let one = parse_items(r#"{"resource":"crawl","operation":"getCrawlStats"}"#).unwrap();
        assert_eq!(one.len(), 1);

        let many = parse_items(
            r#"[{"resource":"site","operation":"verifySite"},{"resource":"keyword","returnRawData":true}]"#,
        )
        .unwrap();
        assert_eq!(many.len(), 2);
        assert!(many[1].return_raw_data);

        assert!(matches!(parse_items("not json"), Err(AppError::MalformedInput(_))));
    }

    #[test]
    fn items_document_keeps_non_text_parameter_values() {
        let items = parse_items(
            r#"[{"resource":"page","operation":"getUrlInfo","parameters":{"pageUrl":1}},
               {"resource":"page","operation":"getUrlInfo","parameters":{"pageUrl":{"href":"x"}}}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].parameters[PAGE_URL_PARAM], 1);
        assert!(items[1].parameters[PAGE_URL_PARAM].is_object());
    }

    #[test]
    fn malformed_parameter_flag_is_rejected() {
        assert!(parse_parameter("novalue").is_err());
        assert!(parse_parameter("=x").is_err());
        assert_eq!(
            parse_parameter("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
    }
}
