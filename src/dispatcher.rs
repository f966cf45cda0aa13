// src/dispatcher.rs
//! The operation dispatcher: runs items one after another and returns one
//! outcome per item, in input order.
//!
//! Each item goes through the same straight line: select, build, send,
//! normalize. A failure anywhere becomes that item's [`ItemError`]; the next
//! item starts regardless.

use crate::api::WebmasterTransport;
use crate::credentials::Credentials;
use crate::error::{AppError, ItemError};
use crate::normalize::{normalize_response, Record};
use crate::operations::{build_request, Item, Selection};
use std::sync::Arc;

/// What one item produced: its records, or the reason it produced none.
pub type ItemOutcome = Result<Vec<Record>, ItemError>;

/// Summary counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub items: usize,
    pub failed: usize,
    pub records: usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[ItemOutcome]) -> Self {
        outcomes.iter().fold(
            Self {
                items: outcomes.len(),
                ..Self::default()
            },
            |mut summary, outcome| {
                match outcome {
                    Ok(records) => summary.records += records.len(),
                    Err(_) => summary.failed += 1,
                }
                summary
            },
        )
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Maps items onto Bing API calls using one immutable credential.
pub struct OperationDispatcher {
    transport: Arc<dyn WebmasterTransport>,
    credentials: Credentials,
}

impl OperationDispatcher {
    pub fn new(transport: Arc<dyn WebmasterTransport>, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Processes `items` strictly in order; the result has the same length.
    pub async fn execute(&self, items: &[Item]) -> Vec<ItemOutcome> {
        let mut outcomes = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let outcome = self
                .process_item(item)
                .await
                .map_err(|error| ItemError::new(index, error));

            match &outcome {
                Ok(records) => log::info!("Item {}: {} record(s)", index, records.len()),
                Err(error) => log::error!("Item {} failed: {}", index, error),
            }

            outcomes.push(outcome);
        }

        outcomes
    }

    /// Runs one item through select, build, send and normalize.
    pub async fn process_item(&self, item: &Item) -> Result<Vec<Record>, AppError> {
        let selection = Selection::from_item(item)?;
        log::debug!("Dispatching {}", selection.subtitle());

        let request = build_request(&selection, &self.credentials)?.ok_or(
            AppError::UnsupportedSelection {
                resource: selection.resource,
                operation: selection.operation,
            },
        )?;

        let body = self.transport.send(&request).await?;

        Ok(normalize_response(
            &selection,
            self.credentials.site_url().as_str(),
            body,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_counts_records_and_failures() {
        let outcomes: Vec<ItemOutcome> = vec![
            Ok(vec![json!(1), json!(2)]),
            Err(ItemError::new(1, AppError::MissingParameter("pageUrl"))),
            Ok(vec![]),
        ];
        let summary = RunSummary::from_outcomes(&outcomes);
        assert_eq!(
            summary,
            RunSummary {
                items: 3,
                failed: 1,
                records: 2
            }
        );
        assert!(!summary.is_success());
    }

    #[test]
    fn empty_run_is_successful() {
        assert!(RunSummary::from_outcomes(&[]).is_success());
    }
}
