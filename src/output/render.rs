// src/output/render.rs
//! Pure rendering of run results and the operation catalog.

use crate::credentials::CredentialDescriptor;
use crate::dispatcher::ItemOutcome;
use crate::error::ItemError;
use crate::operations::{resolve, Resource};
use serde_json::{json, Value};
use std::fmt::Write;

/// One JSON object per item, one item per line, in input order.
pub fn render_outcomes(outcomes: &[ItemOutcome]) -> String {
    outcomes
        .iter()
        .enumerate()
        .map(|(index, outcome)| {
            let line = match outcome {
                Ok(records) => json!({ "item": index, "records": records }),
                Err(error) => error_line(error),
            };
            format!("{}\n", line)
        })
        .collect()
}

fn error_line(error: &ItemError) -> Value {
    let mut line = json!({
        "item": error.index,
        "error": error.to_string(),
        "message": error.message(),
    });
    if let Some(status) = error.status() {
        line["status"] = json!(status);
    }
    line
}

/// Human-readable listing of every resource and operation.
pub fn render_catalog() -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{} (credential '{}', docs: {})",
        CredentialDescriptor::DISPLAY_NAME,
        CredentialDescriptor::NAME,
        CredentialDescriptor::DOCUMENTATION_URL
    );

    for resource in Resource::ALL {
        let default_marker = if resource == Resource::default() {
            " [default]"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "\n{} ({}){} - {}",
            resource.display_name(),
            resource.as_str(),
            default_marker,
            resource.description()
        );

        for operation in resource.operations() {
            let marker = if operation == resource.default_operation() {
                "*"
            } else {
                " "
            };
            let endpoint = resolve(resource, operation)
                .map(|endpoint| format!("{} {}", endpoint.method, endpoint.path))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {} {:<24} {:<28} {}",
                marker,
                operation.as_str(),
                endpoint,
                operation.description()
            );
        }
    }

    out
}
