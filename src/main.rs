// src/main.rs

use anyhow::Context;
use bing_webmaster::constants::LOG_FILE_NAME;
use bing_webmaster::output::{self, Destination, OutputPlan};
use bing_webmaster::{
    AppError, BingHttpClient, CommandLineInput, CredentialDescriptor, Credentials, Item,
    OperationDispatcher, RunConfig, RunMode, RunSummary,
};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Console output goes to stderr: stdout carries the JSON Lines records.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join(LOG_FILE_NAME);
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs the items through the dispatcher and delivers one line per item.
async fn run_items(
    config: &RunConfig,
    credentials: Credentials,
    items: &[Item],
) -> Result<RunSummary, AppError> {
    let transport = Arc::new(BingHttpClient::new()?);
    let dispatcher = OperationDispatcher::new(transport, credentials);

    log::info!(
        "Running {} item(s) for {}",
        items.len(),
        dispatcher.credentials().site_url()
    );

    let outcomes = dispatcher.execute(items).await;
    let summary = RunSummary::from_outcomes(&outcomes);

    let plan = OutputPlan::for_destination(
        config.output_file.clone(),
        output::render_outcomes(&outcomes),
    );
    let report = output::deliver(plan)?;

    if let Destination::File(_) = report.destination {
        eprintln!(
            "✓ {} record(s) from {} item(s) saved to {} ({} bytes)",
            summary.records, summary.items, report.destination, report.bytes_written
        );
    }

    Ok(summary)
}

async fn execute(config: RunConfig) -> Result<(), AppError> {
    match &config.mode {
        RunMode::ListOperations => {
            let plan =
                OutputPlan::for_destination(config.output_file.clone(), output::render_catalog());
            output::deliver(plan)?;
            Ok(())
        }
        RunMode::TestCredentials { credentials } => {
            let transport = BingHttpClient::new()?;
            CredentialDescriptor::test_connectivity(&transport, credentials).await?;
            println!("✓ Credentials are valid for {}", credentials.site_url());
            Ok(())
        }
        RunMode::Dispatch { credentials, items } => {
            let summary = run_items(&config, credentials.clone(), items).await?;

            if summary.is_success() || config.continue_on_fail {
                if !summary.is_success() {
                    log::warn!(
                        "{} of {} item(s) failed; continuing as requested",
                        summary.failed,
                        summary.items
                    );
                }
                Ok(())
            } else {
                Err(AppError::ItemsFailed {
                    failed: summary.failed,
                    total: summary.items,
                })
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("failed to initialise logging")?;

    let config = RunConfig::resolve(cli).context("invalid configuration")?;

    execute(config).await?;

    Ok(())
}
