// src/output/writer.rs
//! Performs the I/O for an output plan.

use super::types::{DeliveryReport, Destination, OutputPlan};
use crate::error::AppError;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Writes the plan's content to its destination.
pub fn deliver(plan: OutputPlan) -> Result<DeliveryReport, AppError> {
    let OutputPlan {
        destination,
        content,
    } = plan;

    let written = match &destination {
        Destination::File(path) => write_file(path, &content),
        Destination::Stdout => print_to_stdout(&content),
    };

    match written {
        Ok(()) => {
            log::debug!("Delivered {} bytes to {}", content.len(), destination);
            Ok(DeliveryReport {
                destination,
                bytes_written: content.len(),
            })
        }
        Err(source) => {
            log::error!("Writing to {} failed: {}", destination, source);
            Err(AppError::DeliveryFailed {
                destination: destination.to_string(),
                source,
            })
        }
    }
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    log::info!("Wrote file: {}", path.display());
    Ok(())
}

fn print_to_stdout(content: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn writes_file_and_reports_bytes() {
        let dir = std::env::temp_dir().join(format!("bingwm_writer_{}", std::process::id()));
        let path = dir.join("nested").join("out.jsonl");

        let plan = OutputPlan::for_destination(Some(path.clone()), "{\"item\":0}\n".to_string());
        let report = deliver(plan).unwrap();

        assert_eq!(report.destination, Destination::File(path.clone()));
        assert_eq!(report.bytes_written, 11);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"item\":0}\n");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn unwritable_target_names_the_destination() {
        let blocker = std::env::temp_dir().join(format!("bingwm_blocker_{}", std::process::id()));
        fs::write(&blocker, "file, not a directory").unwrap();
        let target: PathBuf = blocker.join("out.jsonl");

        let err = deliver(OutputPlan::for_destination(Some(target.clone()), "x".to_string()))
            .unwrap_err();
        match err {
            AppError::DeliveryFailed { destination, .. } => {
                assert_eq!(destination, target.display().to_string())
            }
            other => panic!("unexpected error: {:?}", other),
        }

        fs::remove_file(blocker).unwrap();
    }
}
