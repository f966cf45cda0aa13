// src/output/types.rs
//! What a run writes and where.
//!
//! The plan is built from rendered text without touching the filesystem;
//! `writer::deliver` is the only step that performs I/O.

use std::fmt;
use std::path::PathBuf;

/// Where rendered output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Stdout,
}

impl Destination {
    /// The file when `--output-file` was given, stdout otherwise.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => f.write_str("stdout"),
        }
    }
}

/// Rendered content bound to its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    pub destination: Destination,
    pub content: String,
}

impl OutputPlan {
    pub fn new(destination: Destination, content: String) -> Self {
        Self {
            destination,
            content,
        }
    }

    /// Plans delivery of `content` to a file when one is given, else stdout.
    pub fn for_destination(path: Option<PathBuf>, content: String) -> Self {
        Self::new(Destination::from_path(path), content)
    }
}

/// What a successful delivery wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub destination: Destination,
    pub bytes_written: usize,
}
