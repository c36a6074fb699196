//! Result and error model
//!
//! Every concatenation run ends in exactly one of two outcomes: a
//! [`ConcatSummary`] describing what was written, or a [`ConcatError`].

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for concatenation operations
pub type Result<T> = std::result::Result<T, ConcatError>;

/// Broad error category, used by the CLI for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Filesystem,
    Encoding,
}

/// Errors raised while concatenating a directory tree
#[derive(Error, Debug)]
pub enum ConcatError {
    /// Missing root, unreadable entry, unwritable output
    #[error("{message}: {}", .path.display())]
    Filesystem {
        message: &'static str,
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },

    /// File content is not valid UTF-8
    #[error("invalid UTF-8 at byte {valid_up_to}: {}", .path.display())]
    Encoding {
        path: PathBuf,
        valid_up_to: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Invalid configuration (e.g. an empty extension set)
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ConcatError {
    pub fn root_not_found(path: impl Into<PathBuf>, source: Option<io::Error>) -> Self {
        Self::Filesystem {
            message: "root not found",
            path: path.into(),
            source,
        }
    }

    pub fn cannot_write_output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            message: "cannot write output",
            path: path.into(),
            source: Some(source),
        }
    }

    pub fn unreadable_entry(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            message: "cannot read entry",
            path: path.into(),
            source: Some(source),
        }
    }

    pub fn encoding(path: impl Into<PathBuf>, source: std::str::Utf8Error) -> Self {
        Self::Encoding {
            path: path.into(),
            valid_up_to: source.valid_up_to(),
            source,
        }
    }

    /// The category this error belongs to.
    ///
    /// Configuration problems are reported as filesystem errors since they
    /// are detected before any file is touched and share the same exit path.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConcatError::Encoding { .. } => ErrorKind::Encoding,
            ConcatError::Filesystem { .. } | ConcatError::Config(_) => ErrorKind::Filesystem,
        }
    }

    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConcatError::Filesystem { path, .. } | ConcatError::Encoding { path, .. } => {
                Some(path)
            }
            ConcatError::Config(_) => None,
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcatSummary {
    /// Absolute root that was scanned
    pub root: String,

    /// Output file that was written
    pub output: String,

    /// Suffixes that selected entries
    pub extensions: Vec<String>,

    /// Number of sections written
    pub files: usize,

    /// Content bytes copied (headers and separators excluded)
    pub bytes: u64,

    /// Whether the output file itself was seen during the walk and excluded
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skipped_output: bool,

    /// Completion time
    pub generated_at: DateTime<Utc>,
}
