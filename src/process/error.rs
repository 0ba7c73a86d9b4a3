//! Error types for process discovery and status record parsing.

use std::io;
use std::path::PathBuf;

/// Failure to turn a status record into a [`Process`](super::Process).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("minimum entries not present in process properties index: found {found}, need {required}")]
    InsufficientProperties { found: usize, required: usize },

    #[error("process property {field}: entry missing from process properties index")]
    MissingField { field: &'static str },

    #[error("invalid value {value:?} for process property {field}: expected a number")]
    InvalidValue { field: &'static str, value: String },
}

/// Failure while discovering or reading process entries below a proc root.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to evaluate processes using proc path {}: {source}", path.display())]
    Discovery { path: PathBuf, source: io::Error },

    #[error("failed to read file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to obtain properties for process from file {}: {source}", path.display())]
    Status { path: PathBuf, source: StatusError },
}

impl ProcessError {
    /// True when the status file disappeared between discovery and read.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProcessError::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// Path of the file or directory the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ProcessError::Discovery { path, .. }
            | ProcessError::Read { path, .. }
            | ProcessError::Status { path, .. } => path,
        }
    }
}
