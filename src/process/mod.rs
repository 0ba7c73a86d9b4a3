//! Process-related modules for discovery, parsing and state classification.
//!
//! This module provides:
//! - `scanner`: Process discovery below a proc root
//! - `status`: Parsing of /proc/<pid>/status records
//! - `collection`: Ordered process collections and their queries
//! - `state`: Kernel state labels and named state queries
//! - `classifier`: Severity tiers and the collection verdict

pub mod classifier;
pub mod collection;
pub mod error;
pub mod scanner;
pub mod state;
pub mod status;

// Re-export commonly used types
pub use classifier::{ServiceState, CRITICAL_STATES, PROBLEM_STATES, WARNING_STATES};
pub use collection::Processes;
pub use error::{ProcessError, StatusError};
pub use scanner::{collect_proc_dirs, from_proc_dirs, scan, PROC_ROOT_DIR};
pub use state::{StateQuery, SUPPORTED_STATES};
pub use status::{parse_properties, parse_status, read_status_file, Process, Properties};
