//! CLI command implementations for check-process.
//!
//! This module provides implementations for all modes:
//! - `check`: Nagios plugin evaluation (default mode)
//! - `list`: Inspection listing of problematic and remaining processes
//! - `config`: Configuration file generation

pub mod check;
pub mod config;
pub mod list;

// Re-export command functions
pub use check::{command_check, init_failure};
pub use config::command_config;
pub use list::command_list;
