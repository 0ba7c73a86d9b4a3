//! check-process Library
//!
//! This library evaluates the scheduling state of every process listed in the
//! Linux proc filesystem and reports problematic ones in a form suitable for
//! Nagios-compatible monitoring systems.
//!
//! # Features
//!
//! - **Process Discovery**: Enumerate `/proc/<pid>` directories
//! - **Status Parsing**: Tolerant two-stage parsing of `/proc/<pid>/status`
//! - **Severity Classification**: Disk sleep is CRITICAL, zombies are WARNING
//! - **Reports**: One-line summary, detailed report and performance data
//!
//! # Usage
//!
//! ```rust
//! use check_process::process::{parse_status, Processes};
//! use check_process::report::one_line_summary;
//!
//! let record = "Name:\tflush-253:0\nUmask:\t0000\nState:\tD (disk sleep)\n\
//!               Pid:\t311\nPPid:\t2\nThreads:\t1\n";
//! let process = parse_status(record.as_bytes()).expect("valid status record");
//! assert_eq!(process.name, "flush-253:0");
//!
//! let processes: Processes = vec![process].into();
//! assert_eq!(processes.service_state().label(), "CRITICAL");
//! println!("{}", one_line_summary(&processes));
//! ```

pub mod output;
pub mod process;
pub mod report;

// Re-export main types for convenience
pub use output::{CheckResult, PerformanceData};
pub use process::{Process, ProcessError, Processes, ServiceState, StatusError};

/// Application name.
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Application version including the git commit when it was available at build time.
pub fn version() -> String {
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if !sha.is_empty() && sha != "VERGEN_IDEMPOTENT_OUTPUT" => {
            format!("{} {} ({})", APP_NAME, env!("CARGO_PKG_VERSION"), sha)
        }
        _ => format!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION")),
    }
}

/// Branding line appended to notifications.
pub fn branding(msg: &str) -> String {
    format!("{}{} ({})", msg, version(), env!("CARGO_PKG_REPOSITORY"))
}
