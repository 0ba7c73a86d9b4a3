//! Plugin check implementation.
//!
//! Scans the proc filesystem, evaluates every process state and assembles
//! the plugin output and exit state.

use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, error};

use check_process::output::{CheckResult, PerformanceData};
use check_process::process::{collect_proc_dirs, from_proc_dirs, ServiceState};
use check_process::report::{check_report, one_line_summary, perf_data};
use check_process::branding;

use crate::config::Config;

/// Error recorded when at least one process is in a problem state.
pub const PROBLEM_PROCESSES_FOUND: &str = "problematic processes found";

const BRANDING_PREFIX: &str = "Notification generated by ";

/// Runs the plugin check. The runtime metric is attached on every exit path.
pub fn command_check(config: &Config) -> CheckResult {
    let start = Instant::now();

    let mut result = evaluate(config);

    if config.emit_branding.unwrap_or(false) {
        result.branding = Some(branding(BRANDING_PREFIX));
    }
    result.add_perf_data([
        PerformanceData::new("time", start.elapsed().as_millis()).with_uom("ms")
    ]);

    result
}

/// Result used when configuration could not be initialized.
pub fn init_failure(err: impl Display) -> CheckResult {
    let mut result = CheckResult::new();
    result.state = ServiceState::Critical;
    result.service_output = format!(
        "{}: Error initializing application",
        ServiceState::Critical.label()
    );
    result.add_error(err);
    result
}

fn fatal(summary: &str, err: impl Display) -> CheckResult {
    let mut result = CheckResult::new();
    result.state = ServiceState::Critical;
    result.service_output = format!("{}: {}", ServiceState::Critical.label(), summary);
    result.add_error(err);
    result
}

fn evaluate(config: &Config) -> CheckResult {
    let root = config.proc_root();

    debug!(base_path = %root.display(), "Collecting process paths");
    let proc_dirs = match collect_proc_dirs(&root) {
        Ok(dirs) => dirs,
        Err(e) => {
            error!("Failed to evaluate process directories: {}", e);
            return fatal("Failed to evaluate process directories", e);
        }
    };

    let processes = match from_proc_dirs(&root, &proc_dirs) {
        Ok(ps) => ps,
        Err(e) => {
            error!("Failed to obtain list of process values: {}", e);
            return fatal("Failed to process proc status files", e);
        }
    };

    let own_pid = std::process::id() as i32;
    debug!(my_process_id = own_pid, "Excluding process of current tool");
    let processes = processes.exclude_pid(own_pid);

    let mut result = CheckResult::new();
    result.state = processes.service_state();

    if processes.is_ok_state() {
        debug!("No problematic processes detected");
    } else {
        debug!(
            critical_processes = processes.num_critical_state(),
            warning_processes = processes.num_warning_state(),
            ok_processes = processes.num_ok_state(),
            "Problematic processes found"
        );
        result.add_error(PROBLEM_PROCESSES_FOUND);
    }

    result.service_output = one_line_summary(&processes);
    result.long_service_output = check_report(&processes);
    result.add_perf_data(perf_data(&processes));

    result
}
