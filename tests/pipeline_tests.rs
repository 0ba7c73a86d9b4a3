//! Integration tests for the discovery, parsing and reporting pipeline.
//!
//! These tests build a fake proc filesystem in a temporary directory and run
//! it through the public library API the plugin uses.

use std::fs;
use std::path::Path;

use check_process::output::CheckResult;
use check_process::process::{collect_proc_dirs, from_proc_dirs, scan, ServiceState};
use check_process::report::{check_report, one_line_summary, perf_data};

fn write_status(root: &Path, pid: i32, ppid: i32, name: &str, state: &str) {
    let dir = root.join(pid.to_string());
    fs::create_dir_all(&dir).expect("create proc dir");
    let status = format!(
        "Name:\t{name}\nUmask:\t0022\nState:\t{state}\nTgid:\t{pid}\nNgid:\t0\nPid:\t{pid}\nPPid:\t{ppid}\nTracerPid:\t0\nThreads:\t1\nVmSwap:\t       0 kB\n"
    );
    fs::write(dir.join("status"), status).expect("write status");
}

/// Fake proc root holding init plus one disk sleep and one zombie child.
fn mixed_proc_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write_status(dir.path(), 1, 0, "init", "R (running)");
    write_status(dir.path(), 2, 1, "flush-253:0", "D (disk sleep)");
    write_status(dir.path(), 3, 1, "defunct", "Z (zombie)");
    dir
}

#[test]
fn test_mixed_states_report_critical() {
    let root = mixed_proc_root();
    let processes = scan(root.path()).expect("scan");

    assert_eq!(processes.len(), 3);
    assert_eq!(processes.service_state(), ServiceState::Critical);
    assert_eq!(processes.service_state().exit_code(), 2);

    let problems = processes.problem_processes();
    let pids: Vec<i32> = problems.iter().map(|p| p.pid).collect();
    assert_eq!(pids, vec![2, 3]);

    let report = check_report(&processes);
    assert!(report.contains(
        "Name: flush-253:0 [Parent: init (1), State: D (disk sleep), Pid: 2, PPid: 1, Threads: 1]"
    ));
    assert!(report.contains(
        "Name:    defunct [Parent: init (1), State: Z (zombie), Pid: 3, PPid: 1, Threads: 1]"
    ));
    assert!(!report.contains("Name:       init"));
}

#[test]
fn test_mixed_states_summary_and_perf_data() {
    let root = mixed_proc_root();
    let processes = scan(root.path()).expect("scan");

    assert_eq!(
        one_line_summary(&processes),
        "CRITICAL: 2 problematic processes found (D (disk sleep) [1], R (running) [1], Z (zombie) [1], evaluated [3])"
    );

    let mut result = CheckResult::new();
    result.state = processes.service_state();
    result.service_output = one_line_summary(&processes);
    result.add_perf_data(perf_data(&processes));

    let rendered = result.render();
    assert!(rendered.contains(" | 'problem_processes'=2;;;; 'running'=1;;;;"));
    assert!(rendered.contains("'uninterruptible_disk_sleep'=1;;;;"));
    assert!(rendered.contains("'zombie'=1;;;;"));
    assert!(rendered.ends_with('\n'));
}

#[test]
fn test_only_zombies_report_warning() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_status(dir.path(), 1, 0, "init", "S (sleeping)");
    write_status(dir.path(), 7, 1, "defunct", "Z (zombie)");

    let processes = scan(dir.path()).expect("scan");
    assert_eq!(processes.service_state(), ServiceState::Warning);
    assert_eq!(processes.num_warning_state(), 1);
    assert_eq!(processes.num_critical_state(), 0);
}

#[test]
fn test_discovery_ignores_non_pid_entries() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_status(dir.path(), 10, 1, "worker", "S (sleeping)");
    fs::create_dir(dir.path().join("sys")).expect("dir");
    fs::create_dir(dir.path().join("12abc")).expect("dir");
    fs::write(dir.path().join("42"), "not a directory").expect("file");

    let dirs = collect_proc_dirs(dir.path()).expect("collect");
    assert_eq!(dirs, vec!["10".to_string()]);
}

#[test]
fn test_vanished_process_is_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_status(dir.path(), 1, 0, "init", "S (sleeping)");

    let dirs = vec!["1".to_string(), "99".to_string()];
    let processes = from_proc_dirs(dir.path(), &dirs).expect("assemble");
    assert_eq!(processes.len(), 1);
    assert_eq!(processes.as_slice()[0].name, "init");
}

#[test]
fn test_truncated_record_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_status(dir.path(), 1, 0, "init", "S (sleeping)");
    let bad = dir.path().join("5");
    fs::create_dir(&bad).expect("dir");
    fs::write(bad.join("status"), "Name:\tx\nState:\tR (running)\n").expect("write");

    let err = scan(dir.path()).expect_err("truncated record must fail");
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("minimum entries not present"));
}

#[test]
fn test_empty_proc_root_is_ok() {
    let dir = tempfile::tempdir().expect("tempdir");
    let processes = scan(dir.path()).expect("scan");
    assert!(processes.is_empty());
    assert_eq!(processes.service_state(), ServiceState::Ok);
    assert_eq!(
        one_line_summary(&processes),
        "OK: No problematic processes found (0 evaluated)"
    );
}
