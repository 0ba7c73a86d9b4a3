//! Process scanning utilities for discovering and reading process entries from /proc.
//!
//! Discovery lists the numerically named directories below a proc root;
//! assembly reads each one's status record into a [`Processes`] collection.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use crate::process::collection::Processes;
use crate::process::error::ProcessError;
use crate::process::status::{read_status_file, STATUS_FILENAME};

/// Default mount point of the proc filesystem.
pub const PROC_ROOT_DIR: &str = "/proc";

static PROC_DIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("process directory pattern compiles"));

/// True if `name` looks like a process directory name.
pub fn is_proc_dir_name(name: &str) -> bool {
    PROC_DIR_RE.is_match(name)
}

/// Lists the names of process directories directly below `root`.
///
/// Files, non-numeric directories and entries whose type cannot be read are
/// skipped. An unlistable root is an error; a root without process
/// directories is not.
pub fn collect_proc_dirs(root: &Path) -> Result<Vec<String>, ProcessError> {
    let entries = fs::read_dir(root).map_err(|source| ProcessError::Discovery {
        path: root.to_path_buf(),
        source,
    })?;

    let mut out = Vec::new();
    for entry in entries.flatten() {
        let name = match entry.file_name().into_string() {
            Ok(v) => v,
            Err(_) => continue,
        };
        if !is_proc_dir_name(&name) {
            continue;
        }
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => out.push(name),
            Ok(_) => continue,
            Err(e) => {
                trace!("Skipping {}: {}", entry.path().display(), e);
                continue;
            }
        }
    }

    debug!(
        base_path = %root.display(),
        process_paths = out.len(),
        "Collected process paths"
    );
    Ok(out)
}

/// Reads the status record of every listed process directory.
///
/// Processes that exit between discovery and read are skipped. Any other
/// failure aborts the whole assembly.
pub fn from_proc_dirs(root: &Path, proc_dirs: &[String]) -> Result<Processes, ProcessError> {
    let mut processes = Processes::with_capacity(proc_dirs.len());

    for proc_dir in proc_dirs {
        let path = root.join(proc_dir).join(STATUS_FILENAME);
        match read_status_file(&path) {
            Ok(p) => processes.push(p),
            Err(e) if e.is_not_found() => {
                debug!("Process {} exited before its status was read", proc_dir);
                continue;
            }
            Err(e) => return Err(e),
        }
    }

    debug!(processes = processes.len(), "Collected info on processes");
    Ok(processes)
}

/// Discovers and reads all processes below `root`.
pub fn scan(root: &Path) -> Result<Processes, ProcessError> {
    let proc_dirs = collect_proc_dirs(root)?;
    from_proc_dirs(root, &proc_dirs)
}
