//! Parsing of /proc/<pid>/status records.
//!
//! A record is parsed in two stages: the raw `key: value` lines become a
//! [`Properties`] map, then the fields needed for evaluation are projected
//! into a typed [`Process`].

use ahash::AHashMap as HashMap;
use std::fs;
use std::path::Path;

use crate::process::classifier;
use crate::process::error::{ProcessError, StatusError};

/// File name of the per-process status record.
pub const STATUS_FILENAME: &str = "status";

// Lowercased status keys backing the typed process fields.
pub const FIELD_NAME: &str = "name";
pub const FIELD_STATE: &str = "state";
pub const FIELD_PID: &str = "pid";
pub const FIELD_PPID: &str = "ppid";
pub const FIELD_THREADS: &str = "threads";
pub const FIELD_VMSWAP: &str = "vmswap";

/// Name, State, Pid, PPid, Threads, VMSwap
const REQUIRED_PROPERTIES_COUNT: usize = 6;

/// All key/value pairs of a status record. Keys are lowercased, values keep
/// their original casing.
pub type Properties = HashMap<String, String>;

/// One process as described by its status record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub name: String,
    /// Raw kernel state label, e.g. "D (disk sleep)".
    pub state: String,
    pub pid: i32,
    pub ppid: i32,
    pub threads: u32,
    /// Only reported by the kernel for processes using swap.
    pub vm_swap: Option<String>,
    pub properties: Properties,
}

impl Process {
    /// Projects the typed fields out of a parsed property map.
    pub fn from_properties(properties: Properties) -> Result<Self, StatusError> {
        if properties.len() < REQUIRED_PROPERTIES_COUNT {
            return Err(StatusError::InsufficientProperties {
                found: properties.len(),
                required: REQUIRED_PROPERTIES_COUNT,
            });
        }

        let name = required(&properties, FIELD_NAME)?.to_string();
        let state = required(&properties, FIELD_STATE)?.to_string();
        let pid = required_number(&properties, FIELD_PID)?;
        let ppid = required_number(&properties, FIELD_PPID)?;
        let threads = required_number(&properties, FIELD_THREADS)?;
        let vm_swap = properties.get(FIELD_VMSWAP).cloned();

        Ok(Self {
            name,
            state,
            pid,
            ppid,
            threads,
            vm_swap,
            properties,
        })
    }

    /// VMSwap value for display, empty when the kernel did not report one.
    pub fn vm_swap_display(&self) -> &str {
        self.vm_swap.as_deref().unwrap_or("")
    }

    /// True if the state is in neither the critical nor the warning table.
    pub fn is_ok_state(&self) -> bool {
        classifier::is_ok_state(&self.state)
    }

    pub fn is_warning_state(&self) -> bool {
        classifier::is_warning_state(&self.state)
    }

    pub fn is_critical_state(&self) -> bool {
        classifier::is_critical_state(&self.state)
    }
}

fn required<'a>(properties: &'a Properties, field: &'static str) -> Result<&'a str, StatusError> {
    properties
        .get(field)
        .map(String::as_str)
        .ok_or(StatusError::MissingField { field })
}

fn required_number<T: std::str::FromStr>(
    properties: &Properties,
    field: &'static str,
) -> Result<T, StatusError> {
    let raw = required(properties, field)?;
    raw.parse().map_err(|_| StatusError::InvalidValue {
        field,
        value: raw.to_string(),
    })
}

/// Splits status record text into a property map.
///
/// Only the first colon delimits key and value: process names such as
/// `flush-253:0` contain colons of their own. A line without a colon is kept
/// as a key with an empty value. Later duplicates overwrite earlier ones.
pub fn parse_properties(input: &str) -> Properties {
    let mut properties = Properties::new();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (key, value) = match line.split_once(':') {
            Some((k, v)) => (k, v.trim()),
            None => (line, ""),
        };

        properties.insert(key.trim().to_lowercase(), value.to_string());
    }

    properties
}

/// Parses raw status record bytes into a [`Process`].
pub fn parse_status(data: &[u8]) -> Result<Process, StatusError> {
    let text = String::from_utf8_lossy(data);
    Process::from_properties(parse_properties(&text))
}

/// Reads and parses a status file.
pub fn read_status_file(path: &Path) -> Result<Process, ProcessError> {
    let data = fs::read(path).map_err(|source| ProcessError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_status(&data).map_err(|source| ProcessError::Status {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_STATUS: &str = "Name:\tkworker/u8:2-events_unbound\n\
Umask:\t0000\n\
State:\tI (idle)\n\
Tgid:\t4242\n\
Ngid:\t0\n\
Pid:\t4242\n\
PPid:\t2\n\
TracerPid:\t0\n\
Uid:\t0\t0\t0\t0\n\
Threads:\t1\n\
SigQ:\t0/62863\n";

    fn props(pairs: &[(&str, &str)]) -> Properties {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Tests for parse_properties
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_properties_lowercases_keys_and_trims_values() {
        let p = parse_properties("  VmSwap:\t   128 kB  \nName:\tBash\n");
        assert_eq!(p.get("vmswap").map(String::as_str), Some("128 kB"));
        assert_eq!(p.get("name").map(String::as_str), Some("Bash"));
    }

    #[test]
    fn test_parse_properties_splits_on_first_colon_only() {
        let p = parse_properties("Name:\tflush-253:0\n");
        assert_eq!(p.get("name").map(String::as_str), Some("flush-253:0"));
    }

    #[test]
    fn test_parse_properties_keeps_key_without_colon() {
        let p = parse_properties("Orphan\n");
        assert_eq!(p.get("orphan").map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_properties_skips_blank_lines_and_last_duplicate_wins() {
        let p = parse_properties("\n   \nState: S (sleeping)\n\t\nstate: R (running)\n");
        assert_eq!(p.len(), 1);
        assert_eq!(p.get("state").map(String::as_str), Some("R (running)"));
    }

    // -------------------------------------------------------------------------
    // Tests for Process::from_properties
    // -------------------------------------------------------------------------

    #[test]
    fn test_from_properties_rejects_small_maps_before_lookup() {
        let err = Process::from_properties(props(&[("name", "a"), ("state", "R (running)")]))
            .unwrap_err();
        assert_eq!(
            err,
            StatusError::InsufficientProperties {
                found: 2,
                required: 6
            }
        );
    }

    #[test]
    fn test_from_properties_missing_state() {
        let err = Process::from_properties(props(&[
            ("name", "sshd"),
            ("pid", "10"),
            ("ppid", "1"),
            ("threads", "1"),
            ("umask", "0022"),
            ("tgid", "10"),
        ]))
        .unwrap_err();
        assert_eq!(err, StatusError::MissingField { field: "state" });
    }

    #[test]
    fn test_from_properties_non_numeric_pid() {
        let err = Process::from_properties(props(&[
            ("name", "sshd"),
            ("state", "S (sleeping)"),
            ("pid", "ten"),
            ("ppid", "1"),
            ("threads", "1"),
            ("umask", "0022"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            StatusError::InvalidValue {
                field: "pid",
                value: "ten".to_string()
            }
        );
    }

    #[test]
    fn test_from_properties_swap_is_optional() {
        let process = Process::from_properties(props(&[
            ("name", "sshd"),
            ("state", "S (sleeping)"),
            ("pid", "10"),
            ("ppid", "1"),
            ("threads", "3"),
            ("umask", "0022"),
        ]))
        .expect("valid properties");
        assert_eq!(process.vm_swap, None);
        assert_eq!(process.vm_swap_display(), "");
        assert_eq!(process.threads, 3);
    }

    // -------------------------------------------------------------------------
    // Tests for parse_status
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_status_sample() {
        let process = parse_status(SAMPLE_STATUS.as_bytes()).expect("sample parses");
        assert_eq!(process.name, "kworker/u8:2-events_unbound");
        assert_eq!(process.state, "I (idle)");
        assert_eq!(process.pid, 4242);
        assert_eq!(process.ppid, 2);
        assert_eq!(process.threads, 1);
        assert_eq!(
            process.properties.get("uid").map(String::as_str),
            Some("0\t0\t0\t0")
        );
    }

    #[test]
    fn test_parse_status_is_deterministic() {
        let a = parse_status(SAMPLE_STATUS.as_bytes()).expect("sample parses");
        let b = parse_status(SAMPLE_STATUS.as_bytes()).expect("sample parses");
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_status_tolerates_invalid_utf8_in_name() {
        let mut data = b"Name:\tbad\xffname\n".to_vec();
        data.extend_from_slice(b"State:\tS (sleeping)\nPid:\t5\nPPid:\t1\nThreads:\t1\nUmask:\t0022\n");
        let process = parse_status(&data).expect("lossy decode");
        assert!(process.name.starts_with("bad"));
        assert_eq!(process.pid, 5);
    }

    #[test]
    fn test_read_status_file_missing_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_status_file(&dir.path().join("status")).unwrap_err();
        assert!(err.is_not_found());
    }
}
