//! Severity classification of process states.
//!
//! Tier membership is static data. The collection verdict follows a fixed
//! precedence: critical, then warning, then ok, then unknown.

use ahash::AHashSet as HashSet;
use once_cell::sync::Lazy;
use std::fmt;

use crate::process::state::{STATE_DISK_SLEEP, STATE_ZOMBIE};

/// Labels of states that warrant a CRITICAL result.
pub const CRITICAL_STATE_LABELS: &[&str] = &[STATE_DISK_SLEEP];

/// Labels of states that warrant a WARNING result.
pub const WARNING_STATE_LABELS: &[&str] = &[STATE_ZOMBIE];

pub static CRITICAL_STATES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| CRITICAL_STATE_LABELS.iter().copied().collect());

pub static WARNING_STATES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| WARNING_STATE_LABELS.iter().copied().collect());

/// Critical labels followed by warning labels.
pub static PROBLEM_STATES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    CRITICAL_STATE_LABELS
        .iter()
        .chain(WARNING_STATE_LABELS)
        .copied()
        .collect()
});

pub fn is_critical_state(state: &str) -> bool {
    CRITICAL_STATES.contains(state)
}

pub fn is_warning_state(state: &str) -> bool {
    WARNING_STATES.contains(state)
}

/// Unknown labels are ok.
pub fn is_ok_state(state: &str) -> bool {
    !is_critical_state(state) && !is_warning_state(state)
}

/// Plugin service state with its Nagios label and exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    pub fn label(self) -> &'static str {
        match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }

    /// Verdict for a set of per-record tier flags.
    ///
    /// `all_ok` must be true for an empty collection.
    pub fn from_flags(has_critical: bool, has_warning: bool, all_ok: bool) -> Self {
        if has_critical {
            ServiceState::Critical
        } else if has_warning {
            ServiceState::Warning
        } else if all_ok {
            ServiceState::Ok
        } else {
            ServiceState::Unknown
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
