//! Kernel process state vocabulary.
//!
//! State labels are compared verbatim, including the parenthetical
//! description. The set below covers labels observed on 2.6.32, 3.10, 4.18
//! and 5.14 kernels. Some states have been spelled differently over time
//! ("T (tracing stop)" vs "t (tracing stop)"), so named queries map to one
//! or more raw labels.

// Labels present on every supported kernel.
pub const STATE_RUNNING: &str = "R (running)";
pub const STATE_SLEEPING: &str = "S (sleeping)";
pub const STATE_DISK_SLEEP: &str = "D (disk sleep)";
pub const STATE_STOPPED: &str = "T (stopped)";
pub const STATE_ZOMBIE: &str = "Z (zombie)";
pub const STATE_DEAD: &str = "X (dead)";

// Legacy labels (2.6.32, 3.10).
pub const STATE_LEGACY_TRACING_STOP: &str = "T (tracing stop)";
pub const STATE_LEGACY_DEAD: &str = "x (dead)";
pub const STATE_LEGACY_WAKE_KILL: &str = "K (wakekill)";
pub const STATE_LEGACY_WAKING: &str = "W (waking)";

// Labels used by current kernels (3.10 onward).
pub const STATE_TRACING_STOP: &str = "t (tracing stop)";
pub const STATE_IDLE: &str = "I (idle)";
pub const STATE_PARKED: &str = "P (parked)";

/// Every state label known to this crate.
pub const SUPPORTED_STATES: [&str; 13] = [
    STATE_RUNNING,
    STATE_SLEEPING,
    STATE_DISK_SLEEP,
    STATE_STOPPED,
    STATE_ZOMBIE,
    STATE_DEAD,
    STATE_LEGACY_TRACING_STOP,
    STATE_LEGACY_DEAD,
    STATE_LEGACY_WAKE_KILL,
    STATE_LEGACY_WAKING,
    STATE_TRACING_STOP,
    STATE_IDLE,
    STATE_PARKED,
];

/// Named state query backed by one or more raw kernel labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateQuery {
    Running,
    Sleeping,
    DiskSleep,
    Stopped,
    Zombie,
    Dead,
    TracingStop,
    WakeKill,
    Waking,
    Idle,
    Parked,
}

impl StateQuery {
    /// All queries, in performance data order.
    pub const ALL: [StateQuery; 11] = [
        StateQuery::Running,
        StateQuery::Sleeping,
        StateQuery::DiskSleep,
        StateQuery::Stopped,
        StateQuery::Zombie,
        StateQuery::Dead,
        StateQuery::TracingStop,
        StateQuery::WakeKill,
        StateQuery::Waking,
        StateQuery::Idle,
        StateQuery::Parked,
    ];

    /// Raw kernel labels matched by this query.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            StateQuery::Running => &[STATE_RUNNING],
            StateQuery::Sleeping => &[STATE_SLEEPING],
            StateQuery::DiskSleep => &[STATE_DISK_SLEEP],
            // "T (stopped)" only; tracing stops are their own query.
            StateQuery::Stopped => &[STATE_STOPPED],
            StateQuery::Zombie => &[STATE_ZOMBIE],
            StateQuery::Dead => &[STATE_DEAD, STATE_LEGACY_DEAD],
            StateQuery::TracingStop => &[STATE_TRACING_STOP, STATE_LEGACY_TRACING_STOP],
            StateQuery::WakeKill => &[STATE_LEGACY_WAKE_KILL],
            StateQuery::Waking => &[STATE_LEGACY_WAKING],
            StateQuery::Idle => &[STATE_IDLE],
            StateQuery::Parked => &[STATE_PARKED],
        }
    }

    /// Performance data label for this query's count.
    pub fn metric_label(self) -> &'static str {
        match self {
            StateQuery::Running => "running",
            StateQuery::Sleeping => "sleeping",
            StateQuery::DiskSleep => "uninterruptible_disk_sleep",
            StateQuery::Stopped => "stopped",
            StateQuery::Zombie => "zombie",
            StateQuery::Dead => "dead",
            StateQuery::TracingStop => "tracing_stop",
            StateQuery::WakeKill => "wakekill",
            StateQuery::Waking => "waking",
            StateQuery::Idle => "idle",
            StateQuery::Parked => "parked",
        }
    }

    /// True if `state` is one of this query's labels.
    pub fn matches(self, state: &str) -> bool {
        self.labels().contains(&state)
    }
}
