//! Ordered process collections and the queries run against them.

use ahash::AHashSet as HashSet;
use std::collections::BTreeMap;

use crate::process::classifier::{ServiceState, PROBLEM_STATES};
use crate::process::state::StateQuery;
use crate::process::status::Process;

/// Processes in discovery order.
///
/// Every filtering query returns a newly allocated collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Processes {
    items: Vec<Process>,
}

impl Processes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, process: Process) {
        self.items.push(process);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Process] {
        &self.items
    }

    /// Parent of `process` within this collection, if present.
    pub fn parent_of(&self, process: &Process) -> Option<&Process> {
        self.items.iter().find(|p| p.pid == process.ppid)
    }

    /// Processes whose pid does not appear in `exclude`.
    pub fn exclude(&self, exclude: &Processes) -> Processes {
        let excluded: HashSet<i32> = exclude.iter().map(|p| p.pid).collect();
        self.items
            .iter()
            .filter(|p| !excluded.contains(&p.pid))
            .cloned()
            .collect()
    }

    /// Drops every record with the given pid, normally the checking tool itself.
    pub fn exclude_pid(&self, pid: i32) -> Processes {
        self.items.iter().filter(|p| p.pid != pid).cloned().collect()
    }

    pub fn count_by_state(&self, state: &str) -> usize {
        self.items.iter().filter(|p| p.state == state).count()
    }

    /// Processes in exactly `state`.
    pub fn state(&self, state: &str) -> Processes {
        self.filter_by_states(&[state])
    }

    /// Processes in any of `states`, grouped in the order the states are given.
    ///
    /// An empty state list selects nothing.
    pub fn filter_by_states(&self, states: &[&str]) -> Processes {
        let mut out = Processes::new();
        for state in states {
            out.items
                .extend(self.items.iter().filter(|p| p.state == *state).cloned());
        }
        out
    }

    pub fn processes_in(&self, query: StateQuery) -> Processes {
        self.filter_by_states(query.labels())
    }

    pub fn count_of(&self, query: StateQuery) -> usize {
        query
            .labels()
            .iter()
            .map(|label| self.count_by_state(label))
            .sum()
    }

    /// Processes in a critical or warning state, critical ones first.
    pub fn problem_processes(&self) -> Processes {
        self.filter_by_states(&PROBLEM_STATES)
    }

    /// `"<state> [<count>]"` entries sorted by state label.
    pub fn summary_list(&self) -> Vec<String> {
        let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
        for p in &self.items {
            *tally.entry(p.state.as_str()).or_default() += 1;
        }

        tally
            .into_iter()
            .map(|(state, count)| format!("{state} [{count}]"))
            .collect()
    }

    pub fn summary_one_line(&self) -> String {
        self.summary_list().join(", ")
    }

    // -------------------------------------------------------------------------
    // Severity
    // -------------------------------------------------------------------------

    /// True when every process is ok, including when there are none.
    pub fn is_ok_state(&self) -> bool {
        self.items.iter().all(Process::is_ok_state)
    }

    pub fn has_critical_state(&self) -> bool {
        self.items.iter().any(Process::is_critical_state)
    }

    pub fn has_warning_state(&self) -> bool {
        self.items.iter().any(Process::is_warning_state)
    }

    pub fn num_ok_state(&self) -> usize {
        self.items.iter().filter(|p| p.is_ok_state()).count()
    }

    pub fn num_critical_state(&self) -> usize {
        self.items.iter().filter(|p| p.is_critical_state()).count()
    }

    pub fn num_warning_state(&self) -> usize {
        self.items.iter().filter(|p| p.is_warning_state()).count()
    }

    pub fn service_state(&self) -> ServiceState {
        ServiceState::from_flags(
            self.has_critical_state(),
            self.has_warning_state(),
            self.is_ok_state(),
        )
    }
}

impl FromIterator<Process> for Processes {
    fn from_iter<I: IntoIterator<Item = Process>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Process>> for Processes {
    fn from(items: Vec<Process>) -> Self {
        Self { items }
    }
}

impl IntoIterator for Processes {
    type Item = Process;
    type IntoIter = std::vec::IntoIter<Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Processes {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
