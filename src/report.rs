//! Human-readable and performance data reports for evaluated processes.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io;

use crate::output::{PerformanceData, CHECK_OUTPUT_EOL as EOL};
use crate::process::{Process, Processes, StateQuery};

const RULE_WIDTH: usize = 50;

/// Parent name and pid for display, `("missing", -1)` when unresolved.
pub fn parent_display<'a>(process: &Process, processes: &'a Processes) -> (&'a str, i32) {
    match processes.parent_of(process) {
        Some(parent) => (parent.name.as_str(), parent.pid),
        None => ("missing", -1),
    }
}

/// One-line summary of the evaluation suitable for the service output.
///
/// "evaluated" always counts the whole collection.
pub fn one_line_summary(processes: &Processes) -> String {
    let state = processes.service_state();

    if processes.is_ok_state() {
        return format!(
            "{}: No problematic processes found ({} evaluated)",
            state.label(),
            processes.len()
        );
    }

    let mut items = processes.summary_list();
    items.push(format!("evaluated [{}]", processes.len()));

    format!(
        "{}: {} problematic processes found ({})",
        state.label(),
        processes.problem_processes().len(),
        items.join(", ")
    )
}

fn write_report_header(out: &mut String, processes: &Processes) {
    let _ = write!(out, "Process Summary:{EOL}{EOL}");
    for item in processes.summary_list() {
        let _ = writeln!(out, "  - {item}");
    }
    let _ = write!(out, "{EOL}{EOL}");
}

fn write_report_problem_entries(out: &mut String, processes: &Processes) {
    let problems = processes.problem_processes();

    let _ = write!(out, "{EOL}Problems:{EOL}");

    if problems.is_empty() {
        let _ = write!(out, "{EOL}  - None{EOL}");
        return;
    }

    for p in &problems {
        let (parent_name, parent_pid) = parent_display(p, processes);
        let _ = write!(
            out,
            "  - Name: {:>10} [Parent: {} ({}), State: {}, Pid: {}, PPid: {}, Threads: {}]{EOL}",
            p.name, parent_name, parent_pid, p.state, p.pid, p.ppid, p.threads,
        );
    }
}

/// Multi-line report: state summary, a rule, then every problem process.
pub fn check_report(processes: &Processes) -> String {
    let mut report = String::new();

    write_report_header(&mut report, processes);
    let _ = write!(report, "{}{EOL}{EOL}", "-".repeat(RULE_WIDTH));
    write_report_problem_entries(&mut report, processes);

    report
}

/// Performance data for the problem count and every named state.
///
/// The runtime metric is added by the caller.
pub fn perf_data(processes: &Processes) -> Vec<PerformanceData> {
    let mut pd = Vec::with_capacity(StateQuery::ALL.len() + 1);
    pd.push(PerformanceData::new(
        "problem_processes",
        processes.problem_processes().len(),
    ));
    for query in StateQuery::ALL {
        pd.push(PerformanceData::new(
            query.metric_label(),
            processes.count_of(query),
        ));
    }
    pd
}

// -----------------------------------------------------------------------------
// Inspector listings
// -----------------------------------------------------------------------------

/// Writes one process line. Parents are resolved against `all`.
pub fn write_process_line<W: io::Write>(
    w: &mut W,
    p: &Process,
    all: &Processes,
    include_state: bool,
) -> io::Result<()> {
    let (parent_name, parent_pid) = parent_display(p, all);

    if include_state {
        writeln!(
            w,
            "  - Name: {:>10} [Parent: {} ({}), State: {}, Pid: {}, PPid: {}, VMSwap: {}, Threads: {}]",
            p.name,
            parent_name,
            parent_pid,
            p.state,
            p.pid,
            p.ppid,
            p.vm_swap_display(),
            p.threads,
        )
    } else {
        writeln!(
            w,
            "  - Name: {:>10} [Parent: {} ({}), Pid: {}, PPid: {}, VMSwap: {}, Threads: {}]",
            p.name,
            parent_name,
            parent_pid,
            p.pid,
            p.ppid,
            p.vm_swap_display(),
            p.threads,
        )
    }
}

/// Lists `listed` one per line followed by its state summary.
pub fn write_process_listing<W: io::Write>(
    w: &mut W,
    listed: &Processes,
    all: &Processes,
) -> io::Result<()> {
    if listed.is_empty() {
        return write!(w, "\n  - None\n");
    }

    for p in listed {
        write_process_line(w, p, all, true)?;
    }

    write!(w, "\nSummary:\n\n")?;
    for item in listed.summary_list() {
        writeln!(w, "  - {item}")?;
    }
    writeln!(w)
}

/// Summarizes the processes of `all` not in `evaluated`, optionally with a
/// per-state listing of each of them.
pub fn write_other_processes<W: io::Write>(
    w: &mut W,
    evaluated: &Processes,
    all: &Processes,
    include_details: bool,
) -> io::Result<()> {
    let remaining = all.exclude(evaluated);
    if remaining.is_empty() {
        return Ok(());
    }

    write!(w, "\nSUMMARY:\n\n")?;
    for item in remaining.summary_list() {
        writeln!(w, "  - {item}")?;
    }
    writeln!(w)?;

    if !include_details {
        return Ok(());
    }

    write!(w, "\n{}\n\n", "-".repeat(RULE_WIDTH))?;
    write!(w, "\nDETAILS:\n")?;

    let mut by_state: BTreeMap<&str, Vec<&Process>> = BTreeMap::new();
    for p in &remaining {
        by_state.entry(p.state.as_str()).or_default().push(p);
    }

    for (state, ps) in by_state {
        write!(w, "\n{state}\n")?;
        for p in ps {
            write_process_line(w, p, all, false)?;
        }
    }

    Ok(())
}
