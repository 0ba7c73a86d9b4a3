//! List command implementation.
//!
//! Prints problematic processes with their parents, then summarizes (and
//! optionally lists) every remaining process.

use anyhow::Context;
use std::io::{self, Write};
use tracing::debug;

use check_process::process::{scan, Processes};
use check_process::report::{write_other_processes, write_process_listing};

use crate::config::Config;

/// Lists problematic processes found under the configured proc root.
pub fn command_list(show_all: bool, config: &Config) -> anyhow::Result<()> {
    let root = config.proc_root();
    let show_all = show_all || config.show_all.unwrap_or(false);

    let processes = scan(&root)
        .with_context(|| format!("failed to evaluate processes under {}", root.display()))?;
    debug!(
        processes = processes.len(),
        show_all, "Evaluated processes for listing"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_list(&mut out, &processes, show_all)?;
    out.flush()?;

    Ok(())
}

/// Writes the listing for an already assembled collection.
pub fn render_list<W: Write>(w: &mut W, processes: &Processes, show_all: bool) -> io::Result<()> {
    let problems = processes.problem_processes();

    writeln!(w, "Problematic processes:")?;
    write_process_listing(w, &problems, processes)?;
    write_other_processes(w, &problems, processes, show_all)
}
