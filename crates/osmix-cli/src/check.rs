//! Global inventory of every external program used by any command.
//!
//! `osmix --check` prints one line per tool with a present/absent marker,
//! columns aligned to the longest name, and maps the overall result to the
//! process exit status.

use std::fmt::Write as _;
use std::process::ExitCode;

use crate::deps::DependencyRegistry;

/// Resolution status of a single external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    /// Program name as declared.
    pub name: String,
    /// Whether the program resolves in the search path.
    pub found: bool,
}

/// Probes every declared program, deduplicated and sorted lexicographically.
#[must_use]
pub fn inventory(registry: &DependencyRegistry) -> Vec<ToolStatus> {
    registry
        .resolve_all()
        .into_iter()
        .map(|name| {
            let found = which::which(&name).is_ok();
            ToolStatus { name, found }
        })
        .collect()
}

/// Renders the inventory as a table, columns aligned to the longest name.
#[must_use]
pub fn render(rows: &[ToolStatus]) -> String {
    let width = rows.iter().map(|row| row.name.len()).max().unwrap_or(0);
    let mut out = String::from("Programs used by osmix commands:\n");
    for row in rows {
        let marker = if row.found { "ok" } else { "not found" };
        let _ = writeln!(out, "  {:<width$} {marker}", row.name);
    }
    out
}

/// Runs the global check and maps the overall result to an exit status.
pub fn run(registry: &DependencyRegistry) -> ExitCode {
    let rows = inventory(registry);
    print!("{}", render(&rows));
    if rows.iter().all(|row| row.found) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
