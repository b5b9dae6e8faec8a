//! External-program dependency declarations and resolution.
//!
//! Each command may declare executables it needs at runtime. Before a
//! command runs, the union of declarations along its ancestor chain is
//! resolved against the search path; the global inventory mode reports the
//! union across every command instead.

use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

use crate::tree::{CommandId, CommandTree};

/// One or more required external programs could not be resolved.
#[derive(Debug, Error)]
#[error("missing required external programs: {}", .missing.join(", "))]
pub struct MissingTools {
    /// Names of the unresolved programs, sorted.
    pub missing: Vec<String>,
}

/// Per-command declarations of required external programs.
///
/// Built once alongside the [`CommandTree`] and read-only afterwards.
#[derive(Debug, Default)]
pub struct DependencyRegistry {
    declared: HashMap<CommandId, BTreeSet<String>>,
}

impl DependencyRegistry {
    /// Declares external programs for `command`; repeated calls union the set.
    pub fn declare<I, S>(&mut self, command: CommandId, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared
            .entry(command)
            .or_default()
            .extend(names.into_iter().map(Into::into));
    }

    /// Returns the deduplicated dependency union along the ancestor chain
    /// of `command`, root included.
    #[must_use]
    pub fn resolve_chain(&self, tree: &CommandTree, command: CommandId) -> BTreeSet<String> {
        tree.ancestry(command)
            .filter_map(|id| self.declared.get(&id))
            .flatten()
            .cloned()
            .collect()
    }

    /// Returns the deduplicated dependency union across every registered
    /// command, independent of ancestry.
    #[must_use]
    pub fn resolve_all(&self) -> BTreeSet<String> {
        self.declared.values().flatten().cloned().collect()
    }
}

/// Returns the subset of `names` that does not resolve in the search path.
///
/// Resolution is checked on demand and never cached, so the result always
/// reflects the current environment.
pub fn verify<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .filter(|name| which::which(name).is_err())
        .map(ToString::to_string)
        .collect()
}
