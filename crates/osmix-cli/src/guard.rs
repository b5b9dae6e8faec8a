//! Pre-execution gate on external-program dependencies.
//!
//! Every command action goes through [`run`], which resolves the command's
//! ancestor-chain dependency closure first. The `--version` and `--check`
//! queries are answered before this gate so they work even when tools are
//! missing.

use crate::deps::{self, DependencyRegistry, MissingTools};
use crate::tree::{CommandId, CommandTree};

/// Verifies the dependency closure of `command`, then runs `action`.
///
/// The action is never invoked when any required program is unresolved.
///
/// # Errors
///
/// Returns [`MissingTools`] listing every unresolved program, or the
/// action's own error.
pub fn run<T>(
    tree: &CommandTree,
    registry: &DependencyRegistry,
    command: CommandId,
    action: impl FnOnce() -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let required = registry.resolve_chain(tree, command);
    tracing::debug!(
        command = %tree.path(command),
        required = ?required,
        "verifying external programs"
    );
    let missing = deps::verify(required.iter().map(String::as_str));
    if !missing.is_empty() {
        return Err(MissingTools { missing }.into());
    }
    action()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn single_command() -> (CommandTree, CommandId) {
        let mut tree = CommandTree::new("osmix");
        let leaf = tree.register(tree.root(), "leaf");
        (tree, leaf)
    }

    #[test]
    fn absent_tool_blocks_the_action() {
        let (tree, leaf) = single_command();
        let mut registry = DependencyRegistry::default();
        registry.declare(leaf, ["osmix-test-absent-tool"]);

        let ran = Cell::new(false);
        let result = run(&tree, &registry, leaf, || {
            ran.set(true);
            Ok(())
        });

        let err = result.expect_err("missing tool should block execution");
        let missing = err
            .downcast_ref::<MissingTools>()
            .expect("should be MissingTools");
        assert_eq!(missing.missing, vec!["osmix-test-absent-tool".to_string()]);
        assert!(!ran.get(), "action must not run");
    }

    #[test]
    fn absent_ancestor_tool_blocks_the_leaf() {
        let (tree, leaf) = single_command();
        let mut registry = DependencyRegistry::default();
        registry.declare(tree.root(), ["osmix-test-absent-tool"]);

        let ran = Cell::new(false);
        let result = run(&tree, &registry, leaf, || {
            ran.set(true);
            Ok(())
        });

        assert!(result.is_err());
        assert!(!ran.get());
    }

    #[test]
    fn command_without_dependencies_runs_normally() {
        let (tree, leaf) = single_command();
        let registry = DependencyRegistry::default();

        let ran = Cell::new(false);
        run(&tree, &registry, leaf, || {
            ran.set(true);
            Ok(())
        })
        .expect("should run");
        assert!(ran.get());
    }

    #[test]
    fn present_tools_pass_the_gate() {
        let (tree, leaf) = single_command();
        let mut registry = DependencyRegistry::default();
        registry.declare(leaf, ["sh"]);

        let value = run(&tree, &registry, leaf, || Ok(7)).expect("should run");
        assert_eq!(value, 7);
    }

    #[test]
    fn missing_names_are_sorted_and_complete() {
        let (tree, leaf) = single_command();
        let mut registry = DependencyRegistry::default();
        registry.declare(tree.root(), ["osmix-test-zz-tool"]);
        registry.declare(leaf, ["osmix-test-aa-tool", "sh"]);

        let err = run(&tree, &registry, leaf, || Ok(())).expect_err("should fail");
        let missing = err
            .downcast_ref::<MissingTools>()
            .expect("should be MissingTools");
        assert_eq!(
            missing.missing,
            vec![
                "osmix-test-aa-tool".to_string(),
                "osmix-test-zz-tool".to_string(),
            ]
        );
        assert_eq!(
            missing.to_string(),
            "missing required external programs: osmix-test-aa-tool, osmix-test-zz-tool"
        );
    }

    #[test]
    fn action_errors_pass_through_unchanged() {
        let (tree, leaf) = single_command();
        let registry = DependencyRegistry::default();

        let err = run(&tree, &registry, leaf, || {
            Err::<(), _>(anyhow::anyhow!("delegated failure"))
        })
        .expect_err("should forward");
        assert_eq!(err.to_string(), "delegated failure");
    }
}
