//! Integration tests for command dispatch and dependency gating.
//!
//! These tests are implemented in:
//! `crates/osmix-cli/src/guard.rs`, `crates/osmix-cli/src/deps.rs`, and
//! `crates/osmix-cli/src/check.rs`
//!
//! Covered scenarios:
//! - `absent_tool_blocks_the_action`: Missing program aborts before the body runs
//! - `absent_ancestor_tool_blocks_the_leaf`: Ancestor declarations gate leaves
//! - `chain_is_independent_of_declaration_order`: Chain closure is order-free
//! - `duplicates_across_the_chain_appear_once`: Set semantics end to end
//! - `render_aligns_columns_to_the_widest_name`: `--check` table formatting
//! - `capture_is_finalized_on_finish_and_on_drop`: Profiling teardown on all paths

#[test]
fn dispatch_gates_commands_on_declared_tools() {
    // Verify init/add-rpms declarations through CommandSet::build
}

#[test]
fn global_check_reports_every_declared_tool() {
    // Verify --check inventory covers the union across commands
}
