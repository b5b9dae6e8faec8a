//! Integration tests for the mix workspace lifecycle.
//!
//! These tests are implemented in:
//! `crates/osmix-builder/src/builder.rs`
//!
//! Covered scenarios:
//! - `default_config_round_trip`: Create, load, and read the default config
//! - `init_mix_records_versions_and_bundles`: Version and bundle metadata on disk
//! - `stage_rpms_imports_only_rpm_files`: Non-RPM entries are skipped
//! - `add_rpm_list_without_rpms_skips_repo_tools`: No tool invocation on empty input
