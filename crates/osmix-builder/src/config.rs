//! On-disk builder configuration model for a mix workspace.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name of the builder configuration file inside a mix workspace.
pub const DEFAULT_CONFIG_FILE: &str = "builder.yaml";

/// Default upstream content URL offered by `osmix init`.
pub const DEFAULT_UPSTREAM_URL: &str = "https://download.osmix.org";

/// Bundles included in every new mix.
pub const DEFAULT_BUNDLES: &[&str] = &[
    "bootloader",
    "kernel-native",
    "os-core",
    "os-core-update",
];

/// Builder configuration loaded from [`DEFAULT_CONFIG_FILE`].
///
/// Relative paths are resolved against the workspace root. Missing keys
/// fall back to the defaults, so a partial file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Directory holding the bundle definitions for the mix.
    pub bundle_dir: PathBuf,
    /// Directory holding update-server state between builds.
    pub state_dir: PathBuf,
    /// Directory holding per-version mix metadata.
    pub versions_dir: PathBuf,
    /// Local RPM repository consumed by the compose step.
    pub repo_dir: PathBuf,
    /// Directory scanned for RPMs by `add-rpms`; unset disables local RPM import.
    pub rpm_dir: Option<PathBuf>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            bundle_dir: PathBuf::from("mix-bundles"),
            state_dir: PathBuf::from("update"),
            versions_dir: PathBuf::from("versions"),
            repo_dir: PathBuf::from("local-yum"),
            rpm_dir: None,
        }
    }
}
