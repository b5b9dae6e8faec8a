//! # osmix-builder
//!
//! Compose/build engine behind the `osmix` CLI.
//!
//! Handles:
//! - **Config**: On-disk builder configuration for a mix workspace.
//! - **Builder**: Workspace lifecycle — default config creation, config
//!   loading, mix initialization, and local RPM repository import.
//!
//! The CLI consumes this crate through a narrow surface: [`Builder`], the
//! [`VERSION`] string, and the process-wide [`set_new_updater`] toggle.

pub mod builder;
pub mod config;
pub mod error;

pub use builder::Builder;
pub use config::BuilderConfig;
pub use error::{BuilderError, Result};

use std::sync::atomic::{AtomicBool, Ordering};

/// Version string reported by the CLI version query.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static NEW_UPDATER: AtomicBool = AtomicBool::new(false);

/// Enables or disables the experimental update-publisher implementation.
///
/// Set once by the CLI before dispatch; read by the compose step.
pub fn set_new_updater(enabled: bool) {
    NEW_UPDATER.store(enabled, Ordering::Relaxed);
}

/// Returns whether the experimental update-publisher implementation is enabled.
#[must_use]
pub fn new_updater() -> bool {
    NEW_UPDATER.load(Ordering::Relaxed)
}
