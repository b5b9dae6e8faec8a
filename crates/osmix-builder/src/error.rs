//! Error types for the compose/build engine.
//!
//! The CLI forwards these opaquely; nothing at that layer inspects or
//! retries a builder failure.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the compose/build engine.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the operation failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file does not exist.
    #[error("builder configuration not found: {0}")]
    ConfigNotFound(PathBuf),

    /// `read_conf` was called before a configuration was loaded.
    #[error("builder configuration has not been loaded")]
    ConfigNotLoaded,

    /// The configuration file could not be parsed or rendered.
    #[error("invalid builder configuration {path}: {source}")]
    Config {
        /// Configuration file that failed to parse.
        path: PathBuf,
        /// Underlying serialization error.
        source: serde_yaml::Error,
    },

    /// A wrapped external program exited unsuccessfully.
    #[error("{program} failed with {status}")]
    External {
        /// Program that failed.
        program: String,
        /// Exit status reported by the program.
        status: std::process::ExitStatus,
    },

    /// A wrapped external program could not be started.
    #[error("could not run {program}: {source}")]
    Spawn {
        /// Program that could not be started.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BuilderError>;
