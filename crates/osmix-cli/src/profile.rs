//! Scoped CPU profiling for a single invocation.
//!
//! A session is started only when a destination is configured and is
//! finished exactly once: explicitly on the success path, via `Drop`
//! everywhere else. No exit path leaves a truncated capture.

use std::fs::File;
use std::path::PathBuf;

use pprof::ProfilerGuard;
use thiserror::Error;

/// Failures while capturing or writing a CPU profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The destination file could not be created.
    #[error("could not create profile output {path}: {source}")]
    Create {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The sampling profiler could not be started or read back.
    #[error("profiler error for {path}: {source}")]
    Profiler {
        /// Destination path.
        path: PathBuf,
        /// Underlying profiler error.
        source: pprof::Error,
    },
}

/// A live CPU-profiling capture; at most one exists per process run (the
/// underlying sampler is a process singleton and a second start fails).
pub struct ProfileSession {
    inner: Option<(ProfilerGuard<'static>, File)>,
    path: PathBuf,
}

impl std::fmt::Debug for ProfileSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileSession")
            .field("active", &self.inner.is_some())
            .field("path", &self.path)
            .finish()
    }
}

impl ProfileSession {
    /// Starts profiling. The output file is created eagerly so an
    /// unwritable destination fails before any work happens.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or the profiler is
    /// already running.
    pub fn start(path: PathBuf) -> Result<Self, ProfileError> {
        let file = File::create(&path).map_err(|source| ProfileError::Create {
            path: path.clone(),
            source,
        })?;
        let guard = pprof::ProfilerGuardBuilder::default()
            .frequency(99)
            .blocklist(&["libc", "libgcc", "pthread", "vdso"])
            .build()
            .map_err(|source| ProfileError::Profiler {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "CPU profiling started");
        Ok(Self {
            inner: Some((guard, file)),
            path,
        })
    }

    /// Stops profiling and writes the capture as a flamegraph.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be built or written.
    pub fn finish(mut self) -> Result<(), ProfileError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), ProfileError> {
        let Some((guard, file)) = self.inner.take() else {
            return Ok(());
        };
        let report = guard
            .report()
            .build()
            .map_err(|source| ProfileError::Profiler {
                path: self.path.clone(),
                source,
            })?;
        report
            .flamegraph(file)
            .map_err(|source| ProfileError::Profiler {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), "CPU profile written");
        Ok(())
    }
}

impl Drop for ProfileSession {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            tracing::warn!(error = %err, "CPU profile could not be written");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // the sampler is a process singleton, so all lifecycle checks share one
    // test to keep the acquisitions sequential
    #[test]
    fn capture_is_finalized_on_finish_and_on_drop() {
        let dir = tempfile::tempdir().expect("tempdir");

        let finished = dir.path().join("finished.svg");
        let session = ProfileSession::start(finished.clone()).expect("start profiler");
        let mut acc = 0u64;
        for i in 0..200_000u64 {
            acc = acc.wrapping_add(i.wrapping_mul(i));
        }
        assert!(acc > 0);
        session.finish().expect("finish profiler");
        assert!(finished.is_file());

        let dropped = dir.path().join("dropped.svg");
        {
            let _session = ProfileSession::start(dropped.clone()).expect("restart profiler");
        }
        assert!(dropped.is_file());

        let unwritable = dir.path().join("missing-dir").join("profile.svg");
        let err = ProfileSession::start(unwritable).expect_err("should fail to create");
        assert!(matches!(err, ProfileError::Create { .. }));
    }
}
