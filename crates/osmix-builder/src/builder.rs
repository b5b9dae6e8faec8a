//! Mix workspace lifecycle: configuration, initialization, and RPM import.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::{BuilderConfig, DEFAULT_BUNDLES, DEFAULT_CONFIG_FILE};
use crate::error::{BuilderError, Result};

/// Handle on a mix workspace and its configuration.
///
/// A `Builder` starts with the default configuration; `load_conf` records
/// which file to use and `read_conf` parses it. [`Builder::from_config`]
/// does both in one step.
#[derive(Debug)]
pub struct Builder {
    root: PathBuf,
    config: BuilderConfig,
    config_path: Option<PathBuf>,
}

impl Builder {
    /// Creates a builder rooted at the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::at(".")
    }

    /// Creates a builder rooted at `root`.
    #[must_use]
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: BuilderConfig::default(),
            config_path: None,
        }
    }

    /// Creates a builder and loads its configuration in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is missing or invalid.
    pub fn from_config(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::new();
        builder.load_conf(path)?;
        builder.read_conf()?;
        Ok(builder)
    }

    /// Writes a default configuration file unless one already exists.
    ///
    /// With `local_rpms`, the configuration also points at freshly created
    /// local RPM and repository directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories or the file cannot be created.
    pub fn create_default_config(&self, local_rpms: bool) -> Result<()> {
        let path = self.root.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            tracing::debug!(path = %path.display(), "builder configuration already present");
            return Ok(());
        }

        let mut config = BuilderConfig::default();
        if local_rpms {
            let rpm_dir = PathBuf::from("local-rpms");
            create_dir(&self.root.join(&rpm_dir))?;
            create_dir(&self.root.join(&config.repo_dir))?;
            config.rpm_dir = Some(rpm_dir);
        }

        let rendered = serde_yaml::to_string(&config).map_err(|source| BuilderError::Config {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, rendered).map_err(|source| BuilderError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote default builder configuration");
        Ok(())
    }

    /// Records the configuration file to use, verifying it exists.
    ///
    /// With no explicit path, the workspace default is used.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ConfigNotFound`] if the file does not exist.
    pub fn load_conf(&mut self, path: Option<&Path>) -> Result<()> {
        let path = match path {
            Some(explicit) => explicit.to_path_buf(),
            None => self.root.join(DEFAULT_CONFIG_FILE),
        };
        if !path.is_file() {
            return Err(BuilderError::ConfigNotFound(path));
        }
        self.config_path = Some(path);
        Ok(())
    }

    /// Parses the previously loaded configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ConfigNotLoaded`] if `load_conf` has not run,
    /// or a parse error for an invalid file.
    pub fn read_conf(&mut self) -> Result<()> {
        let path = self
            .config_path
            .clone()
            .ok_or(BuilderError::ConfigNotLoaded)?;
        let raw = fs::read_to_string(&path).map_err(|source| BuilderError::Io {
            path: path.clone(),
            source,
        })?;
        self.config = serde_yaml::from_str(&raw)
            .map_err(|source| BuilderError::Config { path, source })?;
        Ok(())
    }

    /// Directory scanned for local RPMs, if configured.
    #[must_use]
    pub fn rpm_dir(&self) -> Option<PathBuf> {
        self.config.rpm_dir.as_deref().map(|dir| self.resolve(dir))
    }

    /// Initializes the mix workspace for the given versions.
    ///
    /// Creates the bundle, state, and version directories, records both
    /// versions together with the upstream URL, seeds the mix bundle list,
    /// and puts the bundle directory under git control. With `all_bundles`,
    /// every bundle definition already present in the bundle directory is
    /// added to the list alongside the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or metadata file cannot be created,
    /// or if `git init` fails.
    pub fn init_mix(
        &self,
        upstream_version: u32,
        mix_version: u32,
        all_bundles: bool,
        upstream_url: &str,
    ) -> Result<()> {
        let bundle_dir = self.resolve(&self.config.bundle_dir);
        let state_dir = self.resolve(&self.config.state_dir);
        let versions_dir = self.resolve(&self.config.versions_dir);
        for dir in [&bundle_dir, &state_dir, &versions_dir] {
            create_dir(dir)?;
        }

        write_file(versions_dir.join("upstreamversion"), &format!("{upstream_version}\n"))?;
        write_file(versions_dir.join("mixversion"), &format!("{mix_version}\n"))?;
        write_file(versions_dir.join("upstreamurl"), &format!("{upstream_url}\n"))?;

        let bundles = initial_bundles(all_bundles, &bundle_dir)?;
        write_file(self.root.join("mixbundles"), &format!("{}\n", bundles.join("\n")))?;

        let updater = if crate::new_updater() { "new" } else { "legacy" };
        write_file(state_dir.join("updater"), &format!("{updater}\n"))?;

        run_tool(Command::new("git").arg("init").arg("--quiet").current_dir(&bundle_dir), "git")?;

        tracing::info!(upstream_version, mix_version, "mix workspace initialized");
        Ok(())
    }

    /// Stages RPMs into the local repository and rebuilds its metadata.
    ///
    /// Only regular files with an `.rpm` extension are imported; anything
    /// else in the directory listing is skipped with a warning. When nothing
    /// is staged the repository metadata is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if staging fails or a repository tool exits
    /// unsuccessfully.
    pub fn add_rpm_list(&self, entries: &[fs::DirEntry]) -> Result<()> {
        let repo_dir = self.resolve(&self.config.repo_dir);
        create_dir(&repo_dir)?;

        let staged = stage_rpms(entries, &repo_dir)?;
        if staged.is_empty() {
            tracing::warn!(repo = %repo_dir.display(), "no RPMs found to add");
            return Ok(());
        }

        run_tool(Command::new("createrepo_c").arg(&repo_dir), "createrepo_c")?;
        run_tool(Command::new("hardlink").arg(&repo_dir), "hardlink")?;
        tracing::info!(count = staged.len(), repo = %repo_dir.display(), "local RPM repository updated");
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Links each `.rpm` entry into `repo_dir`, copying when linking fails.
///
/// Entries already present in the repository are kept as-is.
fn stage_rpms(entries: &[fs::DirEntry], repo_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut staged = Vec::new();
    for entry in entries {
        let path = entry.path();
        let is_rpm = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("rpm"));
        if !is_rpm || !path.is_file() {
            tracing::warn!(path = %path.display(), "skipping non-RPM entry");
            continue;
        }

        let dest = repo_dir.join(entry.file_name());
        if dest.exists() {
            staged.push(dest);
            continue;
        }
        if fs::hard_link(&path, &dest).is_err() {
            let _ = fs::copy(&path, &dest).map_err(|source| BuilderError::Io {
                path: dest.clone(),
                source,
            })?;
        }
        staged.push(dest);
    }
    Ok(staged)
}

fn initial_bundles(all_bundles: bool, bundle_dir: &Path) -> Result<Vec<String>> {
    let mut bundles: Vec<String> = DEFAULT_BUNDLES.iter().map(ToString::to_string).collect();
    if all_bundles {
        let entries = fs::read_dir(bundle_dir).map_err(|source| BuilderError::Io {
            path: bundle_dir.to_path_buf(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| BuilderError::Io {
                path: bundle_dir.to_path_buf(),
                source,
            })?;
            if entry.path().is_file() {
                bundles.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        bundles.sort_unstable();
        bundles.dedup();
    }
    Ok(bundles)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| BuilderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: PathBuf, contents: &str) -> Result<()> {
    fs::write(&path, contents).map_err(|source| BuilderError::Io { path, source })
}

fn run_tool(command: &mut Command, program: &str) -> Result<()> {
    let status = command.status().map_err(|source| BuilderError::Spawn {
        program: program.to_string(),
        source,
    })?;
    if !status.success() {
        return Err(BuilderError::External {
            program: program.to_string(),
            status,
        });
    }
    Ok(())
}
