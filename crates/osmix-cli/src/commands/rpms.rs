//! `osmix add-rpms` — Add RPMs from the configured RPM directory to the
//! local repository.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use osmix_builder::Builder;

/// Arguments for the `add-rpms` command.
#[derive(Args, Debug)]
pub struct AddRpmsArgs {
    /// Builder configuration file to use.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Executes the `add-rpms` command.
///
/// # Errors
///
/// Returns an error if the configuration does not set an RPM directory,
/// the directory cannot be read, or the repository update fails.
pub fn execute(args: AddRpmsArgs) -> anyhow::Result<()> {
    let builder = Builder::from_config(args.config.as_deref())?;
    let Some(rpm_dir) = builder.rpm_dir() else {
        anyhow::bail!("rpm_dir not set in configuration");
    };

    let entries: Vec<fs::DirEntry> = fs::read_dir(&rpm_dir)
        .and_then(|dir| dir.collect())
        .with_context(|| format!("cannot read RPM directory {}", rpm_dir.display()))?;
    builder.add_rpm_list(&entries)?;
    Ok(())
}
