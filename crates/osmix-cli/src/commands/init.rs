//! `osmix init` — Initialize the mix workspace.

use std::path::PathBuf;

use clap::Args;
use osmix_builder::Builder;
use osmix_builder::config::DEFAULT_UPSTREAM_URL;

/// Arguments for the `init` command.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Include all upstream bundles in the mix automatically.
    #[arg(long)]
    pub all: bool,

    /// Create and configure local RPM directories.
    #[arg(long)]
    pub local_rpms: bool,

    /// Upstream version to compose the mix from.
    #[arg(long, value_name = "VERSION")]
    pub upstream_version: u32,

    /// Mix version to build.
    #[arg(long, value_name = "VERSION")]
    pub mix_version: u32,

    /// Builder configuration file to use for mixing.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Upstream URL to use for mixing.
    #[arg(long, default_value = DEFAULT_UPSTREAM_URL, value_name = "URL")]
    pub upstream_url: String,
}

/// Executes the `init` command.
///
/// Without `--config` a default configuration is created first, so a bare
/// `osmix init` works in an empty directory.
///
/// # Errors
///
/// Returns an error if the configuration cannot be created or read, or if
/// the mix workspace cannot be initialized.
pub fn execute(args: InitArgs) -> anyhow::Result<()> {
    tracing::info!(
        upstream_version = args.upstream_version,
        mix_version = args.mix_version,
        "initializing mix workspace"
    );
    let mut builder = Builder::new();
    if args.config.is_none() {
        builder.create_default_config(args.local_rpms)?;
    }
    builder.load_conf(args.config.as_deref())?;
    builder.read_conf()?;
    builder.init_mix(
        args.upstream_version,
        args.mix_version,
        args.all,
        &args.upstream_url,
    )?;
    Ok(())
}
