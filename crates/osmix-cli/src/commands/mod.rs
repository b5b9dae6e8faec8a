//! CLI command definitions and dispatch.
//!
//! The parsed command line is mapped onto a leaf of the [`CommandTree`];
//! execution is gated on the leaf's ancestor-chain dependency closure. The
//! `--version` and `--check` queries bypass the gate so they answer even on
//! a host missing every tool.

pub mod init;
pub mod rpms;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};

use crate::check;
use crate::deps::DependencyRegistry;
use crate::guard;
use crate::profile::ProfileSession;
use crate::tree::{CommandId, CommandTree};

/// osmix — compose OS update content and images.
#[derive(Parser, Debug)]
#[command(name = "osmix", about = "Compose OS update content and images")]
pub struct Cli {
    /// Print version information and quit.
    #[arg(long)]
    pub version: bool,

    /// Check all external programs needed by osmix commands and quit.
    #[arg(long)]
    pub check: bool,

    /// Write a CPU profile of this invocation to a file.
    #[arg(long, global = true, hide = true, value_name = "FILE")]
    pub cpu_profile: Option<PathBuf>,

    /// EXPERIMENTAL: use the new update-publisher implementation when possible.
    #[arg(long, global = true)]
    pub new_updater: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the mix workspace.
    Init(init::InitArgs),
    /// Add RPMs from the configured RPM directory to the local repository.
    AddRpms(rpms::AddRpmsArgs),
}

/// The statically registered command hierarchy and its dependency
/// declarations. Built once per invocation and read-only afterwards.
struct CommandSet {
    tree: CommandTree,
    registry: DependencyRegistry,
    init: CommandId,
    add_rpms: CommandId,
}

impl CommandSet {
    fn build() -> Self {
        let mut tree = CommandTree::new("osmix");
        let root = tree.root();
        let init = tree.register(root, "init");
        let add_rpms = tree.register(root, "add-rpms");

        let mut registry = DependencyRegistry::default();
        registry.declare(init, ["git"]);
        registry.declare(add_rpms, ["createrepo_c", "hardlink"]);

        Self {
            tree,
            registry,
            init,
            add_rpms,
        }
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// Starts the profiling session (if requested) before dispatch and finishes
/// it on every path, so a failed run never leaves a truncated capture.
///
/// # Errors
///
/// Returns an error if a required external program is missing or the
/// command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    osmix_builder::set_new_updater(cli.new_updater);

    let profile = cli
        .cpu_profile
        .clone()
        .map(ProfileSession::start)
        .transpose()?;

    let outcome = dispatch(cli);

    if let Some(session) = profile {
        match session.finish() {
            Ok(()) => {}
            Err(err) if outcome.is_ok() => return Err(err.into()),
            Err(err) => tracing::warn!(error = %err, "CPU profile could not be written"),
        }
    }
    outcome
}

fn dispatch(cli: Cli) -> anyhow::Result<ExitCode> {
    let set = CommandSet::build();

    let Some(command) = cli.command else {
        // --version and --check answer even when external programs are missing
        if cli.version {
            println!("osmix {}", osmix_builder::VERSION);
            return Ok(ExitCode::SUCCESS);
        }
        if cli.check {
            return Ok(check::run(&set.registry));
        }
        guard::run(&set.tree, &set.registry, set.tree.root(), || {
            let mut usage = Cli::command();
            usage.print_help()?;
            Ok(())
        })?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Command::Init(args) => {
            guard::run(&set.tree, &set.registry, set.init, || init::execute(args))?;
        }
        Command::AddRpms(args) => {
            guard::run(&set.tree, &set.registry, set.add_rpms, || rpms::execute(args))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
