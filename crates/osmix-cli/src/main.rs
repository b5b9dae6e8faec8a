//! # osmix — OS composition CLI
//!
//! Front end for the osmix compose/build engine. Commands declare the
//! external programs they need; before any command body runs, the
//! dispatcher verifies the declarations along the command's ancestor chain
//! against the search path. Any failure is reported as a single diagnostic
//! line and exit status 1.

mod check;
mod commands;
mod deps;
mod guard;
mod profile;
mod tree;

use std::process::ExitCode;

use clap::Parser;

use crate::commands::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match commands::execute(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}
