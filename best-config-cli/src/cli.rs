//! CLI structure and command definitions.

use crate::commands::{LocateCommand, ShowCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect how best resolves its run configuration.
#[derive(Parser)]
#[command(name = "best-config")]
#[command(version, about = "Inspect resolved best configuration", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Resolve relative paths against this directory instead of the current one
    #[arg(long, value_name = "DIR", global = true)]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the global and project configuration for a run
    Show(ShowCommand),

    /// Print the configuration file that would be loaded
    Locate(LocateCommand),
}
