//! Utility functions shared by CLI commands.

use crate::error::CliError;
use best_config::ConfigResolver;
use clap::ValueEnum;
use serde::Serialize;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose/quiet are consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Working directory override.
    pub cwd: Option<PathBuf>,
}

/// How resolved configuration is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl OutputFormat {
    /// Render `value` in this format.
    pub fn render<T: Serialize>(self, value: &T) -> Result<String, CliError> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}

/// Build a resolver for the `--cwd` override or the process directory.
pub fn resolver(global: &GlobalOptions) -> Result<ConfigResolver, CliError> {
    match &global.cwd {
        Some(cwd) if cwd.is_absolute() => Ok(ConfigResolver::new(cwd.clone())),
        Some(cwd) => Ok(ConfigResolver::new(std::env::current_dir()?.join(cwd))),
        None => Ok(ConfigResolver::from_current_dir()?),
    }
}
