//! Command to show which configuration file a path resolves to.

use crate::error::CliError;
use crate::utils::{resolver, GlobalOptions};
use best_config::resolve_config_path;
use clap::Args;
use std::path::PathBuf;

/// Print the configuration source that would be loaded for a path.
#[derive(Args)]
pub struct LocateCommand {
    /// File or directory to start from
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
}

impl LocateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = resolver(global)?;
        let found = resolve_config_path(&self.path, resolver.cwd())?;

        log::info!("found after {} upward step(s)", found.hops);
        println!("{}", found.path.display());
        Ok(())
    }
}
