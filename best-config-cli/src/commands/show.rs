//! Command to resolve and print run configuration.

use crate::error::CliError;
use crate::utils::{resolver, GlobalOptions, OutputFormat};
use best_config::{CliArgs, GlobalConfig, ProjectConfig};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Resolve the configuration for a run and print it.
#[derive(Args)]
pub struct ShowCommand {
    /// Project directories (defaults to the working directory)
    #[arg(value_name = "PROJECT")]
    pub projects: Vec<PathBuf>,

    /// Explicit configuration file
    #[arg(long, value_name = "PATH", env = "BEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Test environment shorthand
    #[arg(long, value_name = "NAME")]
    pub env: Option<String>,

    /// Only run benchmark files matching this pattern (repeatable)
    #[arg(long = "test-path-pattern", value_name = "REGEX")]
    pub test_path_pattern: Vec<String>,

    /// Only run benchmarks whose name matches this pattern
    #[arg(long, value_name = "REGEX")]
    pub test_name_pattern: Option<String>,

    /// Override the root directory
    #[arg(long, value_name = "DIR")]
    pub root_dir: Option<PathBuf>,

    /// Write results to this file
    #[arg(long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Report memory leaks
    #[arg(long)]
    pub detect_leaks: bool,

    /// Verbose result reporting
    #[arg(long)]
    pub verbose_results: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Benchmark path filters
    #[arg(last = true, value_name = "TESTS")]
    pub tests: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    global_config: &'a GlobalConfig,
    configs: Vec<&'a ProjectConfig>,
}

impl ShowCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = resolver(global)?;
        let args = self.to_cli_args()?;

        let configs = resolver.get_configs(&self.projects, &args)?;
        let report = Report {
            global_config: &configs.global_config,
            configs: configs.configs.iter().map(|config| &**config).collect(),
        };

        println!("{}", self.format.render(&report)?);
        Ok(())
    }

    /// Translate typed flags into the override mapping the library expects.
    fn to_cli_args(&self) -> Result<CliArgs, CliError> {
        let mut args = CliArgs::new()
            .with("$0", "best-config")
            .with("_", self.tests.clone());

        if let Some(config) = &self.config {
            args.insert("config", path_string(config)?);
        }
        if let Some(env) = &self.env {
            args.insert("env", env.as_str());
        }
        if !self.test_path_pattern.is_empty() {
            args.insert("testPathPattern", self.test_path_pattern.clone());
        }
        if let Some(pattern) = &self.test_name_pattern {
            args.insert("testNamePattern", pattern.as_str());
        }
        if let Some(root_dir) = &self.root_dir {
            args.insert("rootDir", path_string(root_dir)?);
        }
        if let Some(output_file) = &self.output_file {
            args.insert("outputFile", path_string(output_file)?);
        }
        if self.detect_leaks {
            args.insert("detectLeaks", true);
        }
        if self.verbose_results {
            args.insert("verbose", true);
        }

        Ok(args)
    }
}

fn path_string(path: &std::path::Path) -> Result<String, CliError> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        CliError::InvalidArguments(format!("path is not valid UTF-8: {}", path.display()))
    })
}
