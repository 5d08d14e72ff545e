#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # best-config
//!
//! Configuration resolution for the best benchmark runner.
//!
//! This library locates a configuration source relative to a starting path,
//! loads it, layers command-line overrides and built-in defaults on top, and
//! produces two immutable snapshots: [`GlobalConfig`] for the whole run and
//! [`ProjectConfig`] for the benchmarked project.
//!
//! ## Core Types
//!
//! - [`CliArgs`] and [`ArgMerger`]: command-line overrides
//! - [`ConfigResolver`]: the resolution entry point
//! - [`GlobalConfig`] and [`ProjectConfig`]: resolved snapshots
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use best_config::{CliArgs, ConfigResolver};
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(dir.path().join("best.config.yaml"), "rootDir: ./fixtures\n").unwrap();
//!
//! let args = CliArgs::new().with("env", "node");
//! let resolver = ConfigResolver::new(dir.path());
//! let configs = resolver.get_configs(&[], &args).unwrap();
//!
//! assert_eq!(configs.global_config.root_dir, dir.path().join("fixtures"));
//! assert_eq!(configs.configs[0].test_environment, "node");
//! ```

pub mod agent;
pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod path;

// Re-export key types at crate root for convenience
pub use args::{ArgMerger, CliArgs};
pub use config::{
    get_configs, read_config, ConfigResolver, Configs, GlobalConfig, ProjectConfig,
    ResolvedConfig,
};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{resolve_config_path, ConfigSearch};
