//! Configuration resolution for best.
//!
//! # Pipeline
//!
//! 1. [`resolve_config_path`](crate::path::resolve_config_path) finds the
//!    configuration source (`best.config.yaml` or `package.json`)
//! 2. [`ConfigLoader`] reads it into raw options and anchors `rootDir`
//! 3. [`ArgMerger`](crate::ArgMerger) layers command-line overrides on top
//! 4. [`Normalizer`] enforces `rootDir`, applies defaults, and derives
//!    `nonFlagArgs` and `testPathPattern`
//! 5. [`ConfigPartitioner`] projects the [`GlobalConfig`] and
//!    [`ProjectConfig`] snapshots
//!
//! # Precedence
//!
//! Built-in defaults fill in whatever the configuration file leaves out.
//! File values override defaults, and command-line values override both.
//!
//! # Examples
//!
//! ```no_run
//! use best_config::config::ConfigResolver;
//! use best_config::CliArgs;
//! use std::path::Path;
//!
//! let resolver = ConfigResolver::new("/repo");
//! let args = CliArgs::new().with("env", "node");
//! let resolved = resolver.read_config(&args, Path::new("pkgA/src")).unwrap();
//!
//! assert_eq!(resolved.project_config.test_environment, "node");
//! ```

pub mod defaults;
pub mod loader;
pub mod normalizer;
pub mod orchestrator;
pub mod schema;

/// Option name to value mapping used throughout resolution.
pub type Options = serde_json::Map<String, serde_json::Value>;

pub use defaults::default_options;
pub use loader::{ConfigFormat, ConfigLoader};
pub use normalizer::{NormalizedOptions, Normalizer};
pub use orchestrator::{get_configs, read_config, ConfigResolver, Configs, ResolvedConfig};
pub use schema::{ConfigPartitioner, GlobalConfig, ProjectConfig};
