//! Path handling for configuration discovery.
//!
//! # Normalization
//!
//! Normalization converts paths to an absolute, clean form by:
//! - Expanding tilde (~) to the home directory
//! - Joining relative paths onto an explicit working directory
//! - Resolving `.` and `..` components
//!
//! No filesystem access is involved, so symlinks are preserved as written.
//!
//! # Discovery
//!
//! [`resolve_config_path`] turns a path hint into the configuration source
//! to load, searching upward for `best.config.yaml` or `package.json`.
//!
//! ```no_run
//! use best_config::path::resolve_config_path;
//! use std::path::Path;
//!
//! let found = resolve_config_path(Path::new("."), Path::new("/repo/pkgA/src")).unwrap();
//! assert!(found.path.is_absolute());
//! ```

pub mod normalize;
pub mod resolver;

pub use resolver::{resolve_config_path, search_upward, ConfigSearch, BEST_CONFIG, PACKAGE_JSON};
