//! Error types for the best-config library.
//!
//! Every failure during configuration resolution is fatal to the call that
//! produced it. Errors carry the path or option name needed to explain the
//! failure to a user.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a best-config error.
///
/// # Examples
///
/// ```
/// use best_config::{Error, Result};
///
/// fn example_operation() -> Result<&'static str> {
///     Ok("rootDir")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the best-config library.
#[derive(Debug, Error)]
pub enum Error {
    /// The upward search reached the filesystem root without finding a
    /// configuration source.
    #[error("config not found: no best.config.yaml or package.json above {}", start.display())]
    ConfigNotFound {
        /// The directory the search started from.
        start: PathBuf,
    },

    /// A configuration source exists but its content could not be parsed.
    #[error("failed to parse config file {}: {message}", path.display())]
    ConfigParse {
        /// The offending configuration file.
        path: PathBuf,
        /// Parser diagnostics.
        message: String,
    },

    /// A configuration source could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// The configuration file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The root directory option is absent after merging all sources.
    #[error("configuration option '{option}' must be specified")]
    MissingRootDir {
        /// The name of the missing option.
        option: String,
    },

    /// More than one project is in scope for a single run.
    #[error("multiple projects are not supported yet ({count} projects in scope)")]
    UnsupportedMultiProject {
        /// The number of projects that were in scope.
        count: usize,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An option has a value that cannot be used.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The option that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if the error means no configuration source exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use best_config::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::ConfigNotFound { start: PathBuf::from("/repo") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. })
    }

    /// Check if the error comes from reading or parsing a config source.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigParse { .. } | Self::ConfigRead { .. })
    }
}
