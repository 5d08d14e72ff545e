//! Logging infrastructure for the best-config library.
//!
//! The library emits diagnostics through the `log` facade. This module
//! provides the stderr backend that binaries install, filtered by a
//! three-step verbosity level.

use std::env;
use std::fmt;

/// Environment variable consulted when no CLI verbosity flag is given.
pub const LOG_MODE_ENV: &str = "BEST_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// # Examples
///
/// ```
/// use best_config::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all non-essential output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, info, and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not one of `quiet`, `normal`,
    /// or `verbose`.
    ///
    /// # Examples
    ///
    /// ```
    /// use best_config::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The most detailed `log` level this verbosity lets through.
    #[must_use]
    pub const fn level_filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

/// A stderr logger backing the `log` facade.
///
/// # Examples
///
/// ```
/// use best_config::{Logger, LogLevel};
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert_eq!(logger.level(), LogLevel::Normal);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Installs this logger as the process-wide `log` backend.
    ///
    /// Only the first installation takes effect; later calls still adjust
    /// the maximum level so verbosity flags keep working in tests.
    pub fn install(self) {
        let filter = self.level.level_filter();
        if log::set_boxed_logger(Box::new(self)).is_err() {
            log::debug!("logger already installed, keeping existing backend");
        }
        log::set_max_level(filter);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.level_filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Builds a logger from CLI flags and the environment, then installs it.
///
/// The priority order is:
/// 1. CLI flags (`verbose` wins over `quiet`)
/// 2. `BEST_LOG_MODE` environment variable
/// 3. Default (Normal)
///
/// # Examples
///
/// ```
/// use best_config::{init_logger, LogLevel};
///
/// let logger = init_logger(true, false);
/// assert_eq!(logger.level(), LogLevel::Verbose);
/// ```
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let logger = Logger::new(select_level(verbose, quiet));
    logger.install();
    logger
}

fn select_level(verbose: bool, quiet: bool) -> LogLevel {
    if verbose {
        return LogLevel::Verbose;
    }
    if quiet {
        return LogLevel::Quiet;
    }

    env::var(LOG_MODE_ENV)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .unwrap_or(LogLevel::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard(Option<String>);

    impl EnvGuard {
        fn set(value: Option<&str>) -> Self {
            let saved = env::var(LOG_MODE_ENV).ok();
            match value {
                Some(v) => env::set_var(LOG_MODE_ENV, v),
                None => env::remove_var(LOG_MODE_ENV),
            }
            Self(saved)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match self.0.take() {
                Some(v) => env::set_var(LOG_MODE_ENV, v),
                None => env::remove_var(LOG_MODE_ENV),
            }
        }
    }

    #[test]
    fn test_log_level_display_and_parse() {
        for level in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Verbose] {
            assert_eq!(LogLevel::parse(&level.to_string()).unwrap(), level);
        }
        assert_eq!(LogLevel::parse("Normal").unwrap(), LogLevel::Normal);
        assert!(LogLevel::parse("").is_err());
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(LogLevel::Quiet.level_filter(), log::LevelFilter::Off);
        assert_eq!(LogLevel::Normal.level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Verbose.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_logger_enabled_respects_level() {
        use log::Log;

        let logger = Logger::new(LogLevel::Normal);
        let warn = log::Metadata::builder().level(log::Level::Warn).build();
        let debug = log::Metadata::builder().level(log::Level::Debug).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    #[serial]
    fn test_select_level_defaults_to_normal() {
        let _guard = EnvGuard::set(None);
        assert_eq!(select_level(false, false), LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_select_level_flags_override_env() {
        let _guard = EnvGuard::set(Some("quiet"));
        assert_eq!(select_level(true, false), LogLevel::Verbose);
        assert_eq!(select_level(true, true), LogLevel::Verbose);
        assert_eq!(select_level(false, false), LogLevel::Quiet);
    }

    #[test]
    #[serial]
    fn test_select_level_invalid_env_falls_back() {
        let _guard = EnvGuard::set(Some("shouty"));
        assert_eq!(select_level(false, false), LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_install_sets_global_max_level() {
        Logger::new(LogLevel::Verbose).install();
        assert_eq!(log::max_level(), log::LevelFilter::Debug);

        Logger::new(LogLevel::Quiet).install();
        assert_eq!(log::max_level(), LogLevel::Quiet.level_filter());
    }

    #[test]
    #[serial]
    fn test_init_logger_twice_is_harmless() {
        let first = init_logger(false, true);
        let second = init_logger(true, false);
        assert_eq!(first.level(), LogLevel::Quiet);
        assert_eq!(second.level(), LogLevel::Verbose);
    }
}
