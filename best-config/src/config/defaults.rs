//! Built-in option defaults.
//!
//! Every option the snapshots read has a fallback here, except `rootDir`,
//! which must come from the configuration source or the command line.

use std::env;
use std::path::Path;

use serde_json::{json, Value};

use crate::config::Options;

/// Default benchmark runner.
pub const DEFAULT_RUNNER: &str = "best-runner-headless";

/// Default test environment.
pub const DEFAULT_TEST_ENVIRONMENT: &str = "node";

/// Default pattern for benchmark files.
pub const DEFAULT_TEST_MATCH: &str = "**/__benchmarks__/**/*.benchmark.js";

/// Build the defaults baseline for a resolution running in `cwd`.
///
/// A fresh mapping is returned on every call.
///
/// # Examples
///
/// ```
/// use best_config::config::default_options;
/// use std::path::Path;
///
/// let defaults = default_options(Path::new("/repo"));
/// assert_eq!(defaults["runner"], "best-runner-headless");
/// assert!(!defaults.contains_key("rootDir"));
/// ```
#[must_use]
pub fn default_options(cwd: &Path) -> Options {
    let cache_directory = env::temp_dir().join("best");

    let defaults = json!({
        "cache": true,
        "cacheDirectory": cache_directory.to_string_lossy(),
        "cwd": cwd.to_string_lossy(),
        "detectLeaks": false,
        "displayName": null,
        "globals": {},
        "moduleDirectories": ["node_modules"],
        "moduleFileExtensions": ["js", "json"],
        "moduleLoader": null,
        "moduleNameMapper": {},
        "modulePathIgnorePatterns": [],
        "modulePaths": [],
        "name": null,
        "outputFile": null,
        "projects": [],
        "resolver": null,
        "roots": ["<rootDir>"],
        "runner": DEFAULT_RUNNER,
        "testEnvironment": DEFAULT_TEST_ENVIRONMENT,
        "testEnvironmentOptions": {},
        "testLocationInResults": false,
        "testMatch": [DEFAULT_TEST_MATCH],
        "testNamePattern": null,
        "testPathIgnorePatterns": ["/node_modules/"],
        "testRegex": "",
        "testRunner": "best-runtime",
        "testURL": "about:blank",
        "transform": {},
        "transformIgnorePatterns": ["/node_modules/"],
        "verbose": false,
    });

    match defaults {
        Value::Object(map) => map,
        _ => Options::new(),
    }
}
