//! Configuration snapshots.
//!
//! [`GlobalConfig`] and [`ProjectConfig`] are the only configuration views
//! the rest of a run sees. Each is projected from [`NormalizedOptions`]
//! through a fixed field allowlist and handed out behind an [`Arc`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::normalizer::NormalizedOptions;
use crate::config::Options;
use crate::error::{Error, Result};

/// Option names copied into [`GlobalConfig`].
pub const GLOBAL_CONFIG_FIELDS: [&str; 7] = [
    "detectLeaks",
    "outputFile",
    "projects",
    "rootDir",
    "testNamePattern",
    "testPathPattern",
    "verbose",
];

/// Option names copied into [`ProjectConfig`].
pub const PROJECT_CONFIG_FIELDS: [&str; 27] = [
    "cache",
    "cacheDirectory",
    "cwd",
    "detectLeaks",
    "displayName",
    "globals",
    "moduleDirectories",
    "moduleFileExtensions",
    "moduleLoader",
    "moduleNameMapper",
    "modulePathIgnorePatterns",
    "modulePaths",
    "name",
    "resolver",
    "rootDir",
    "roots",
    "runner",
    "testEnvironment",
    "testEnvironmentOptions",
    "testLocationInResults",
    "testMatch",
    "testPathIgnorePatterns",
    "testRegex",
    "testRunner",
    "testURL",
    "transform",
    "transformIgnorePatterns",
];

/// Run-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    /// Report memory leaks after each benchmark file.
    pub detect_leaks: bool,
    /// Where to write results, if anywhere.
    pub output_file: Option<String>,
    /// Nested project paths declared by the entry configuration.
    pub projects: Vec<PathBuf>,
    /// Absolute root directory.
    pub root_dir: PathBuf,
    /// Only run benchmarks whose name matches.
    pub test_name_pattern: Option<String>,
    /// Only run benchmark files whose path matches.
    pub test_path_pattern: String,
    /// Verbose result reporting.
    pub verbose: bool,
}

/// Configuration for one benchmarked project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Whether transform results are cached.
    pub cache: bool,
    /// Where cached transform results live.
    pub cache_directory: PathBuf,
    /// Working directory of the run.
    pub cwd: PathBuf,
    /// Report memory leaks after each benchmark file.
    pub detect_leaks: bool,
    /// Label shown next to this project's results, either a string or a
    /// `{name, color}` object.
    pub display_name: Option<Value>,
    /// Globals exposed to benchmark code.
    pub globals: Options,
    /// Directories searched when resolving modules.
    pub module_directories: Vec<String>,
    /// File extensions tried when resolving modules.
    pub module_file_extensions: Vec<String>,
    /// Custom module loader.
    pub module_loader: Option<String>,
    /// Regex to module path mapping. Values are a path or a list of paths.
    pub module_name_mapper: BTreeMap<String, Value>,
    /// Paths hidden from the module loader.
    pub module_path_ignore_patterns: Vec<String>,
    /// Extra module search paths.
    pub module_paths: Vec<String>,
    /// Project identifier.
    pub name: Option<String>,
    /// Custom module resolver.
    pub resolver: Option<String>,
    /// Absolute root directory.
    pub root_dir: PathBuf,
    /// Directories scanned for benchmark files.
    pub roots: Vec<String>,
    /// Benchmark runner name.
    pub runner: String,
    /// Environment benchmarks execute in.
    pub test_environment: String,
    /// Options for the environment, such as a remote agent host.
    pub test_environment_options: Options,
    /// Record source locations in results.
    pub test_location_in_results: bool,
    /// Globs selecting benchmark files.
    pub test_match: Vec<String>,
    /// Paths excluded from benchmark discovery.
    pub test_path_ignore_patterns: Vec<String>,
    /// Regex selecting benchmark files, as a string or a list of strings.
    pub test_regex: Value,
    /// Runtime that executes a single benchmark file.
    pub test_runner: String,
    /// URL the environment pretends to be loaded from.
    #[serde(rename = "testURL")]
    pub test_url: String,
    /// Regex to transformer mapping. Values are a module path or a
    /// `[path, options]` pair.
    pub transform: BTreeMap<String, Value>,
    /// Paths that are never transformed.
    pub transform_ignore_patterns: Vec<String>,
}

/// Splits normalized options into the two snapshots.
///
/// # Examples
///
/// ```
/// use best_config::config::{ConfigPartitioner, Normalizer};
/// use best_config::CliArgs;
/// use serde_json::{json, Map};
/// use std::path::Path;
///
/// let mut merged = Map::new();
/// merged.insert("rootDir".into(), json!("/repo"));
/// merged.insert("benchmarkOnClient".into(), json!(false));
///
/// let options = Normalizer::normalize(merged, &CliArgs::new(), Path::new("/repo")).unwrap();
/// let (global, project) = ConfigPartitioner::partition(&options).unwrap();
///
/// assert_eq!(global.root_dir, project.root_dir);
/// ```
pub struct ConfigPartitioner;

impl ConfigPartitioner {
    /// Project both allowlists out of `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the option if an allowlisted
    /// value has the wrong type.
    pub fn partition(options: &NormalizedOptions) -> Result<(Arc<GlobalConfig>, Arc<ProjectConfig>)> {
        let global = Self::global(options)?;
        let project = Self::project(options)?;
        Ok((Arc::new(global), Arc::new(project)))
    }

    fn global(options: &NormalizedOptions) -> Result<GlobalConfig> {
        Ok(GlobalConfig {
            detect_leaks: field(options, "detectLeaks")?,
            output_file: field(options, "outputFile")?,
            projects: field(options, "projects")?,
            root_dir: field(options, "rootDir")?,
            test_name_pattern: field(options, "testNamePattern")?,
            test_path_pattern: field(options, "testPathPattern")?,
            verbose: field(options, "verbose")?,
        })
    }

    fn project(options: &NormalizedOptions) -> Result<ProjectConfig> {
        Ok(ProjectConfig {
            cache: field(options, "cache")?,
            cache_directory: field(options, "cacheDirectory")?,
            cwd: field(options, "cwd")?,
            detect_leaks: field(options, "detectLeaks")?,
            display_name: field(options, "displayName")?,
            globals: field(options, "globals")?,
            module_directories: field(options, "moduleDirectories")?,
            module_file_extensions: field(options, "moduleFileExtensions")?,
            module_loader: field(options, "moduleLoader")?,
            module_name_mapper: field(options, "moduleNameMapper")?,
            module_path_ignore_patterns: field(options, "modulePathIgnorePatterns")?,
            module_paths: field(options, "modulePaths")?,
            name: field(options, "name")?,
            resolver: field(options, "resolver")?,
            root_dir: field(options, "rootDir")?,
            roots: field(options, "roots")?,
            runner: field(options, "runner")?,
            test_environment: field(options, "testEnvironment")?,
            test_environment_options: field(options, "testEnvironmentOptions")?,
            test_location_in_results: field(options, "testLocationInResults")?,
            test_match: field(options, "testMatch")?,
            test_path_ignore_patterns: field(options, "testPathIgnorePatterns")?,
            test_regex: field(options, "testRegex")?,
            test_runner: field(options, "testRunner")?,
            test_url: field(options, "testURL")?,
            transform: field(options, "transform")?,
            transform_ignore_patterns: field(options, "transformIgnorePatterns")?,
        })
    }
}

/// Deserialize a single option; an absent key reads as `null`.
///
/// Nulls for defaulted options never get here because the normalizer keeps
/// the default in their place.
fn field<T: DeserializeOwned>(options: &NormalizedOptions, key: &str) -> Result<T> {
    let value = options.get(key).cloned().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| Error::Validation {
        field: key.to_string(),
        message: e.to_string(),
    })
}
