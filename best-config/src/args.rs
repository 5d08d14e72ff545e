//! Command-line overrides.
//!
//! [`CliArgs`] is the already-parsed override mapping handed to the library
//! by whatever front end parsed the command line. [`ArgMerger`] layers it on
//! top of the options loaded from a config source.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Options;

/// Key holding the positional (non-flag) arguments.
pub const POSITIONAL_KEY: &str = "_";

/// Key holding the program name.
pub const PROGRAM_NAME_KEY: &str = "$0";

/// Key holding an explicit configuration path.
pub const CONFIG_KEY: &str = "config";

/// Shorthand for the test environment option.
pub const ENV_KEY: &str = "env";

/// Canonical name of the test environment option.
pub const TEST_ENVIRONMENT_KEY: &str = "testEnvironment";

/// Key holding explicit test path pattern overrides.
pub const TEST_PATH_PATTERN_KEY: &str = "testPathPattern";

/// Keys that never become configuration options.
pub const RESERVED_KEYS: [&str; 5] = [POSITIONAL_KEY, PROGRAM_NAME_KEY, "h", "help", CONFIG_KEY];

/// Parsed command-line overrides, keyed by option name.
///
/// A key mapped to `null` counts as not given.
///
/// # Examples
///
/// ```
/// use best_config::CliArgs;
///
/// let args = CliArgs::new()
///     .with("_", vec!["mytest"])
///     .with("env", "node");
///
/// assert_eq!(args.positional(), vec!["mytest".to_string()]);
/// assert_eq!(args.get("env").and_then(|v| v.as_str()), Some("node"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CliArgs(Options);

impl CliArgs {
    /// Creates an empty override mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing mapping.
    #[must_use]
    pub fn from_map(map: Options) -> Self {
        Self(map)
    }

    /// Returns the mapping with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for `key`, treating `null` as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    /// Iterates over the defined (non-null) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter().filter(|(_, value)| !value.is_null())
    }

    /// The positional arguments, in order.
    #[must_use]
    pub fn positional(&self) -> Vec<String> {
        self.get(POSITIONAL_KEY).map(string_list).unwrap_or_default()
    }

    /// The explicit test path pattern overrides, in order.
    ///
    /// Accepts a single string or a list of strings.
    #[must_use]
    pub fn test_path_patterns(&self) -> Vec<String> {
        self.get(TEST_PATH_PATTERN_KEY)
            .map(string_list)
            .unwrap_or_default()
    }

    /// The explicit configuration path, if one was given.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> {
        self.get(CONFIG_KEY)
            .and_then(Value::as_str)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }
}

impl FromIterator<(String, Value)> for CliArgs {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Flatten a string or list of scalars into strings.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(other).into_iter().collect(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Merges command-line overrides onto loaded options.
///
/// # Examples
///
/// ```
/// use best_config::{ArgMerger, CliArgs};
/// use serde_json::{json, Map};
///
/// let mut options = Map::new();
/// options.insert("verbose".into(), json!(false));
///
/// let args = CliArgs::new().with("verbose", true).with("env", "jsdom");
/// ArgMerger::merge_into(&mut options, &args);
///
/// assert_eq!(options["verbose"], json!(true));
/// assert_eq!(options["testEnvironment"], json!("jsdom"));
/// assert!(!options.contains_key("env"));
/// ```
pub struct ArgMerger;

impl ArgMerger {
    /// Merge `args` onto `raw` and return the combined options.
    #[must_use]
    pub fn merge(mut raw: Options, args: &CliArgs) -> Options {
        Self::merge_into(&mut raw, args);
        raw
    }

    /// Merge `args` into `target` (CLI values overwrite).
    ///
    /// # Merging Rules
    ///
    /// - Reserved keys and `null` values are skipped
    /// - `env` is stored as `testEnvironment`
    /// - Everything else is copied as-is
    pub fn merge_into(target: &mut Options, args: &CliArgs) {
        for (key, value) in args.iter() {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }

            let option = if key == ENV_KEY {
                TEST_ENVIRONMENT_KEY
            } else {
                key.as_str()
            };

            log::debug!("overriding option '{option}' from command line");
            target.insert(option.to_string(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reserved_keys_never_merged() {
        let args = CliArgs::new()
            .with("_", vec!["a"])
            .with("$0", "best")
            .with("h", true)
            .with("help", true)
            .with("config", "/repo/best.config.yaml")
            .with("verbose", true);

        let merged = ArgMerger::merge(Options::new(), &args);
        for key in RESERVED_KEYS {
            assert!(!merged.contains_key(key), "{key} leaked into options");
        }
        assert_eq!(merged["verbose"], json!(true));
    }

    #[test]
    fn test_env_becomes_test_environment() {
        let mut raw = Options::new();
        raw.insert("testEnvironment".into(), json!("jsdom"));

        let merged = ArgMerger::merge(raw, &CliArgs::new().with("env", "node"));
        assert_eq!(merged["testEnvironment"], json!("node"));
        assert!(!merged.contains_key("env"));
    }

    #[test]
    fn test_cli_wins_and_file_values_pass_through() {
        let mut raw = Options::new();
        raw.insert("rootDir".into(), json!("/repo"));
        raw.insert("runner".into(), json!("best-runner-headless"));

        let args = CliArgs::new().with("runner", "best-runner-remote");
        let merged = ArgMerger::merge(raw, &args);

        assert_eq!(merged["runner"], json!("best-runner-remote"));
        assert_eq!(merged["rootDir"], json!("/repo"));
    }

    #[test]
    fn test_null_values_are_undefined() {
        let mut raw = Options::new();
        raw.insert("outputFile".into(), json!("out.json"));

        let args = CliArgs::new().with("outputFile", Value::Null);
        let merged = ArgMerger::merge(raw, &args);
        assert_eq!(merged["outputFile"], json!("out.json"));
    }

    #[test]
    fn test_every_key_accumulates() {
        let args = CliArgs::new()
            .with("verbose", true)
            .with("detectLeaks", true)
            .with("outputFile", "results.json");

        let merged = ArgMerger::merge(Options::new(), &args);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_positional_and_patterns() {
        let args = CliArgs::new()
            .with("_", json!(["foo", 42]))
            .with("testPathPattern", "baz");

        assert_eq!(args.positional(), vec!["foo".to_string(), "42".to_string()]);
        assert_eq!(args.test_path_patterns(), vec!["baz".to_string()]);
        assert!(CliArgs::new().positional().is_empty());
    }

    #[test]
    fn test_config_path() {
        let args = CliArgs::new().with("config", "custom.yaml");
        assert_eq!(args.config_path(), Some(PathBuf::from("custom.yaml")));
        assert_eq!(CliArgs::new().with("config", "").config_path(), None);
    }

    #[test]
    fn test_deserialize_from_json() {
        let args: CliArgs =
            serde_json::from_value(json!({"_": ["mytest"], "env": "node"})).unwrap();
        assert_eq!(args.positional(), vec!["mytest".to_string()]);
    }
}
