//! Option normalization.
//!
//! Turns merged options into [`NormalizedOptions`]: a mandatory absolute
//! `rootDir`, the defaults baseline underneath, and the fields derived from
//! the command line (`nonFlagArgs`, `testPathPattern`).

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use regex::Regex;
use serde_json::Value;

use crate::args::CliArgs;
use crate::config::defaults::default_options;
use crate::config::loader::{kind, ROOT_DIR_KEY};
use crate::config::Options;
use crate::error::{Error, Result};
use crate::path::normalize::normalize;

/// Name of the derived positional-arguments option.
pub const NON_FLAG_ARGS_KEY: &str = "nonFlagArgs";

/// Name of the derived test path pattern option.
pub const TEST_PATH_PATTERN_KEY: &str = "testPathPattern";

/// Fully merged and defaulted options.
///
/// Only [`Normalizer::normalize`] constructs this type, so every instance
/// has an absolute `rootDir`, a `nonFlagArgs` list, and a `testPathPattern`
/// that is empty or a valid regular expression.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOptions(Options);

impl NormalizedOptions {
    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The absolute root directory.
    #[must_use]
    pub fn root_dir(&self) -> PathBuf {
        self.0
            .get(ROOT_DIR_KEY)
            .and_then(Value::as_str)
            .map(PathBuf::from)
            .unwrap_or_default()
    }

    /// The combined test path pattern.
    #[must_use]
    pub fn test_path_pattern(&self) -> &str {
        self.0
            .get(TEST_PATH_PATTERN_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Borrow the underlying mapping.
    #[must_use]
    pub fn as_map(&self) -> &Options {
        &self.0
    }
}

/// Normalizes merged options.
pub struct Normalizer;

impl Normalizer {
    /// Normalize `merged` for a resolution running in `cwd`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRootDir`] if `rootDir` is absent,
    /// [`Error::Validation`] if it is not a string or the test path pattern
    /// is not a valid regular expression, and [`Error::InvalidPath`] if the
    /// root directory cannot be normalized.
    ///
    /// # Examples
    ///
    /// ```
    /// use best_config::config::Normalizer;
    /// use best_config::CliArgs;
    /// use serde_json::{json, Map};
    /// use std::path::Path;
    ///
    /// let mut merged = Map::new();
    /// merged.insert("rootDir".into(), json!("/repo//fixtures/"));
    ///
    /// let args = CliArgs::new().with("_", vec!["foo", "bar"]);
    /// let options = Normalizer::normalize(merged, &args, Path::new("/")).unwrap();
    ///
    /// assert_eq!(options.root_dir(), Path::new("/repo/fixtures"));
    /// assert_eq!(options.test_path_pattern(), "foo|bar");
    /// ```
    pub fn normalize(mut merged: Options, args: &CliArgs, cwd: &Path) -> Result<NormalizedOptions> {
        let root_dir = Self::normalize_root_dir(&merged, cwd)?;
        merged.insert(
            ROOT_DIR_KEY.to_string(),
            Value::String(root_dir.to_string_lossy().into_owned()),
        );

        let mut options = default_options(cwd);
        for (key, value) in merged {
            // An explicit null, such as an empty YAML key, keeps the default.
            if value.is_null() && options.contains_key(&key) {
                continue;
            }
            options.insert(key, value);
        }

        let positional = args.positional();
        let test_path_pattern = build_test_path_pattern(&positional, &args.test_path_patterns());
        validate_pattern(&test_path_pattern)?;

        options.insert(NON_FLAG_ARGS_KEY.to_string(), Value::from(positional));
        options.insert(
            TEST_PATH_PATTERN_KEY.to_string(),
            Value::String(test_path_pattern),
        );

        Ok(NormalizedOptions(options))
    }

    fn normalize_root_dir(merged: &Options, cwd: &Path) -> Result<PathBuf> {
        match merged.get(ROOT_DIR_KEY) {
            None | Some(Value::Null) => Err(Error::MissingRootDir {
                option: ROOT_DIR_KEY.to_string(),
            }),
            Some(Value::String(root)) => normalize(Path::new(root), cwd),
            Some(other) => Err(Error::Validation {
                field: ROOT_DIR_KEY.to_string(),
                message: format!("expected a path string, found {}", kind(other)),
            }),
        }
    }
}

/// Join positional arguments and explicit patterns into one alternation.
///
/// # Examples
///
/// ```
/// use best_config::config::normalizer::build_test_path_pattern;
///
/// let positional = vec!["foo".to_string(), "bar".to_string()];
/// let explicit = vec!["baz".to_string()];
/// # #[cfg(unix)]
/// assert_eq!(build_test_path_pattern(&positional, &explicit), "foo|bar|baz");
/// assert_eq!(build_test_path_pattern(&[], &[]), "");
/// ```
#[must_use]
pub fn build_test_path_pattern(positional: &[String], explicit: &[String]) -> String {
    positional
        .iter()
        .chain(explicit)
        .map(String::as_str)
        .map(replace_path_sep_for_regex)
        .collect::<Vec<_>>()
        .join("|")
}

/// Make the platform path separator safe to use inside a regex.
///
/// On Unix this is the identity. On Windows forward slashes and lone
/// backslashes become escaped backslashes, while backslashes that already
/// escape a regex metacharacter are kept.
#[must_use]
pub fn replace_path_sep_for_regex(entry: &str) -> String {
    replace_sep_for_regex(entry, MAIN_SEPARATOR)
}

fn replace_sep_for_regex(entry: &str, separator: char) -> String {
    if separator != '\\' {
        return entry.to_string();
    }

    let mut out = String::with_capacity(entry.len());
    let mut chars = entry.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '/' => out.push_str(r"\\"),
            '\\' => match chars.peek() {
                Some(&next) if is_regex_meta(next) => {
                    out.push('\\');
                    out.push(next);
                    chars.next();
                }
                _ => out.push_str(r"\\"),
            },
            other => out.push(other),
        }
    }
    out
}

fn is_regex_meta(c: char) -> bool {
    matches!(
        c,
        '[' | ']' | '{' | '}' | '(' | ')' | '*' | '+' | '?' | '.' | '^' | '$' | '|' | '\\'
    )
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        return Ok(());
    }
    Regex::new(pattern).map(|_| ()).map_err(|e| Error::Validation {
        field: TEST_PATH_PATTERN_KEY.to_string(),
        message: e.to_string(),
    })
}
