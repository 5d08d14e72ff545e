//! Configuration source loading.
//!
//! Reads a discovered configuration file into a raw option mapping,
//! unwraps package manifests, and anchors `rootDir` to the file's
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::Options;
use crate::error::{Error, Result};
use crate::path::PACKAGE_JSON;

/// Key inside `package.json` that holds the configuration.
pub const MANIFEST_CONFIG_KEY: &str = "jest";

/// Name of the root directory option.
pub const ROOT_DIR_KEY: &str = "rootDir";

/// Data format of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// Strict JSON (`.json` files, including `package.json`).
    Json,
    /// YAML, which also accepts JSON-shaped documents.
    Yaml,
}

impl ConfigFormat {
    /// Pick the parser for `path` by its extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use best_config::config::ConfigFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(ConfigFormat::from_path(Path::new("package.json")), ConfigFormat::Json);
    /// assert_eq!(ConfigFormat::from_path(Path::new("best.config.yaml")), ConfigFormat::Yaml);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Parse `contents` into a JSON value tree.
    fn parse(self, contents: &str) -> std::result::Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
            Self::Yaml if contents.trim().is_empty() => Ok(Value::Object(Options::new())),
            Self::Yaml => match serde_yaml::from_str::<Value>(contents) {
                // An empty document is an empty configuration.
                Ok(Value::Null) => Ok(Value::Object(Options::new())),
                other => other.map_err(|e| e.to_string()),
            },
        }
    }
}

/// Loads raw options from a configuration source.
///
/// # Examples
///
/// ```no_run
/// use best_config::config::ConfigLoader;
/// use std::path::Path;
///
/// let options = ConfigLoader::load(Path::new("/repo/best.config.yaml")).unwrap();
/// assert!(options.contains_key("rootDir"));
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `path` and guarantee a `rootDir` entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigRead`] if the file cannot be read,
    /// [`Error::ConfigParse`] if it is malformed or not a mapping, and
    /// [`Error::Validation`] if `rootDir` is not a string.
    pub fn load(path: &Path) -> Result<Options> {
        let mut options = Self::load_file(path)?;

        if is_package_manifest(path) {
            options = Self::unwrap_manifest(path, options)?;
        }

        let config_dir = path.parent().map_or_else(|| PathBuf::from("/"), Path::to_path_buf);
        Self::set_root_dir(&mut options, &config_dir)?;
        Ok(options)
    }

    /// Read and parse a configuration file into a mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid mapping.
    pub fn load_file(path: &Path) -> Result<Options> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let format = ConfigFormat::from_path(path);
        log::debug!("loading {} as {format:?}", path.display());

        match format.parse(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(Error::ConfigParse {
                path: path.to_path_buf(),
                message: format!("expected a mapping at the top level, found {}", kind(&other)),
            }),
            Err(message) => Err(Error::ConfigParse {
                path: path.to_path_buf(),
                message,
            }),
        }
    }

    /// Keep only the compatibility section of a package manifest.
    fn unwrap_manifest(path: &Path, mut manifest: Options) -> Result<Options> {
        match manifest.remove(MANIFEST_CONFIG_KEY) {
            None | Some(Value::Null) => {
                log::debug!(
                    "{} has no '{MANIFEST_CONFIG_KEY}' section, using empty options",
                    path.display()
                );
                Ok(Options::new())
            }
            Some(Value::Object(section)) => Ok(section),
            Some(other) => Err(Error::ConfigParse {
                path: path.to_path_buf(),
                message: format!(
                    "'{MANIFEST_CONFIG_KEY}' must be a mapping, found {}",
                    kind(&other)
                ),
            }),
        }
    }

    /// Anchor `rootDir` to `config_dir` unless it is already absolute.
    fn set_root_dir(options: &mut Options, config_dir: &Path) -> Result<()> {
        let root_dir = match options.get(ROOT_DIR_KEY) {
            None | Some(Value::Null) => config_dir.to_path_buf(),
            Some(Value::String(root)) if Path::new(root).is_absolute() => return Ok(()),
            Some(Value::String(root)) => config_dir.join(root),
            Some(other) => {
                return Err(Error::Validation {
                    field: ROOT_DIR_KEY.to_string(),
                    message: format!("expected a path string, found {}", kind(other)),
                })
            }
        };

        options.insert(
            ROOT_DIR_KEY.to_string(),
            Value::String(root_dir.to_string_lossy().into_owned()),
        );
        Ok(())
    }
}

fn is_package_manifest(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == PACKAGE_JSON)
}

/// Human-readable name of a JSON value's type.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
