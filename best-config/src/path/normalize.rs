//! Path normalization functions.
//!
//! Normalization turns a user-supplied path into an absolute path with no
//! `.` or `..` components. It never touches the filesystem, so it works for
//! paths that do not exist yet and keeps symlinks as written.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand tilde (~) to the home directory.
///
/// Handles `~` and `~/path` but not `~user`.
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8, the home directory
/// cannot be determined, or the path uses `~user` syntax.
///
/// # Examples
///
/// ```
/// use best_config::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/bench")).unwrap();
/// assert!(expanded.is_absolute());
///
/// let expanded = expand_tilde(Path::new("/absolute")).unwrap();
/// assert_eq!(expanded, Path::new("/absolute"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        // Non-UTF-8 paths cannot start with a literal tilde we understand.
        return Ok(path.to_path_buf());
    };

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        Ok(home.join(&path_str[2..]))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Resolve `.` and `..` components lexically.
///
/// A `..` at the root stays at the root, so `/a/../..` is `/`. Leading
/// `..` components of a relative path are kept.
///
/// # Examples
///
/// ```
/// use best_config::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/repo/./fixtures/../src"));
/// assert_eq!(resolved, PathBuf::from("/repo/src"));
///
/// # #[cfg(unix)]
/// assert_eq!(resolve_components(Path::new("/repo/../../..")), PathBuf::from("/"));
/// ```
#[must_use]
pub fn resolve_components(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::RootDir => {
                result.push(component);
                has_root = true;
            }
            Component::Prefix(prefix) => {
                result.push(prefix.as_os_str());
                has_root = true;
            }
            Component::Normal(c) => result.push(c),
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => result.push(".."),
            },
        }
    }

    if has_root && result.as_os_str().is_empty() {
        result.push(Component::RootDir);
    }

    result
}

/// Normalize a path to absolute form relative to `cwd`.
///
/// 1. Expands a leading tilde
/// 2. Joins relative paths onto `cwd`
/// 3. Resolves `.` and `..` components
///
/// # Errors
///
/// Returns an error if tilde expansion fails.
///
/// # Examples
///
/// ```
/// use best_config::path::normalize::normalize;
/// use std::path::Path;
///
/// let normalized = normalize(Path::new("./fixtures"), Path::new("/repo")).unwrap();
/// assert_eq!(normalized, Path::new("/repo/fixtures"));
///
/// let normalized = normalize(Path::new("/a//b/../c"), Path::new("/repo")).unwrap();
/// assert_eq!(normalized, Path::new("/a/c"));
/// ```
pub fn normalize(path: &Path, cwd: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };

    Ok(resolve_components(&absolute))
}
