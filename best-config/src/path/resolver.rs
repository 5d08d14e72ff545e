//! Configuration source discovery.
//!
//! Given a path hint, find the file that configuration should be loaded
//! from: either the hint itself, or the nearest ancestor directory holding
//! a recognized marker file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::normalize::normalize;

/// Primary marker filename, checked first in every directory.
pub const BEST_CONFIG: &str = "best.config.yaml";

/// Package manifest filename, checked after the primary marker.
pub const PACKAGE_JSON: &str = "package.json";

/// Marker filenames in per-directory priority order.
const MARKERS: [&str; 2] = [BEST_CONFIG, PACKAGE_JSON];

/// Outcome of a configuration source search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSearch {
    /// The configuration source that was found.
    pub path: PathBuf,
    /// How many parent directories were visited above the starting point.
    pub hops: usize,
}

/// Resolve the configuration source for `hint`.
///
/// A relative `hint` is interpreted against `cwd`. If it names an existing
/// regular file, that file is returned. Otherwise the directory tree is
/// searched upward from `hint`.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`] if no marker exists between `hint` and
/// the filesystem root, or [`Error::InvalidPath`] if `hint` cannot be
/// normalized.
///
/// # Examples
///
/// ```no_run
/// use best_config::path::resolve_config_path;
/// use std::path::Path;
///
/// let found = resolve_config_path(Path::new("packages/app"), Path::new("/repo")).unwrap();
/// println!("using {}", found.path.display());
/// ```
pub fn resolve_config_path(hint: &Path, cwd: &Path) -> Result<ConfigSearch> {
    let absolute = normalize(hint, cwd)?;

    if is_file(&absolute) {
        log::debug!("using explicit config file {}", absolute.display());
        return Ok(ConfigSearch {
            path: absolute,
            hops: 0,
        });
    }

    search_upward(&absolute)
}

/// Walk from `start` towards the filesystem root looking for a marker file.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`] when the root is reached without a hit.
pub fn search_upward(start: &Path) -> Result<ConfigSearch> {
    let mut current = start;
    let mut hops = 0;

    loop {
        log::debug!("searching for config in {}", current.display());

        if let Some(path) = MARKERS
            .iter()
            .map(|marker| current.join(marker))
            .find(|candidate| is_file(candidate))
        {
            log::debug!("found config {} after {hops} hop(s)", path.display());
            return Ok(ConfigSearch { path, hops });
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
                hops += 1;
            }
            _ => {
                return Err(Error::ConfigNotFound {
                    start: start.to_path_buf(),
                })
            }
        }
    }
}

/// True if `path` exists and is not a directory.
fn is_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| !meta.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_file_returned_directly() {
        let temp_dir = TempDir::new().unwrap();
        let custom = temp_dir.path().join("custom.json");
        fs::write(&custom, "not even parsed").unwrap();

        let found = resolve_config_path(&custom, Path::new("/")).unwrap();
        assert_eq!(found.path, custom);
        assert_eq!(found.hops, 0);
    }

    #[test]
    fn test_relative_hint_resolved_against_cwd() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("other.yaml"), "rootDir: .\n").unwrap();

        let found = resolve_config_path(Path::new("other.yaml"), temp_dir.path()).unwrap();
        assert_eq!(found.path, temp_dir.path().join("other.yaml"));
    }

    #[test]
    fn test_marker_in_start_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(BEST_CONFIG), "{}\n").unwrap();

        let found = resolve_config_path(temp_dir.path(), Path::new("/")).unwrap();
        assert_eq!(found.path, temp_dir.path().join(BEST_CONFIG));
        assert_eq!(found.hops, 0);
    }

    #[test]
    fn test_primary_marker_beats_manifest() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(PACKAGE_JSON), "{}").unwrap();
        fs::write(temp_dir.path().join(BEST_CONFIG), "{}\n").unwrap();

        let found = search_upward(temp_dir.path()).unwrap();
        assert_eq!(found.path, temp_dir.path().join(BEST_CONFIG));
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let temp_dir = TempDir::new().unwrap();
        let pkg = temp_dir.path().join("pkgA");
        let src = pkg.join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(temp_dir.path().join(BEST_CONFIG), "{}\n").unwrap();
        fs::write(pkg.join(PACKAGE_JSON), "{}").unwrap();

        let found = search_upward(&src).unwrap();
        assert_eq!(found.path, pkg.join(PACKAGE_JSON));
        assert_eq!(found.hops, 1);
    }

    #[test]
    fn test_descendant_markers_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let child = temp_dir.path().join("child");
        fs::create_dir_all(&child).unwrap();
        fs::write(child.join(BEST_CONFIG), "{}\n").unwrap();
        fs::write(temp_dir.path().join(BEST_CONFIG), "{}\n").unwrap();

        let found = search_upward(temp_dir.path()).unwrap();
        assert_eq!(found.path, temp_dir.path().join(BEST_CONFIG));
    }

    #[test]
    fn test_directory_named_like_marker_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let inner = temp_dir.path().join("inner");
        fs::create_dir_all(inner.join(BEST_CONFIG)).unwrap();
        fs::write(temp_dir.path().join(PACKAGE_JSON), "{}").unwrap();

        let found = search_upward(&inner).unwrap();
        assert_eq!(found.path, temp_dir.path().join(PACKAGE_JSON));
    }

    #[test]
    fn test_root_without_marker_fails() {
        // The filesystem root of a test machine should not carry a marker.
        let root = Path::new("/");
        if root.join(BEST_CONFIG).exists() || root.join(PACKAGE_JSON).exists() {
            eprintln!("skipping: / carries a config marker on this machine");
            return;
        }
        let err = search_upward(root).unwrap_err();
        assert!(err.is_not_found());
    }
}
