//! Common test utilities for integration tests.
//!
//! Provides a temporary directory tree builder for laying out repositories
//! with configuration files at chosen depths.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory tree that is removed when dropped.
pub struct ConfigTree {
    /// Kept alive for the duration of the test.
    #[allow(dead_code)]
    temp_dir: TempDir,
    root: PathBuf,
}

#[allow(dead_code)]
impl ConfigTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// The tree's root directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create a directory (and its parents) under the root.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.root.join(relative);
        fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Write a file under the root, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// True if some ancestor of the tree carries a marker file, which would
    /// make "not found" assertions meaningless on this machine.
    pub fn ancestors_have_marker(&self) -> bool {
        self.root.ancestors().skip(1).any(|dir| {
            dir.join(best_config::path::BEST_CONFIG).is_file()
                || dir.join(best_config::path::PACKAGE_JSON).is_file()
        })
    }
}
