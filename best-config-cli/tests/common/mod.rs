//! Common test utilities for CLI integration tests.
//!
//! Provides an isolated directory tree and a command builder that runs the
//! `best-config` binary inside it.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment rooted in a temporary directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder running inside the environment.
    ///
    /// `BEST_CONFIG` and `BEST_LOG_MODE` are cleared so the caller's shell
    /// cannot leak into the test.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("best-config").expect("Failed to find best-config binary");
        cmd.current_dir(&self.temp_path)
            .env_remove("BEST_CONFIG")
            .env_remove("BEST_LOG_MODE");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Write a file, creating parent directories.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Run `show` with extra arguments and parse the JSON report.
    pub fn show_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.command().arg("show").args(args).output().unwrap();
        assert!(
            output.status.success(),
            "show failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("show did not print JSON")
    }

    /// True if an ancestor of the environment carries a config marker.
    pub fn ancestors_have_marker(&self) -> bool {
        self.temp_path.ancestors().skip(1).any(|dir| {
            dir.join("best.config.yaml").is_file() || dir.join("package.json").is_file()
        })
    }
}
