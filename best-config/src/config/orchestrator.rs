//! Top-level configuration resolution.
//!
//! Runs discovery, loading, merging, normalization and partitioning for a
//! project, and enforces the single-project policy.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::args::CliArgs;
use crate::config::loader::ConfigLoader;
use crate::config::normalizer::Normalizer;
use crate::config::schema::{ConfigPartitioner, GlobalConfig, ProjectConfig};
use crate::error::{Error, Result};
use crate::path::resolve_config_path;
use crate::ArgMerger;

/// Snapshots resolved for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// The configuration source that was loaded.
    pub config_path: PathBuf,
    /// Run-wide snapshot.
    pub global_config: Arc<GlobalConfig>,
    /// Project snapshot.
    pub project_config: Arc<ProjectConfig>,
}

/// Snapshots for every project in scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Configs {
    /// Run-wide snapshot.
    pub global_config: Arc<GlobalConfig>,
    /// One snapshot per project; currently always exactly one.
    pub configs: Vec<Arc<ProjectConfig>>,
}

/// Resolves configuration relative to a working directory.
///
/// # Examples
///
/// ```no_run
/// use best_config::{CliArgs, ConfigResolver};
/// use std::path::PathBuf;
///
/// let resolver = ConfigResolver::new("/repo");
/// let args = CliArgs::new().with("_", vec!["mytest"]);
/// let configs = resolver.get_configs(&[PathBuf::from("/repo/pkgA")], &args).unwrap();
///
/// println!("runner: {}", configs.configs[0].runner);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    cwd: PathBuf,
}

impl ConfigResolver {
    /// Create a resolver for `cwd`.
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// Create a resolver for the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self::new(env::current_dir()?))
    }

    /// The working directory relative paths are resolved against.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Resolve the snapshots for the project at `package_root`.
    ///
    /// An explicit `config` entry in `args` takes the place of
    /// `package_root` as the search hint.
    ///
    /// # Errors
    ///
    /// Propagates any discovery, loading, or normalization error.
    pub fn read_config(&self, args: &CliArgs, package_root: &Path) -> Result<ResolvedConfig> {
        let hint = args
            .config_path()
            .unwrap_or_else(|| package_root.to_path_buf());

        let search = resolve_config_path(&hint, &self.cwd)?;
        log::info!("using config {}", search.path.display());

        let raw = ConfigLoader::load(&search.path)?;
        let merged = ArgMerger::merge(raw, args);
        let options = Normalizer::normalize(merged, args, &self.cwd)?;
        let (global_config, project_config) = ConfigPartitioner::partition(&options)?;

        Ok(ResolvedConfig {
            config_path: search.path,
            global_config,
            project_config,
        })
    }

    /// Resolve snapshots for the projects named on the command line.
    ///
    /// An empty `projects` list means the working directory. If the single
    /// project's configuration declares nested `projects`, those replace
    /// the list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedMultiProject`] if more than one project
    /// is in scope, before or after nested projects are applied, and
    /// propagates any error from [`ConfigResolver::read_config`].
    pub fn get_configs(&self, projects: &[PathBuf], args: &CliArgs) -> Result<Configs> {
        let project = match projects {
            [] => self.cwd.clone(),
            [single] => single.clone(),
            many => {
                return Err(Error::UnsupportedMultiProject { count: many.len() });
            }
        };

        let resolved = self.read_config(args, &project)?;

        let mut in_scope = vec![project];
        if !resolved.global_config.projects.is_empty() {
            log::debug!(
                "{} declares nested projects, replacing the command line list",
                resolved.config_path.display()
            );
            in_scope.clone_from(&resolved.global_config.projects);
        }

        if in_scope.len() > 1 {
            return Err(Error::UnsupportedMultiProject {
                count: in_scope.len(),
            });
        }

        Ok(Configs {
            global_config: resolved.global_config,
            configs: vec![resolved.project_config],
        })
    }
}

/// Resolve the snapshots for `package_root` from the process working
/// directory.
///
/// # Errors
///
/// See [`ConfigResolver::read_config`].
pub fn read_config(args: &CliArgs, package_root: &Path) -> Result<ResolvedConfig> {
    ConfigResolver::from_current_dir()?.read_config(args, package_root)
}

/// Resolve the snapshots for `projects` from the process working directory.
///
/// # Errors
///
/// See [`ConfigResolver::get_configs`].
pub fn get_configs(projects: &[PathBuf], args: &CliArgs) -> Result<Configs> {
    ConfigResolver::from_current_dir()?.get_configs(projects, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::BEST_CONFIG;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_two_cli_projects_rejected_before_reading() {
        let resolver = ConfigResolver::new("/does/not/matter");
        let projects = [PathBuf::from("/a"), PathBuf::from("/b")];

        let err = resolver.get_configs(&projects, &CliArgs::new()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedMultiProject { count: 2 }));
    }

    #[test]
    fn test_nested_projects_fan_out_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(BEST_CONFIG),
            "projects:\n  - ./a\n  - ./b\n",
        )
        .unwrap();

        let resolver = ConfigResolver::new(temp_dir.path());
        let err = resolver
            .get_configs(&[temp_dir.path().to_path_buf()], &CliArgs::new())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedMultiProject { count: 2 }));
    }

    #[test]
    fn test_single_nested_project_allowed() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(BEST_CONFIG), "projects: [./only]\n").unwrap();

        let resolver = ConfigResolver::new(temp_dir.path());
        let configs = resolver.get_configs(&[], &CliArgs::new()).unwrap();
        assert_eq!(configs.configs.len(), 1);
        assert_eq!(configs.global_config.projects, vec![PathBuf::from("./only")]);
    }

    #[test]
    fn test_explicit_config_overrides_package_root() {
        let temp_dir = TempDir::new().unwrap();
        let custom = temp_dir.path().join("custom.yaml");
        fs::write(&custom, "runner: best-runner-remote\n").unwrap();

        let resolver = ConfigResolver::new(temp_dir.path());
        let args = CliArgs::new().with("config", "custom.yaml");
        let resolved = resolver
            .read_config(&args, Path::new("/nonexistent/package/root"))
            .unwrap();

        assert_eq!(resolved.config_path, custom);
        assert_eq!(resolved.project_config.runner, "best-runner-remote");
    }
}
