//! Discovery configuration.
//!
//! Loaded from YAML (typically `.schematics.yml` at the project root) or
//! built in code. Every field has a default, so an empty file is valid.
//!
//! # Example YAML
//!
//! ```yaml
//! package_dir: node_modules
//! reserved_names:
//!   - ng-add
//!   - init
//! exclude:
//!   - "@angular/cli"
//! jobs: 4
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::{InclusionPolicy, NG_ADD};

/// Directory, relative to the project base, holding installed packages.
pub const DEFAULT_PACKAGE_DIR: &str = "node_modules";

/// Errors loading or saving a [`DiscoverConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Settings for a discovery run.
///
/// # Examples
///
/// ```
/// use schematics_discovery::config::DiscoverConfig;
///
/// let config: DiscoverConfig = serde_yaml::from_str("exclude: [lodash]").unwrap();
/// assert_eq!(config.package_dir, "node_modules");
/// assert_eq!(config.reserved_names, vec!["ng-add"]);
/// assert!(config.is_excluded("lodash"));
/// assert_eq!(config.jobs, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverConfig {
    /// Package directory, relative to the project base.
    pub package_dir: String,
    /// Generator names that are never user-facing.
    pub reserved_names: Vec<String>,
    /// Packages never inspected.
    pub exclude: Vec<String>,
    /// Worker threads for resolving collections (`None` or `1` = sequential).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            package_dir: DEFAULT_PACKAGE_DIR.to_string(),
            reserved_names: vec![NG_ADD.to_string()],
            exclude: Vec::new(),
            jobs: None,
        }
    }
}

impl DiscoverConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be written, or
    /// [`ConfigError::Yaml`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Returns `true` if `package` is in the exclusion list.
    pub fn is_excluded(&self, package: &str) -> bool {
        self.exclude.iter().any(|p| p == package)
    }

    /// Builds the inclusion policy for these settings.
    pub fn inclusion_policy(&self) -> InclusionPolicy {
        InclusionPolicy::new(self.reserved_names.iter().cloned())
    }

    /// Effective worker count, at least one.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or(1).max(1)
    }
}
