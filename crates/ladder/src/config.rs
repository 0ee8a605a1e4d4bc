//! Repository configuration stored in `.ladder/config.yaml`.
//!
//! ```yaml
//! data-dir: .ladder
//! layout:
//!   horizontal-spacing: 300.0
//!   vertical-spacing: 200.0
//! ```
//!
//! Every key is optional; absent keys take their defaults.

use crate::error::{ConfigError, Result};
use crate::layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the ladder directory
pub const LADDER_DIR_NAME: &str = ".ladder";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Maximum directory depth to traverse when searching for the ladder root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

fn default_data_dir() -> String {
    LADDER_DIR_NAME.to_string()
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LadderConfig {
    /// Directory holding the catalog JSONL files, relative to the repository root
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Layout spacing
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            layout: LayoutConfig::default(),
        }
    }
}

impl LadderConfig {
    /// Load and validate configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Config` if it
    /// does not parse or holds invalid values.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails and `Error::Io` if the
    /// file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty data directory or
    /// unusable spacing.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data-dir",
                reason: "must not be empty".to_string(),
            });
        }
        self.layout.validate()
    }

    /// Absolute location of the catalog files for a repository root.
    #[must_use]
    pub fn data_path(&self, root_dir: &Path) -> PathBuf {
        root_dir.join(&self.data_dir)
    }
}

/// Find the ladder root directory by searching up the directory tree.
///
/// Returns the directory containing `.ladder/`, or `None` if none is found
/// before the filesystem root or the traversal limit.
#[must_use]
pub fn find_ladder_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(LADDER_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
