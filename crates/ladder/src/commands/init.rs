//! Implementation of the `init` command.
//!
//! Creates the `.ladder/` directory with a default configuration and one
//! empty JSONL file per catalog collection.

use crate::catalog::{
    POSITIONS_FILE_NAME, SKILLS_FILE_NAME, TRANSITIONS_FILE_NAME, VIEWERS_FILE_NAME,
};
use crate::config::{CONFIG_FILE_NAME, LADDER_DIR_NAME, LadderConfig};
use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Catalog files created empty by [`init`].
pub const CATALOG_FILE_NAMES: [&str; 4] = [
    POSITIONS_FILE_NAME,
    SKILLS_FILE_NAME,
    TRANSITIONS_FILE_NAME,
    VIEWERS_FILE_NAME,
];

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created ladder directory
    pub ladder_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Paths of the created catalog files
    pub catalog_files: Vec<PathBuf>,
}

/// Initialize a new ladder repository in `base_dir`.
///
/// # Errors
///
/// Returns `ConfigError::AlreadyInitialized` if `.ladder/` already exists,
/// or an IO error if a file cannot be created.
pub async fn init(base_dir: &Path) -> Result<InitResult> {
    let ladder_dir = base_dir.join(LADDER_DIR_NAME);

    if ladder_dir.exists() {
        return Err(ConfigError::AlreadyInitialized(ladder_dir.display().to_string()).into());
    }

    fs::create_dir_all(&ladder_dir).await?;

    let config_file = ladder_dir.join(CONFIG_FILE_NAME);
    LadderConfig::default().save(&config_file).await?;

    let mut catalog_files = Vec::with_capacity(CATALOG_FILE_NAMES.len());
    for name in CATALOG_FILE_NAMES {
        let path = ladder_dir.join(name);
        fs::write(&path, "").await?;
        catalog_files.push(path);
    }

    tracing::debug!(dir = %ladder_dir.display(), "Initialized ladder repository");

    Ok(InitResult {
        ladder_dir,
        config_file,
        catalog_files,
    })
}

/// Check if a directory has been initialized.
#[must_use]
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(LADDER_DIR_NAME).exists()
}
