//! Platform-specific application paths.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{BeancError, Result};

/// Application directory paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Configuration directory (config.toml lives here).
    pub config_dir: PathBuf,
    /// Data directory (connections.json lives here).
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Resolve the platform-appropriate directories.
    ///
    /// # Errors
    ///
    /// Returns error when no home directory can be determined.
    pub fn resolve() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "beancounter", "beanc")
            .ok_or_else(|| BeancError::Config("could not determine home directory".to_string()))?;

        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Path to the OAuth client configuration file.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to the connection store.
    #[must_use]
    pub fn connections_file(&self) -> PathBuf {
        self.data_dir.join("connections.json")
    }
}
