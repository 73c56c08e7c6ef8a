//! Temporary config files.
//!
//! [`TestConfigFile`] writes a TOML document into a fresh temp directory so
//! tests can exercise the async load path end to end.

use std::path::PathBuf;

use aeos_config::{AppConfig, ConfigError};
use tempfile::TempDir;

/// A TOML config file living in its own temp directory.
///
/// The directory is deleted when this value is dropped, even on panic.
pub struct TestConfigFile {
    pub path: PathBuf,
    _temp_dir: TempDir,
}

impl TestConfigFile {
    /// Write `toml_content` to `<tempdir>/aeos.toml`.
    pub async fn with_toml(toml_content: &str) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("aeos.toml");
        tokio::fs::write(&path, toml_content)
            .await
            .expect("failed to write test config");

        Self {
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Load the file through [`AppConfig::load`].
    pub async fn load(&self) -> Result<AppConfig, ConfigError> {
        AppConfig::load(&self.path).await
    }

    /// Overwrite the file with new content.
    pub async fn rewrite(&self, toml_content: &str) {
        tokio::fs::write(&self.path, toml_content)
            .await
            .expect("failed to rewrite test config");
    }
}
