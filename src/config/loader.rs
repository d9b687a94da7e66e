//! Configuration file loading and saving

use super::file::{AnalysisConfig, CONFIG_FILE_NAME};
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .deadweight.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use deadweight::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Fallback policy: {:?}", config.fallback);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(dir: &Path) -> Result<AnalysisConfig> {
        Self::load_with_fs(dir, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(dir: &Path, fs: &FS) -> Result<AnalysisConfig> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                return Ok(AnalysisConfig::default());
            }
            Err(e) => {
                return Err(e).context("Failed to read .deadweight.toml");
            }
        };

        let config: AnalysisConfig =
            toml_edit::de::from_str(&contents).context("Failed to parse .deadweight.toml")?;

        config
            .validate()
            .context("Invalid analysis configuration")?;

        Ok(config)
    }

    /// Save config to .deadweight.toml in the given directory
    pub fn save(config: &AnalysisConfig, dir: &Path) -> Result<()> {
        Self::save_with_fs(config, dir, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(config: &AnalysisConfig, dir: &Path, fs: &FS) -> Result<()> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&config_path, contents)
            .context("Failed to write .deadweight.toml")?;

        Ok(())
    }

    /// Check if config file exists in the directory
    pub fn exists(dir: &Path) -> bool {
        Self::exists_with_fs(dir, &RealFileSystem)
    }

    /// Check for the config file through a custom filesystem implementation
    pub fn exists_with_fs<FS: FileSystem>(dir: &Path, fs: &FS) -> bool {
        fs.exists(&dir.join(CONFIG_FILE_NAME))
    }
}
