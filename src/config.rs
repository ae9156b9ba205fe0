use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::models::RunnerLevel;

/// Application configuration, persisted as TOML in the user config directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Runner level assumed when the caller supplies no profile
    pub default_level: Option<RunnerLevel>,

    /// Logging setup used by the CLI
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Default configuration file location
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .context("Could not determine the user configuration directory")?;
        Ok(base.join("solorun").join("config.toml"))
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid configuration file {}", path.display()))
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load_or_default() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a specific file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogFormat, LogLevel};

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.default_level = Some(RunnerLevel::Beginner);
        config.log.level = LogLevel::Debug;
        config.log.format = LogFormat::Json;

        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded.default_level, Some(RunnerLevel::Beginner));
        assert_eq!(loaded.log.level, LogLevel::Debug);
        assert_eq!(loaded.log.format, LogFormat::Json);
    }

    #[test]
    fn test_missing_log_section_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_level = \"intermediate\"\n").unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.default_level, Some(RunnerLevel::Intermediate));
        assert_eq!(loaded.log.level, LogLevel::Info);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_level = 42\n").unwrap();

        assert!(AppConfig::load_from_file(&path).is_err());
    }
}
