//! CLI configuration file

use std::path::{Path, PathBuf};

use graphreel_core::AnimationConfig;
use serde::{Deserialize, Serialize};

/// Get default config file path
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("graphreel")
        .join("config.toml")
}

/// Configuration stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl Config {
    /// Load the config file, falling back to defaults if it is missing or
    /// unreadable
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!("Cannot read config {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Invalid config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        AnimationConfig::keys()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.animation.get(key)
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.animation.set(key, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("steps", "21").unwrap();
        config.set("resolution", "1024x768").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path);
        assert_eq!(loaded.animation, config.animation);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[animation]\nresolution = \"huge\"\n").unwrap();

        let loaded = Config::load(&path);
        assert_eq!(loaded.animation, AnimationConfig::default());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load(&dir.path().join("absent.toml"));
        assert_eq!(loaded.animation, AnimationConfig::default());
    }
}
