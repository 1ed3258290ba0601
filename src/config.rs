use crate::color_state::CenterSwitch;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    #[serde(default)]
    pub center_switch: CenterSwitch,
    #[serde(default = "default_log_retention")]
    pub log_retention_count: usize,
    #[serde(default)]
    pub stream_logs: bool,
}

fn default_log_retention() -> usize {
    10
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            center_switch: CenterSwitch::default(),
            log_retention_count: default_log_retention(),
            stream_logs: false,
        }
    }
}

pub struct Config {
    config_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl Config {
    /// Use the platform config directory, e.g. `~/.config/ColorMine`.
    pub fn new() -> Result<Self> {
        let base = dirs::config_dir().context("Failed to locate the user config directory")?;
        Self::with_dir(base.join("ColorMine"))
    }

    /// Settings live in `<dir>/config.json`, session logs in `<dir>/logs`.
    pub fn with_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let logs_dir = dir.join("logs");

        fs::create_dir_all(&logs_dir)
            .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

        Ok(Self {
            config_path: dir.join("config.json"),
            logs_dir,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Missing file means defaults.
    pub fn load(&self) -> Result<PickerConfig> {
        let content = match fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(PickerConfig::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.config_path.display()))
            }
        };

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", self.config_path.display()))
    }

    pub fn save(&self, settings: &PickerConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.config_path, json)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_directories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("colormine");
        let config = Config::with_dir(&root).unwrap();
        assert!(config.logs_dir.is_dir());
        assert_eq!(config.logs_dir, root.join("logs"));
        assert_eq!(config.config_path(), root.join("config.json"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_dir(dir.path()).unwrap();
        assert_eq!(config.load().unwrap(), PickerConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_dir(dir.path()).unwrap();
        let settings = PickerConfig {
            center_switch: CenterSwitch::Symmetric,
            log_retention_count: 3,
            stream_logs: true,
        };
        config.save(&settings).unwrap();
        assert_eq!(config.load().unwrap(), settings);
    }

    #[test]
    fn test_saving_policy_keeps_other_settings() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_dir(dir.path()).unwrap();
        fs::write(config.config_path(), r#"{ "log_retention_count": 4 }"#).unwrap();

        let mut settings = config.load().unwrap();
        settings.center_switch = CenterSwitch::Symmetric;
        config.save(&settings).unwrap();

        let reloaded = Config::with_dir(dir.path()).unwrap().load().unwrap();
        assert_eq!(reloaded.center_switch, CenterSwitch::Symmetric);
        assert_eq!(reloaded.log_retention_count, 4);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_dir(dir.path()).unwrap();
        fs::write(config.config_path(), r#"{ "center_switch": "symmetric" }"#).unwrap();

        let loaded = config.load().unwrap();
        assert_eq!(loaded.center_switch, CenterSwitch::Symmetric);
        assert_eq!(loaded.log_retention_count, 10);
        assert!(!loaded.stream_logs);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_dir(dir.path()).unwrap();
        fs::write(config.config_path(), "not json").unwrap();

        let err = config.load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
