//! Qlance configuration loaded from `qlance.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! `QLANCE_STATE_FILE` takes precedence over the file for the snapshot path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::QlanceError;

#[derive(Debug, Clone, Deserialize)]
pub struct QlanceConfig {
    /// Where the local host keeps the contract snapshot.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Base `tracing` level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `compact` or `json`.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_state_file() -> PathBuf {
    PathBuf::from("qlance_state.json")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for QlanceConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl QlanceConfig {
    /// Load `qlance.toml` from the current directory.
    pub fn load() -> Result<Self, QlanceError> {
        Self::load_from(Path::new("qlance.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self, QlanceError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<QlanceConfig>(&contents)?
        } else {
            Self::default()
        };

        if let Ok(state_file) = std::env::var("QLANCE_STATE_FILE")
            && !state_file.is_empty()
        {
            config.state_file = PathBuf::from(state_file);
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), QlanceError> {
        if self.state_file.as_os_str().is_empty() {
            return Err(QlanceError::Config("state_file must not be empty".into()));
        }
        if !matches!(
            self.log_format.to_lowercase().as_str(),
            "compact" | "json" | "jsonl"
        ) {
            return Err(QlanceError::Config(format!(
                "unknown log_format `{}` (expected compact or json)",
                self.log_format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = QlanceConfig::default();
        assert_eq!(config.state_file, PathBuf::from("qlance_state.json"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_format, "compact");
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            state_file = "/var/lib/qlance/state.json"
            log_level = "debug"
        "#;
        let config: QlanceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.state_file,
            PathBuf::from("/var/lib/qlance/state.json")
        );
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, "compact");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qlance.toml");
        std::fs::write(&path, "log_format = \"json\"\n").unwrap();

        let config = QlanceConfig::load_from(&path).unwrap();
        assert_eq!(config.log_format, "json");
    }

    #[test]
    fn load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qlance.toml");
        std::fs::write(&path, "log_level = [").unwrap();
        assert!(matches!(
            QlanceConfig::load_from(&path),
            Err(QlanceError::Toml(_))
        ));
    }

    #[test]
    fn load_rejects_unknown_log_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qlance.toml");
        std::fs::write(&path, "log_format = \"xml\"\n").unwrap();
        assert!(matches!(
            QlanceConfig::load_from(&path),
            Err(QlanceError::Config(_))
        ));
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = QlanceConfig::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.log_level, "warn");
    }
}
