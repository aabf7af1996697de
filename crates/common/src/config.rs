//! Application configuration.

use crate::error::{FramegrabError, FramegrabResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default capture settings.
    pub capture: CaptureDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default capture parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureDefaults {
    /// Directory where captured frames are written.
    pub output_dir: PathBuf,

    /// Optional deadline for a single capture call, in milliseconds.
    /// `None` blocks until the native API returns.
    pub timeout_ms: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "framegrab=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capture: CaptureDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CaptureDefaults {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            timeout_ms: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location.
    ///
    /// A missing file yields the defaults; an unreadable or malformed file
    /// is an error rather than a silent fallback.
    pub fn try_load() -> FramegrabResult<Self> {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> FramegrabResult<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            FramegrabError::config(format!("invalid config at {}: {}", path.display(), e))
        })
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("framegrab").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_block_without_deadline() {
        let config = AppConfig::default();
        assert!(config.capture.timeout_ms.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn config_roundtrips_through_json() {
        let mut config = AppConfig::default();
        config.capture.timeout_ms = Some(2500);
        config.logging.level = "debug".to_string();

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.capture.timeout_ms, Some(2500));
        assert_eq!(parsed.logging.level, "debug");
    }

    #[test]
    fn malformed_config_file_is_a_config_error() {
        let dir = std::env::temp_dir().join("framegrab-config-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}-bad.json", std::process::id()));
        std::fs::write(&path, b"{ not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, FramegrabError::Config { .. }));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn valid_config_file_loads_from_path() {
        let dir = std::env::temp_dir().join("framegrab-config-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}-good.json", std::process::id()));

        let mut config = AppConfig::default();
        config.capture.timeout_ms = Some(750);
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.capture.timeout_ms, Some(750));

        std::fs::remove_file(&path).ok();
    }
}
