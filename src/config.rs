//! Dashboard configuration
//!
//! Settings are read from `config.toml` in the querydash config directory.
//! A missing file yields defaults; query state itself is never persisted.

use crate::backend::mock::DEFAULT_MOCK_LATENCY;
use crate::submission::CompletionPolicy;
use crate::tea::DEFAULT_SUGGESTIONS;
use crate::theme::ThemeMode;
use crate::ui::ChartStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to determine config directory")]
    NoConfigDir,

    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Mock backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub latency_ms: u64,
    pub failure_rate: f32,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_MOCK_LATENCY.as_millis() as u64,
            failure_rate: 0.0,
        }
    }
}

/// Look and feel settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceSettings {
    pub theme: ThemeMode,
    pub chart_style: ChartStyle,
}

/// Complete dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Queries offered in the suggestion dropdown
    pub suggestions: Vec<String>,

    /// Quiet period before the typing indicator clears
    pub typing_debounce_ms: u64,

    /// Delay before suggestions hide after the input loses focus
    pub blur_grace_ms: u64,

    /// Whether the suggestion dropdown opens on focus
    pub show_suggestions: bool,

    /// Stored for the settings panel; no refresh loop reads it yet
    pub auto_refresh: bool,

    pub completion_policy: CompletionPolicy,
    pub backend: BackendSettings,
    pub appearance: AppearanceSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            typing_debounce_ms: 500,
            blur_grace_ms: 200,
            show_suggestions: true,
            auto_refresh: true,
            completion_policy: CompletionPolicy::default(),
            backend: BackendSettings::default(),
            appearance: AppearanceSettings::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the default location or `config_dir`
    pub fn load(config_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let path = Self::config_file_path(config_dir)?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DashboardConfig = toml::from_str(&content)?;
        config.validate()?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the path to the configuration file
    pub fn config_file_path(config_dir: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let dir = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => dirs::config_dir()
                .ok_or(ConfigError::NoConfigDir)?
                .join("querydash"),
        };
        Ok(dir.join(CONFIG_FILE_NAME))
    }

    /// Reject settings the dashboard cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.backend.failure_rate) {
            return Err(ConfigError::Invalid {
                field: "backend.failure_rate",
                reason: format!("{} is outside 0.0..=1.0", self.backend.failure_rate),
            });
        }
        if self.typing_debounce_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "typing_debounce_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        // A zero grace would hide the panel before a selection lands
        if self.blur_grace_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "blur_grace_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn typing_debounce(&self) -> Duration {
        Duration::from_millis(self.typing_debounce_ms)
    }

    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }

    pub fn backend_latency(&self) -> Duration {
        Duration::from_millis(self.backend.latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig::load(Some(dir.path())).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = DashboardConfig::config_file_path(Some(dir.path())).unwrap();

        let mut config = DashboardConfig::default();
        config.blur_grace_ms = 300;
        config.completion_policy = CompletionPolicy::LatestOnly;
        config.appearance.theme = ThemeMode::Dark;
        config.save_to(&path).unwrap();

        let loaded = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "typing_debounce_ms = 250\ncompletion_policy = \"latest_only\"\n\n[backend]\nlatency_ms = 10\n",
        )
        .unwrap();

        let config = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(config.typing_debounce(), Duration::from_millis(250));
        assert_eq!(config.completion_policy, CompletionPolicy::LatestOnly);
        assert_eq!(config.backend.latency_ms, 10);
        assert_eq!(config.backend.failure_rate, 0.0);
        assert_eq!(config.blur_grace_ms, 200);
    }

    #[test]
    fn test_invalid_failure_rate_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[backend]\nfailure_rate = 1.5\n").unwrap();

        let err = DashboardConfig::load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "backend.failure_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "blur_grace_ms = \"lots\"").unwrap();

        assert!(matches!(
            DashboardConfig::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
