use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default window for telling a double activation from two single ones
pub const DEFAULT_DOUBLE_ACTIVATION_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config file at {config_path}: {reason}")]
    Invalid { config_path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Worksheet opened when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worksheet_path: Option<PathBuf>,

    #[serde(default = "default_double_activation_ms")]
    pub double_activation_ms: u64,
}

fn default_double_activation_ms() -> u64 {
    DEFAULT_DOUBLE_ACTIVATION_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worksheet_path: None,
            double_activation_ms: DEFAULT_DOUBLE_ACTIVATION_MS,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if config.double_activation_ms == 0 {
            return Err(ConfigError::Invalid {
                config_path: config_path.to_path_buf(),
                reason: "double_activation_ms must be greater than zero".to_string(),
            });
        }

        // Expand shell variables and tilde in the worksheet path
        config.worksheet_path = config
            .worksheet_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/chunkwise");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn double_activation_window(&self) -> Duration {
        Duration::from_millis(self.double_activation_ms)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
