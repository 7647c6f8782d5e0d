use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use super::interceptor::InterceptorConfig;
use super::logging::LoggingConfig;
use super::stats::StatsConfig;

const LOCAL_CONFIG_PATH: &str = "cube-cache.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/cube-cache/config.toml";

/// Main configuration structure for the cube cache monitor
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Hit-rate reporting (label, interval, sink)
    #[serde(default)]
    pub stats: StatsConfig,

    /// Cache-directory redirection for dataset opens
    #[serde(default)]
    pub interceptor: InterceptorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. cube-cache.toml in current directory
    /// 3. /etc/cube-cache/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(label) = overrides.cache_label {
            self.stats.cache_label = label;
        }
        if let Some(secs) = overrides.report_interval_secs {
            self.stats.report_interval_secs = secs;
        }
        if let Some(batches) = overrides.report_every_batches {
            self.stats.report_every_batches = Some(batches);
        }
        if let Some(root) = overrides.root_dir {
            self.interceptor.root_dir = root;
        }
        if let Some(cache) = overrides.cache_dir {
            self.interceptor.cache_dir = cache;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stats.report_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Report interval cannot be 0".to_string(),
            ));
        }

        if self.stats.report_every_batches == Some(0) {
            return Err(ConfigError::Validation(
                "Batch report cadence cannot be 0".to_string(),
            ));
        }

        if self.stats.cache_label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Cache label cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub cache_label: Option<String>,
    pub report_interval_secs: Option<u64>,
    pub report_every_batches: Option<u64>,
    pub root_dir: Option<String>,
    pub cache_dir: Option<String>,
    pub log_level: Option<String>,
}
