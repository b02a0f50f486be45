//! Configuration management for travel-auth.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::MockConfig;
use crate::cli::Args;
use crate::session::DEFAULT_AVATAR_URL;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session storage configuration.
    pub storage: StorageSection,
    /// Mock backend configuration.
    pub backend: BackendSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Session storage section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// JSON file holding the session keys.
    pub data_file: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_file: "travel-auth-session.json".to_string(),
        }
    }
}

/// Mock backend section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSection {
    /// Simulated round-trip delay in milliseconds.
    pub latency_ms: u64,
    /// Avatar for accounts that do not come from a provider.
    pub default_avatar: String,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            latency_ms: 1000,
            default_avatar: DEFAULT_AVATAR_URL.to_string(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("TRAVEL_AUTH_DATA_FILE") {
            if !path.is_empty() {
                self.storage.data_file = path;
            }
        }

        if let Some(latency) = var("TRAVEL_AUTH_LATENCY_MS") {
            if let Ok(latency) = latency.parse() {
                self.backend.latency_ms = latency;
            }
        }

        if let Some(level) = var("TRAVEL_AUTH_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref path) = args.data_file {
            self.storage.data_file = path.display().to_string();
        }

        if let Some(latency) = args.latency_ms {
            self.backend.latency_ms = latency;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        config.apply_env();
        config.apply_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Reject values that cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "storage.data_file",
                self.storage.data_file.clone(),
            ));
        }
        Ok(())
    }

    /// Path of the session file.
    pub fn data_file(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_file)
    }

    /// Convert to the mock backend settings.
    pub fn mock_config(&self) -> MockConfig {
        MockConfig {
            latency: Duration::from_millis(self.backend.latency_ms),
            default_avatar: self.backend.default_avatar.clone(),
        }
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// A setting has an unusable value.
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidValue(name, value) => write!(f, "invalid value for {}: '{}'", name, value),
        }
    }
}

impl std::error::Error for ConfigError {}
