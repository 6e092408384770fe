//! Configuration - Console settings from an optional TOML file
//!
//! Path resolution: `$SENTINEL_CONFIG` override, then the XDG config dir.
//! A missing file means defaults; only an unreadable or malformed file is an
//! error. API keys are never stored here, only the env var that names them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Env var that overrides the config file path
pub const CONFIG_PATH_ENV: &str = "SENTINEL_CONFIG";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Relay settings for the intelligence core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelConfig {
    /// Endpoint base URL
    pub base_url: String,

    /// Model identifier appended to the generate path
    pub model: String,

    /// Name of the env var holding the API key
    pub api_key_env: String,

    /// Sampling temperature
    pub temperature: f64,

    /// Nucleus sampling cutoff
    pub top_p: f64,
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-pro-preview".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            temperature: 0.7,
            top_p: 0.95,
        }
    }
}

/// Top-level console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelConfig {
    /// Generator tick interval in milliseconds
    pub tick_interval_ms: u64,

    /// Relay settings
    pub intel: IntelConfig,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: crate::telemetry::DEFAULT_TICK_INTERVAL_MS,
            intel: IntelConfig::default(),
        }
    }
}

impl SentinelConfig {
    /// Load from the resolved path, defaults when no file exists
    pub fn load() -> Result<Self, ConfigError> {
        match Self::resolve_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Config file path: env override first, then XDG config dir
    pub fn resolve_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("sentinel").join("config.toml"))
    }
}
