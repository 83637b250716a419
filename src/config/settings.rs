use std::path::PathBuf;

use serde::Deserialize;

use crate::utils::constants::{
    DEFAULT_LOG_LEVEL, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_TOKEN_CACHE_DIR, TOKEN_CACHE_DIR_SUFFIX,
};

/// ================================
/// Plugin-wide settings, resolved from the environment
/// ================================
#[derive(Debug, Clone)]
pub struct PluginSettings {
    pub logging: LoggingConfig,
    pub token_cache_dir: PathBuf,
}

impl PluginSettings {
    pub fn from_env() -> Self {
        Self {
            logging: LoggingConfig::from_env(),
            token_cache_dir: std::env::var(ENV_TOKEN_CACHE_DIR)
                .ok()
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_token_cache_dir),
        }
    }
}

/// `~/.kube/cache/oidc-login`, falling back to a relative path when home is unknown
pub fn default_token_cache_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(TOKEN_CACHE_DIR_SUFFIX))
        .unwrap_or_else(|| PathBuf::from(TOKEN_CACHE_DIR_SUFFIX))
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }

    pub fn from_env() -> Self {
        let level = std::env::var(ENV_LOG_LEVEL)
            .ok()
            .map(|level| level.to_lowercase())
            .filter(|level| !level.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned());
        Self::new(level, LogFormat::from_env())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var(ENV_LOG_FORMAT)
            .unwrap_or_else(|_| "compact".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}
