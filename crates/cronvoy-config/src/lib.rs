//! Configuration loading for cronvoy: API endpoints and credentials for the
//! scheduler service and the platform inventory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON5 parse error: {0}")]
    Json5(#[from] json5::Error),
    #[error("Config directory not found")]
    NoDirFound,
}

/// One remote API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// API root URL.
    pub api_url: String,
    /// Bearer token. Usually supplied via environment, not the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Top-level cronvoy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronvoyConfig {
    /// Scheduler service job API.
    #[serde(default = "default_scheduler_endpoint")]
    pub scheduler: EndpointConfig,
    /// Platform application inventory API.
    #[serde(default = "default_platform_endpoint")]
    pub platform: EndpointConfig,
}

fn default_scheduler_endpoint() -> EndpointConfig {
    EndpointConfig {
        api_url: "http://localhost:8935/v1".to_string(),
        token: None,
    }
}

fn default_platform_endpoint() -> EndpointConfig {
    EndpointConfig {
        api_url: "http://localhost:8936/v3".to_string(),
        token: None,
    }
}

impl Default for CronvoyConfig {
    fn default() -> Self {
        Self {
            scheduler: default_scheduler_endpoint(),
            platform: default_platform_endpoint(),
        }
    }
}

/// Resolve the cronvoy config directory (~/.cronvoy/).
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|h| h.join(".cronvoy"))
        .ok_or(ConfigError::NoDirFound)
}

/// Resolve the config file path (~/.cronvoy/config.json5).
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.json5"))
}

/// Load configuration from the default path, falling back to defaults.
/// Tokens absent from the file are taken from `CRONVOY_SCHEDULER_TOKEN` and
/// `CRONVOY_PLATFORM_TOKEN`.
pub fn load_config() -> Result<CronvoyConfig, ConfigError> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let path = config_file_path()?;
    let mut config = load_config_from(&path)?;
    if config.scheduler.token.is_none() {
        config.scheduler.token = std::env::var("CRONVOY_SCHEDULER_TOKEN").ok();
    }
    if config.platform.token.is_none() {
        config.platform.token = std::env::var("CRONVOY_PLATFORM_TOKEN").ok();
    }
    Ok(config)
}

/// Load configuration from a specific path, falling back to defaults if not found.
pub fn load_config_from(path: &Path) -> Result<CronvoyConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("Config file not found at {}, using defaults", path.display());
        return Ok(CronvoyConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: CronvoyConfig = json5::from_str(&content)?;
    Ok(config)
}

/// Ensure the config directory exists.
pub fn ensure_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = config_dir()?;
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Save configuration to the default path.
pub fn save_config(config: &CronvoyConfig) -> Result<(), ConfigError> {
    let dir = ensure_config_dir()?;
    let path = dir.join("config.json5");
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| ConfigError::Io(std::io::Error::other(e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CronvoyConfig::default();
        assert_eq!(config.scheduler.api_url, "http://localhost:8935/v1");
        assert!(config.scheduler.token.is_none());
        assert_eq!(config.platform.api_url, "http://localhost:8936/v3");
    }

    #[test]
    fn test_json5_parse() {
        let json5_str = r#"{
            scheduler: {
                api_url: "https://scheduler.sys.example.com/v1",
                token: "abc123",
            },
            platform: { api_url: "https://api.sys.example.com/v3" },
        }"#;
        let config: CronvoyConfig = json5::from_str(json5_str).unwrap();
        assert_eq!(config.scheduler.api_url, "https://scheduler.sys.example.com/v1");
        assert_eq!(config.scheduler.token, Some("abc123".into()));
        assert!(config.platform.token.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: CronvoyConfig = json5::from_str("{}").unwrap();
        assert_eq!(config.scheduler.api_url, "http://localhost:8935/v1");
    }
}
