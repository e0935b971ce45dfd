use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::ClientConfig;

/// Environment variable overriding the configured server URL
pub const API_URL_ENV: &str = "INSIGHTBOARD_API_URL";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path, respecting XDG_CONFIG_HOME
pub fn default_config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("insightboard").join("config.toml")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read the config from a specific path. A missing file yields defaults;
/// an unreadable or malformed one is an error.
pub fn read_config_from(path: &Path) -> Result<ClientConfig, ConfigError> {
    if !path.exists() {
        return Ok(ClientConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve the effective config. The server URL comes from, in order: the
/// explicit override (`--api-url`), the environment, the file, the default.
pub fn load_config(
    path: Option<&Path>,
    api_url_override: Option<&str>,
) -> Result<ClientConfig, ConfigError> {
    let path = path.map_or_else(default_config_path, Path::to_path_buf);
    let mut config = read_config_from(&path)?;
    let env_url = std::env::var(API_URL_ENV).ok();
    apply_url_override(&mut config, api_url_override, env_url.as_deref());
    Ok(config)
}

fn apply_url_override(config: &mut ClientConfig, flag: Option<&str>, env: Option<&str>) {
    if let Some(url) = flag.or(env).filter(|u| !u.trim().is_empty()) {
        config.server.url = url.trim().to_string();
    }
}
