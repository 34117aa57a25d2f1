// src/config.rs

use crate::errors::{ChatError, ChatResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

/// Environment variable that overrides the configured endpoint. Also picked
/// up from a `.env` file at startup.
pub const ENDPOINT_ENV_VAR: &str = "LUNARCHAT_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The remote assistant endpoint. Opaque configuration; the client
    /// never inspects it beyond posting to it.
    pub endpoint: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            log_level: "info".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> ChatResult<()> {
    let config_path = get_config_path()?;

    let mut config = if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| ChatError::config_error(format!("failed to read config file: {}", e)))?;
        serde_json::from_str(&config_str)
            .map_err(|e| ChatError::config_error(format!("failed to parse config: {}", e)))?
    } else {
        let config = Config::default();

        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            ChatError::config_error(format!("failed to create config directory: {}", e))
        })?;
        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| ChatError::config_error(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, config_str)
            .map_err(|e| ChatError::config_error(format!("failed to write config file: {}", e)))?;

        config
    };

    // The environment wins over the file.
    if let Ok(endpoint) = env::var(ENDPOINT_ENV_VAR) {
        config.endpoint = endpoint;
    }

    validate_config(&config)?;

    *CONFIG.write().unwrap() = config;
    Ok(())
}

fn get_config_path() -> ChatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChatError::config_error("could not determine home directory"))?;

    Ok(home_dir
        .join(".config")
        .join("lunarchat")
        .join("config.json"))
}

fn validate_config(config: &Config) -> ChatResult<()> {
    if config.endpoint.trim().is_empty() {
        return Err(ChatError::config_error(format!(
            "no endpoint configured; set {} or edit the config file",
            ENDPOINT_ENV_VAR
        )));
    }

    if config.log_level.is_empty() {
        return Err(ChatError::config_error("log level is required"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}
