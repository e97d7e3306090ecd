/// Loading, reloading and access helpers for the global configuration
use super::schemas::Config;
use crate::constants::PRIVATE_KEY_ENV;
use crate::errors::SwapError;
use crate::logger::{self, LogTag};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::RwLock;

/// Global configuration instance
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "config.toml";

pub fn parse_config(contents: &str) -> Result<Config, SwapError> {
    toml::from_str::<Config>(contents)
        .map_err(|e| SwapError::config(format!("Failed to parse config: {}", e)))
}

/// Read a config file; a missing file yields defaults
pub fn read_config_file(path: &str) -> Result<Config, SwapError> {
    if !Path::new(path).exists() {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path),
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| SwapError::config(format!("Failed to read config file '{}': {}", path, e)))?;

    toml::from_str::<Config>(&contents)
        .map_err(|e| SwapError::config(format!("Failed to parse config file '{}': {}", path, e)))
}

/// Load `path` into the global config, replacing any earlier load
pub fn load_config_from_path(path: &str) -> Result<(), SwapError> {
    let config = read_config_file(path)?;
    logger::debug(
        LogTag::Config,
        &format!(
            "Loaded config from '{}' (rpc: {}, quote api: {}, commitment: {})",
            path, config.rpc.url, config.quote.base_url, config.swap.commitment
        ),
    );
    install_config(config)
}

/// Re-read `path`; unlike loading, the file must exist
pub fn reload_config_from_path(path: &str) -> Result<(), SwapError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| SwapError::config(format!("Failed to read config file '{}': {}", path, e)))?;
    let config = toml::from_str::<Config>(&contents)
        .map_err(|e| SwapError::config(format!("Failed to parse config file '{}': {}", path, e)))?;

    if CONFIG.get().is_none() {
        return Err(SwapError::config(
            "Config not initialized. Call load_config_from_path() first.",
        ));
    }
    install_config(config)?;
    logger::info(LogTag::Config, &format!("Reloaded config from '{}'", path));
    Ok(())
}

/// Replace the global config
pub fn install_config(config: Config) -> Result<(), SwapError> {
    let mut pending = Some(config);
    let lock = CONFIG.get_or_init(|| RwLock::new(pending.take().unwrap_or_default()));

    if let Some(config) = pending {
        let mut current = lock
            .write()
            .map_err(|e| SwapError::config(format!("Failed to acquire config write lock: {}", e)))?;
        *current = config;
    }
    Ok(())
}

/// Run `f` with read access to the configuration; defaults if never loaded
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    let lock = CONFIG.get_or_init(|| RwLock::new(Config::default()));
    match lock.read() {
        Ok(config) => f(&config),
        Err(poisoned) => f(&poisoned.into_inner()),
    }
}

/// Clone of the whole config, for use across await points
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}

/// Private key from the environment, else from `[wallet]`
pub fn wallet_private_key(config: &Config) -> Result<String, SwapError> {
    let key = std::env::var(PRIVATE_KEY_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| config.wallet.private_key.clone());

    if key.trim().is_empty() {
        return Err(SwapError::config(format!(
            "No private key: set {} or [wallet] private_key",
            PRIVATE_KEY_ENV
        )));
    }
    Ok(key.trim().to_string())
}
