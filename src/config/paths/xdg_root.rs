//! XDG Base Directory utilities for configuration and state files.

use crate::error::ApiError;
use std::path::PathBuf;

const APP_DIR: &str = "treetable";

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
/// Follows XDG Base Directory Specification
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// Get XDG state home directory
///
/// Returns `$XDG_STATE_HOME` if set, otherwise defaults to `$HOME/.local/state`
pub fn state_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_state_home) = std::env::var("XDG_STATE_HOME") {
        if !xdg_state_home.is_empty() {
            return Ok(PathBuf::from(xdg_state_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG state home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".local").join("state"))
}

/// Global config file: `$XDG_CONFIG_HOME/treetable/config.toml`
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join(APP_DIR).join("config.toml"))
}

/// Default navigation history file: `$XDG_STATE_HOME/treetable/navigation.json`
pub fn default_state_file() -> Result<PathBuf, ApiError> {
    Ok(state_home()?.join(APP_DIR).join("navigation.json"))
}
