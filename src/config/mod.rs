//! Configuration
//!
//! Layered configuration via the `config` crate: built-in defaults, the
//! global XDG file, a `treetable.toml` in the working directory, then
//! `TREETABLE__*` environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::types::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use facade::ConfigLoader;

/// Navigation state configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// History file shared between CLI invocations; None means the XDG state default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Root records per page
    pub page_size: usize,

    /// Record data file (json, yaml)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,

    pub navigation: NavigationConfig,

    pub logging: LoggingConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            data: None,
            navigation: NavigationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TableConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.page_size == 0 {
            return Err(ApiError::ConfigError(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Render as TOML, e.g. for `treetable config`.
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))
    }
}
