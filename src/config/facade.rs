//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::TableConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment, then validate it.
    pub fn load(working_dir: &Path) -> Result<TableConfig, ApiError> {
        let config = MergeService::load(working_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<TableConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> TableConfig {
        TableConfig::default()
    }
}
