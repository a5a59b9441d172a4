//! MergeService: orchestrates sources, applies merge policy, deserializes to TableConfig.

use crate::config::sources::{environment, files};
use crate::config::TableConfig;
use config::ConfigError;
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: defaults (lowest) -> global file -> working-directory file -> environment (highest).
    pub fn load(working_dir: &Path) -> Result<TableConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = files::add_global_file(builder)?;
        let builder = files::add_local_file(builder, working_dir)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<TableConfig, ConfigError> {
        use config::File;

        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
