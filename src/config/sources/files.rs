//! File sources: the global XDG config file and the working-directory file.

use crate::config::paths::global_config_path;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;
use tracing::debug;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "treetable.toml";

/// Add `$XDG_CONFIG_HOME/treetable/config.toml` if it exists.
pub fn add_global_file(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match global_config_path() {
        Ok(path) => {
            debug!(path = %path.display(), "Global config source");
            Ok(builder.add_source(File::from(path).required(false)))
        }
        Err(_) => Ok(builder),
    }
}

/// Add `<dir>/treetable.toml` if it exists.
pub fn add_local_file(
    builder: ConfigBuilder<DefaultState>,
    dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = dir.join(LOCAL_CONFIG_FILE);
    debug!(path = %path.display(), "Local config source");
    Ok(builder.add_source(File::from(path).required(false)))
}
