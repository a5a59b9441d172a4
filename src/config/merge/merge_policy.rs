//! Built-in defaults, the lowest-precedence layer.

use crate::types::DEFAULT_PAGE_SIZE;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder seeded with the built-in defaults.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder().set_default("page_size", DEFAULT_PAGE_SIZE as i64)
}
