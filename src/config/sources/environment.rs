//! Environment variable source: TREETABLE_ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "TREETABLE";

/// Add environment variable overlay to builder.
/// Uses TREETABLE__ prefix and __ as separator for nested keys,
/// e.g. `TREETABLE__PAGE_SIZE=10` or `TREETABLE__LOGGING__LEVEL=debug`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
