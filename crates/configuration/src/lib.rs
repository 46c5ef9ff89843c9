use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    ClientConfig, Config, DatabaseConfig, LoggingConfig, ServerConfig, UpstreamConfig,
};

/// Prefix for environment overrides, e.g. `COTACAO__SERVER__FETCH_TIMEOUT_MS=500`.
pub const ENV_PREFIX: &str = "COTACAO";

/// Loads the application configuration.
///
/// Sources are layered in order: built-in defaults, the TOML file at `path`
/// (skipped when it does not exist), then `COTACAO__*` environment variables.
/// The result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_with_env(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(
            config::File::new(&path.to_string_lossy(), config::FileFormat::Toml).required(false),
        )
        .add_source(env)
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
