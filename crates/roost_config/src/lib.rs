//! Configuration for the Roost listings service.
//!
//! Sources are layered the same way for every binary and test:
//!
//! 1. `config/default.{toml,yaml,json}`
//! 2. `config/{RUN_ENV}.{toml,yaml,json}` (RUN_ENV defaults to `debug`)
//! 3. Environment variables, e.g. `ROOST__DATABASE__URL`
//!
//! The config directory is taken from `CONFIG_DIR` and falls back to `config`
//! relative to the working directory.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use models::*;


/// Default prefix for configuration environment variables.
pub const DEFAULT_PREFIX: &str = "ROOST";

/// Separator between nested keys in environment variables.
pub const CONFIG_SEPARATOR: &str = "__";

/// Loads the application configuration from the default locations.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));
    load_config_from(&config_dir)
}

/// Loads the configuration using `config_dir` as the directory holding
/// `default.*` and `{RUN_ENV}.*`.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "Loading config from {} and {} (prefix {})",
        default_path.display(),
        env_path.display(),
        prefix
    );

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, once.
///
/// `DOTENV_OVERRIDE` selects a different file; the default is `.env`.
/// A missing file is not an error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
