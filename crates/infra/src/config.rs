//! Application configuration.
//!
//! Layers, lowest precedence first: built-in defaults, `config/default`,
//! `config/{FACTURO_ENV}`, then `FACTURO__*` environment variables
//! (e.g. `FACTURO__LIST__PAGE_SIZE=20`).

use std::env;
use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::query::{DEFAULT_PAGE_SIZE, Pagination};

pub const CONFIG_DIR: &str = "config";
pub const DEFAULT_ENV: &str = "development";
pub const ENV_PREFIX: &str = "FACTURO";

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    #[validate(length(min = 1))]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ListConfig {
    #[validate(range(min = 1, max = 1000))]
    pub page_size: usize,
}

impl ListConfig {
    pub fn pagination(&self) -> Pagination {
        Pagination::first(self.page_size)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// JSON file loaded into the in-memory stores at startup.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct AppConfig {
    #[validate]
    pub log: LogConfig,
    #[validate]
    pub list: ListConfig,
    #[serde(default)]
    pub data: DataConfig,
}

/// Builder preloaded with the built-in defaults.
pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("log.level", "info")?
        .set_default("log.json", false)?
        .set_default("list.page_size", DEFAULT_PAGE_SIZE as u64)
}

/// Deserialize and validate a fully layered configuration.
pub fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, AppConfigError> {
    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("FACTURO_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());
    tracing::info!("loading configuration for environment: {}", run_env);

    let builder = defaults()?
        .add_source(File::with_name(&format!("{CONFIG_DIR}/default")).required(false))
        .add_source(File::with_name(&format!("{CONFIG_DIR}/{run_env}")).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    finish(builder).inspect_err(|err| tracing::error!("invalid configuration: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn defaults_are_valid() {
        let config = finish(defaults().unwrap()).unwrap();
        assert_eq!(config.log.level, "info");
        assert!(!config.log.json);
        assert_eq!(config.list.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.data.seed_path, None);
    }

    #[test]
    fn file_layer_overrides_defaults() {
        let builder = defaults().unwrap().add_source(File::from_str(
            "[log]\njson = true\n[list]\npage_size = 20\n[data]\nseed_path = \"data/seed.json\"\n",
            FileFormat::Toml,
        ));
        let config = finish(builder).unwrap();
        assert!(config.log.json);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.list.pagination(), Pagination::first(20));
        assert_eq!(config.data.seed_path, Some(PathBuf::from("data/seed.json")));
    }

    #[test]
    fn out_of_range_page_size_is_rejected() {
        let builder = defaults()
            .unwrap()
            .add_source(File::from_str("[list]\npage_size = 0\n", FileFormat::Toml));
        assert!(matches!(finish(builder), Err(AppConfigError::Validation(_))));

        let builder = defaults()
            .unwrap()
            .add_source(File::from_str("[list]\npage_size = 5000\n", FileFormat::Toml));
        assert!(matches!(finish(builder), Err(AppConfigError::Validation(_))));
    }
}
