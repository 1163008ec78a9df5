use std::collections::HashMap;

use config::{Config, Environment, File};

use super::{AppConfig, CliArgs};
use crate::errors::{Result, ShortenerError};

/// Configuration file read when `-c/--config` is not given. Optional.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub const ENV_SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const ENV_BASE_URL: &str = "BASE_URL";
pub const ENV_FILE_STORAGE_PATH: &str = "FILE_STORAGE_PATH";

/// Prefix of the structured environment overrides, e.g.
/// `SHORTENER__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "SHORTENER";

impl AppConfig {
    /// Load configuration from the process environment and `args`.
    pub fn load(args: &CliArgs) -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::from_sources(args, &env)
    }

    /// Build configuration from explicit sources.
    ///
    /// 优先级：默认值 < 配置文件 < `SHORTENER__*` < 命令行参数 < 简单环境变量。
    /// Empty flag or variable values are ignored, matching an unset one.
    pub fn from_sources(args: &CliArgs, env: &HashMap<String, String>) -> Result<Self> {
        let (path, required) = match args.config.as_deref() {
            Some(path) => (path, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let lookup = |name: &str| env.get(name).filter(|v| !v.is_empty()).cloned();

        let config: AppConfig = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            )
            // 简单环境变量优先于命令行参数
            .set_override_option(
                "server.address",
                lookup(ENV_SERVER_ADDRESS).or_else(|| non_empty(&args.server_address)),
            )?
            .set_override_option(
                "server.base_url",
                lookup(ENV_BASE_URL).or_else(|| non_empty(&args.base_url)),
            )?
            .set_override_option(
                "storage.file_storage_path",
                lookup(ENV_FILE_STORAGE_PATH).or_else(|| non_empty(&args.file_storage_path)),
            )?
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.address.is_empty() {
            return Err(ShortenerError::config("server.address must not be empty"));
        }
        if self.server.workers == 0 {
            return Err(ShortenerError::config("server.workers must be at least 1"));
        }
        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ShortenerError::config(format!(
                "logging.format must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }

    /// Render the configuration as TOML (used by `--print-config`).
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ShortenerError::config(format!("cannot render config: {}", e)))
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
