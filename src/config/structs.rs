use serde::{Deserialize, Serialize};

/// 应用配置
///
/// 加载优先级（低 → 高）：
/// 默认值 → config.toml → `SHORTENER__*` 环境变量 → 命令行参数
/// → `SERVER_ADDRESS` / `BASE_URL` / `FILE_STORAGE_PATH`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Listen address in `host:port` form.
    #[serde(default = "default_server_address")]
    pub address: String,
    /// Prefix of every short URL handed back to clients.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl ServerConfig {
    /// `<base_url>/<key>`, tolerating a trailing slash on the base URL.
    pub fn short_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

/// 存储配置
///
/// An empty or missing `file_storage_path` selects the in-memory store.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub file_storage_path: Option<String>,
}

impl StorageConfig {
    pub fn file_path(&self) -> Option<&str> {
        self.file_storage_path
            .as_deref()
            .filter(|path| !path.is_empty())
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `text` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_address() -> String {
    "localhost:8080".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_server_address(),
            base_url: default_base_url(),
            workers: default_workers(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
