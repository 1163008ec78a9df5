use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::storage::{SharedStore, StorageFactory};

pub struct StartupContext {
    pub store: SharedStore,
}

/// 准备服务器启动的上下文（目前只有存储）
pub fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let start_time = Instant::now();
    debug!("Starting pre-startup processing...");

    let store = StorageFactory::create(&config.storage).with_context(|| {
        match config.storage.file_path() {
            Some(path) => format!("Failed to open file store {}", path),
            None => "Failed to create memory store".to_string(),
        }
    })?;

    match config.storage.file_path() {
        Some(path) => info!("Using file storage backend: {}", path),
        None => info!("Using memory storage backend; links are lost on exit"),
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { store })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    #[test]
    fn test_memory_store_by_default() {
        let context = prepare_server_startup(&AppConfig::default()).unwrap();
        assert_eq!(context.store.backend_name(), "memory");
    }

    #[test]
    fn test_unopenable_file_store_names_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("links.txt");
        let config = AppConfig {
            storage: StorageConfig {
                file_storage_path: Some(path.to_string_lossy().into_owned()),
            },
            ..AppConfig::default()
        };

        let err = prepare_server_startup(&config).err().expect("startup should fail");
        let message = format!("{:#}", err);
        assert!(message.starts_with(&format!("Failed to open file store {}", path.display())));
    }
}
