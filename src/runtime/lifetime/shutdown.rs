use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use crate::storage::SharedStore;

/// Graceful shutdown timeout handed to the HTTP server (seconds).
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Resolve once Ctrl+C is received.
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}

/// Release the store once no request can reach it any more.
pub fn close_store(store: &SharedStore) -> Result<()> {
    store
        .close()
        .with_context(|| format!("Failed to close {} store", store.backend_name()))?;
    info!("{} store closed", store.backend_name());
    Ok(())
}
