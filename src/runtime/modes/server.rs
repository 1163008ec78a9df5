//! Server mode
//!
//! Builds the actix-web application around the shared store and runs it
//! until the server exits or a shutdown signal arrives.

use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::api::middleware::RequestTracing;
use crate::api::services::{redirect_routes, shorten_routes};
use crate::config::AppConfig;
use crate::runtime::lifetime::{self, shutdown::SHUTDOWN_TIMEOUT_SECS};

/// Maximum accepted request body (1 MiB).
const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Run the HTTP server
///
/// 1. Builds the store selected by configuration
/// 2. Binds and starts the HTTP server
/// 3. On Ctrl+C stops the server gracefully, then closes the store
///
/// **Note**: Logging must be initialized before calling this function
pub async fn run_server(config: AppConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(&config).map_err(|e| {
        error!("Server startup failed: {:#}", e);
        e
    })?;

    let store = startup.store.clone();
    let server_config = config.server.clone();

    warn!("Using {} worker(s) for the server", config.server.workers);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(RequestTracing)
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
            .configure(shorten_routes)
            .configure(redirect_routes)
    })
    .workers(config.server.workers)
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .disable_signals()
    .bind(config.server.address.as_str())
    .with_context(|| format!("Failed to bind {}", config.server.address))?
    .run();

    info!("Starting server at http://{}", config.server.address);
    info!("Short links are issued under {}", config.server.base_url);

    let handle = server.handle();

    // Wait for server or shutdown signal
    let served = tokio::select! {
        res = server => res.context("HTTP server error"),
        _ = lifetime::shutdown::listen_for_shutdown() => {
            handle.stop(true).await;
            warn!("Graceful shutdown: server stopped");
            Ok(())
        }
    };

    // 服务器停止后再关闭存储，确保没有请求仍在使用它
    let closed = lifetime::shutdown::close_store(&startup.store);
    served?;
    closed
}
