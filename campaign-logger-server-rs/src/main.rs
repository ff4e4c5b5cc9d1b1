mod config;
mod error;
mod handlers;

use crate::config::ServerConfig;
use crate::handlers::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use campaign_logger_sdk_rs::{BotConfig, EventRouter};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    campaign_logger_sdk_rs::logger::init_logging();

    let config = ServerConfig::from_env();
    let bot_config = BotConfig::from_env();
    tracing::info!(triggers = bot_config.triggers.len(), "Loaded bot configuration");

    let state = Arc::new(AppState::new(EventRouter::new(bot_config), &config));

    let app = Router::new()
        .route("/", get(handlers::index).post(handlers::webhook))
        .route("/healthz", get(handlers::health))
        .route("/alive", get(handlers::alive))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .with_state(state);

    let listener = TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.shutdown_timeout()))
        .await?;

    tracing::info!("Closed out remaining connections");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM. Connections still open after `timeout` are
/// abandoned and the process exits with status 1.
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT received - shutting down"),
        _ = terminate => tracing::info!("SIGTERM received - shutting down gracefully"),
    }

    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        tracing::error!("Forcing shutdown after {}s", timeout.as_secs());
        std::process::exit(1);
    });
}
