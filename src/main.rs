//! octopulse server entry point.
//!
//! Starts the Axum HTTP server with the REST, webhook and live-stream
//! endpoints.

use std::sync::Arc;

use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use octopulse::api;
use octopulse::app_state::AppState;
use octopulse::config::{LogFormat, ServerConfig};
use octopulse::domain::EventBus;
use octopulse::github::GitHubClient;
use octopulse::push::{LoggingPushSender, PushSender};
use octopulse::service::NotificationService;
use octopulse::store::{MemoryStore, PostgresStore, SettingsStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting octopulse");

    // Build storage
    let store: Arc<dyn SettingsStore> = match &config.database {
        Some(db) => Arc::new(PostgresStore::connect(db).await?),
        None => {
            tracing::warn!("persistence disabled; settings are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    // Build service layer
    let push: Arc<dyn PushSender> = Arc::new(LoggingPushSender);
    let event_bus = EventBus::new(config.event_bus_capacity);
    let service = Arc::new(NotificationService::new(store, push, event_bus.clone()));
    let github = GitHubClient::new(config.github.clone(), config.request_timeout)?;

    // Build application state
    let app_state = AppState {
        service,
        github,
        event_bus,
        public_base_url: config.public_base_url.clone(),
    };

    // Build router
    let app = api::build_router()
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C (and SIGTERM on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
