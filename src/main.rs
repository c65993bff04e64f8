//! Lotkeeper Backend - dealership inventory and billing API
//!
//! This is the main entry point. It wires configuration, logging, the
//! data service and the auth provider into the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::info;

use lotkeeper_backend::api;
use lotkeeper_backend::auth::TokenTableAuth;
use lotkeeper_backend::config::Settings;
use lotkeeper_backend::observability;
use lotkeeper_backend::service::memory::InMemoryDealership;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Load configuration
    let settings = Settings::load()?;

    // Initialize tracing/logging
    observability::init_tracing(&settings.tracing)?;

    info!("Starting Lotkeeper Backend v{}", env!("CARGO_PKG_VERSION"));
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.server.environment,
        "Configuration loaded"
    );

    // Wire collaborators. The in-memory service is the default backing
    // store; a database-backed implementation slots in behind the same
    // trait.
    let service = Arc::new(InMemoryDealership::new());
    let auth = Arc::new(TokenTableAuth::from_settings(&settings));

    let state = api::AppState::new(service, auth, settings.clone());
    let app = api::router(state);

    // Bind to address
    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listens for shutdown signals (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
