//! Gateway server setup
//!
//! Provides the main WebSocket server configuration and routes.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use crate::connection::PresenceRegistry;
use axum::{routing::get, Router};
use bridge_common::{AppConfig, AppError, HsTokenIssuer};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/gateway", get(gateway_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize all dependencies and create `GatewayState`
pub fn create_gateway_state(config: AppConfig) -> GatewayState {
    let registry = PresenceRegistry::new_shared();
    let token_issuer = Arc::new(HsTokenIssuer::from_config(&config.voice_token));

    GatewayState::new(registry, token_issuer, config)
}

/// Run the gateway server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    tracing::info!("Starting gateway server on {}", addr);

    let listener = TcpListener::bind(addr).await.map_err(AppError::internal)?;

    tracing::info!("Gateway listening on ws://{}/gateway", addr);

    axum::serve(listener, app).await.map_err(AppError::internal)?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.gateway.port));

    let state = create_gateway_state(config);
    let app = create_app(state);

    run_server(app, addr).await
}
