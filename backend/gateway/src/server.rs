//! Main HTTP Gateway Server.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use billscan_understanding::BillExtractor;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument};

use crate::extract_api;
use crate::health_api;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub extractor: Arc<BillExtractor>,
    /// Configured model id, e.g. `gemini-2.0-flash`.
    pub model: String,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(extractor: Arc<BillExtractor>, model: impl Into<String>) -> Self {
        Self {
            extractor,
            model: model.into(),
            started_at: Instant::now(),
        }
    }
}

/// Build the router without binding, so tests can drive it directly.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/extract-bill-data", post(extract_api::extract_bill))
        .route("/api/health", get(health_api::get_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: &str, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Gateway HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
