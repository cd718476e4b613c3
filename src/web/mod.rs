//! Local web UI: upload a CSV, see the result, download the workbook.
//!
//! Nothing here writes to disk. Uploads live in a request-scoped
//! [`MemoryStorage`](crate::adapters::MemoryStorage) and are dropped with the
//! response.

pub mod error;
pub mod handlers;
pub mod pages;

use crate::config::AppConfig;
use crate::utils::error::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/validate", post(handlers::validate_page))
        .route("/api/validate", post(handlers::validate_workbook))
        .route("/api/report", post(handlers::validate_report))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C.
pub async fn serve(config: AppConfig) -> Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    let local = listener.local_addr()?;

    tracing::info!("🚀 Validador de Credores listening on http://{}", local);

    let app = build_router(AppState::new(config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
