//! Router, handlers and listener.

use crate::{ErrorBody, GenerationBody};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use deckhand_core::ServerConfig;
use deckhand_error::PipelineErrorKind;
use deckhand_interface::ArtifactStore;
use deckhand_pipeline::PipelineOrchestrator;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info, instrument, warn};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<PipelineOrchestrator>,
}

impl AppState {
    /// Serve runs of `orchestrator`.
    pub fn new(orchestrator: PipelineOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// The pipeline behind `POST /generate`.
    pub fn orchestrator(&self) -> &PipelineOrchestrator {
        &self.orchestrator
    }
}

/// Build the application router.
///
/// `static_root` is served under `/logs`; pass the storage root so catalog
/// image paths resolve.
pub fn create_router(state: AppState, static_root: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/generate", post(generate))
        .route("/presentations", get(list_presentations))
        .nest_service("/logs", ServeDir::new(static_root.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP status for a failed run.
///
/// Provider-side failures are `502 Bad Gateway`.
pub fn status_for(kind: &PipelineErrorKind) -> StatusCode {
    match kind {
        PipelineErrorKind::NoTopicAvailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        PipelineErrorKind::PersistenceFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PipelineErrorKind::DeadlineExceeded { .. } => StatusCode::GATEWAY_TIMEOUT,
        PipelineErrorKind::OutlineRequestFailed(_)
        | PipelineErrorKind::OutlineParseFailed(_)
        | PipelineErrorKind::ImageGenerationFailed { .. } => StatusCode::BAD_GATEWAY,
    }
}

/// Bind the configured address and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn serve(config: &ServerConfig, router: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(addr = %listener.local_addr()?, "Deckhand server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for Ctrl-C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

#[instrument(skip(state))]
async fn generate(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.orchestrator.run().await;

    let status = report
        .error
        .as_ref()
        .map(|e| status_for(&e.kind))
        .unwrap_or(StatusCode::OK);

    (status, Json(GenerationBody::from(&report)))
}

#[instrument(skip(state))]
async fn list_presentations(State(state): State<AppState>) -> Response {
    match state.orchestrator.store().list_all().await {
        Ok(entries) => {
            info!(count = entries.len(), "Listed presentations");
            (StatusCode::OK, Json(entries)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list presentations");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
