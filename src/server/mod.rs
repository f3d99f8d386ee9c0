//! Dashboard Hosting Server
//!
//! Serves the built dashboard assets and the analysis result documents as
//! plain static files, plus a small JSON API:
//!
//! - `GET /api/v1/sources` - configured sources and retry policy
//! - `GET /health` - liveness status
//! - `GET /resultados/*` - analysis documents (static)
//! - `GET /*` - dashboard assets (static, index fallback)
//!
//! The dashboard itself runs in the browser; this server only hosts it the
//! way the analysis pipeline's output directory is published.

pub mod error;

pub use error::{ApiError, ApiResult};

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::Config;

/// Shared server state.
pub struct AppState {
    pub config: Config,
    started: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            started: Instant::now(),
        }
    }
}

#[derive(Serialize)]
struct SourcesResponse {
    sources: Vec<SourceDescriptor>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

#[derive(Serialize)]
struct SourceDescriptor {
    id: String,
    url: String,
    display_name: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
}

/// Build the router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let results_dir = state.config.server.results_dir.clone();
    let static_dir = state.config.server.static_dir.clone();

    let api_routes = Router::new()
        .route("/sources", get(list_sources))
        .fallback(unknown_endpoint);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health))
        .nest_service("/resultados", ServeDir::new(results_dir))
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Configured sources plus the retry policy, so the browser dashboard and
/// the server share one configuration.
async fn list_sources(State(state): State<Arc<AppState>>) -> Json<SourcesResponse> {
    let config = &state.config;
    Json(SourcesResponse {
        sources: config
            .sources
            .iter()
            .map(|s| SourceDescriptor {
                id: s.id.clone(),
                url: s.url.clone(),
                display_name: s.display_name.clone(),
            })
            .collect(),
        retry_attempts: config.loader.retry_attempts,
        retry_delay_ms: config.loader.retry_delay_ms,
    })
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started.elapsed().as_secs(),
    })
}

async fn unknown_endpoint() -> ApiError {
    ApiError::NotFound("no such endpoint".to_string())
}

/// Start the server.
pub async fn serve(state: AppState) -> ApiResult<()> {
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Sentiscope dashboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Sentiscope server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn test_router() -> Router {
        build_router(AppState::new(Config::default()))
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn sources_endpoint_lists_configured_sources() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/sources")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["sources"].as_array().unwrap().len(), 4);
        assert_eq!(body["retry_attempts"], 3);
        assert_eq!(body["retry_delay_ms"], 1000);
        assert_eq!(body["sources"][0]["id"], "facebook");
    }

    #[tokio::test]
    async fn unknown_api_endpoint_is_a_json_404() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/definitely-not-here")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["request_id"].is_string());
    }
}
