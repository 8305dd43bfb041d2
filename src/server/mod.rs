// ============================================================
// Layer 7 — HTTP Server (axum)
// ============================================================
// Thin HTTP boundary over the application layer. Routing,
// CORS, and error-to-status mapping live here; no business
// logic does.
//
// Endpoints:
//   POST /api/add-example — submit one labelled grid
//   POST /api/train       — fit the model on the whole store
//   POST /api/predict     — classify one grid
//   POST /api/hello       — liveness check
//
// Error contract: validation problems are 400 with a short
// plain message; everything else collapses to a flat 500
// "Server error" string, with the root cause only in the logs.

pub mod handlers;
pub mod state;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::server::state::AppState;

/// Server configuration: bind address plus the CORS origin
/// allow-list. Everything else the server needs lives in
/// AppState.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub address: SocketAddr,

    /// Origins allowed to call the API cross-origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".parse().expect("valid default address"),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5500".to_string(),
                "http://127.0.0.1:5500".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    pub fn with_address(mut self, addr: SocketAddr) -> Self {
        self.address = addr;
        self
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }
}

/// Errors crossing the HTTP boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client sent a malformed example — 400
    #[error("{0}")]
    Validation(String),

    /// Anything else — flat 500, details go to the logs only
    #[error("Server error")]
    Internal {
        request_id: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn internal(request_id: &str, source: anyhow::Error) -> Self {
        Self::Internal { request_id: request_id.to_string(), source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal { request_id, source } => {
                tracing::error!("[{request_id}] request failed: {source:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
            }
        }
    }
}

/// Build the application router with CORS applied.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/api/add-example", post(handlers::add_example))
        .route("/api/train", post(handlers::train))
        .route("/api/predict", post(handlers::predict))
        .route("/api/hello", post(handlers::hello))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{o}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Bind and serve until the process is stopped.
pub async fn run(config: ServerConfig, state: AppState) -> Result<()> {
    let router = build_router(state, &config.cors_origins);
    let listener = tokio::net::TcpListener::bind(config.address).await?;
    tracing::info!("Server listening on http://{}", config.address);
    axum::serve(listener, router).await?;
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.address.port(), 3000);
        assert!(!config.cors_origins.is_empty());
    }

    #[test]
    fn test_config_with_address() {
        let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
        let config = ServerConfig::default().with_address(addr);
        assert_eq!(config.address.port(), 8080);
    }

    #[test]
    fn test_config_with_cors_origins() {
        let config = ServerConfig::default()
            .with_cors_origins(vec!["http://example.test".to_string()]);
        assert_eq!(config.cors_origins.len(), 1);
    }
}
