// ============================================================
// Layer 1 — HTTP API
// ============================================================
// The web-facing presentation layer: an axum router exposing
// the loaded model over three routes.
//
//   GET  /          → static JSON greeting
//   GET  /health    → static health/version payload
//   POST /predict/  → multipart image upload → predicted digit
//
// The server is stateless per request: the only shared object
// is the model loaded at startup, which is never mutated after
// load. There is no batching, queuing, or retry logic — one
// request means one preprocessing pass and one forward pass.
//
// CORS mirrors the browser-facing deployment this API fronts:
// any origin, any method, any header.

pub mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use crate::data::preprocessor::ImagePreprocessor;
use crate::ml::inferencer::Inferencer;

/// Shared application state: the model loaded once at startup
/// plus the preprocessor every upload goes through.
pub struct AppState {
    pub model:        Mutex<Inferencer>,
    pub preprocessor: ImagePreprocessor,
}

impl AppState {
    pub fn new(model: Inferencer, preprocessor: ImagePreprocessor) -> Self {
        Self {
            model: Mutex::new(model),
            preprocessor,
        }
    }
}

/// Build the router with all routes and the CORS layer.
/// Split out from `serve` so tests can exercise the app
/// without binding a socket.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Both spellings of the predict route resolve, so clients
    // with and without the trailing slash work.
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/predict", post(routes::predict))
        .route("/predict/", post(routes::predict))
        .layer(cors)
        .with_state(state)
}

/// Bind the address and serve until the process is stopped.
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind '{addr}'"))?;

    axum::serve(listener, app(state))
        .await
        .context("server error")?;

    Ok(())
}
