#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;

mod fake_classify;
mod http;
mod service;

pub use fake_classify::FixedClassifier;
pub use service::{BatchOutcome, PredictError, PredictionService};

pub const CRATE_NAME: &str = "genoscope-server";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub uploads_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 4 * 1024 * 1024,
            uploads_dir: PathBuf::from("uploads"),
        }
    }
}

/// Read-only request context. Everything in here is initialized once at
/// startup and shared across handlers without locking.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub api: ApiConfig,
}

impl AppState {
    #[must_use]
    pub fn new(service: Arc<PredictionService>, api: ApiConfig) -> Self {
        Self { service, api }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::handlers::landing_handler))
        .route("/healthz", get(http::handlers::healthz_handler))
        .route(
            "/input",
            get(http::handlers::input_form_handler).post(http::handlers::input_submit_handler),
        )
        .route(
            "/upload",
            get(http::handlers::upload_form_handler).post(http::handlers::upload_submit_handler),
        )
        .route("/history", get(http::handlers::history_handler))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
