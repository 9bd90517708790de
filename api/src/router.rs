//! Router configuration and setup.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::middleware;
use crate::routes;
use crate::state::AppState;

/// Configure routes and middleware.
///
/// Layers are applied before `with_state` so the state type resolves on
/// the finished router.
pub fn build_router(state: Arc<AppState>, config: &ApiConfig) -> Router {
    let uploads_dir = state.artifacts.root().to_path_buf();

    Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health))
        .route("/google-auth", post(routes::auth::google_auth))
        .route("/report", post(routes::reports::create_report))
        .route("/get-reports", get(routes::reports::get_reports))
        .route("/verify-safety", post(routes::verify::verify_safety))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer(config))
        .with_state(state)
}
