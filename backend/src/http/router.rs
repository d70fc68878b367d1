//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
///
/// Group routes are mounted under `state.base_path`.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let base = state.base_path.clone();
    let collection = if base.is_empty() { "/".to_string() } else { base.clone() };

    let mut groups = Router::new()
        .route(&format!("{}/groups.json", base), get(handlers::list_groups))
        .route(&collection, post(handlers::create_group))
        .route(
            &format!("{}/{{id}}", base),
            get(handlers::get_group)
                .put(handlers::update_group)
                .delete(handlers::remove_group),
        );
    if !base.is_empty() {
        groups = groups.route(&format!("{}/", base), post(handlers::create_group));
    }

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(groups)
        // Group forms are small.
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
