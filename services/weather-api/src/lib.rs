//! Weather observation read API.
//!
//! Exposes the axum router and handlers as a library so tests can exercise
//! the service without binding a socket.

pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Build the HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/weather/", get(handlers::list_observations))
        .route("/api/weather/stats/", get(handlers::list_statistics))
        .route("/health", get(handlers::health_handler))
        .route("/ready", get(handlers::ready_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
