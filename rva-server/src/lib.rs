//! rva-server library - HTTP transport for the review analyzer
//!
//! Maps query and submission requests onto [`ReviewService`] and its results
//! onto JSON responses.

use std::sync::Arc;

use axum::Router;
use rva_common::ReviewService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Review store, whitelist and scorer
    pub service: Arc<ReviewService>,
}

impl AppState {
    /// Create new application state
    pub fn new(service: Arc<ReviewService>) -> Self {
        Self { service }
    }
}

/// Build application router
///
/// Reviews are served at both `/` and `/reviews`.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let reviews = get(api::list_reviews).post(api::create_review);

    Router::new()
        .route("/", reviews.clone())
        .route("/reviews", reviews)
        .route("/locations", get(api::list_locations))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
