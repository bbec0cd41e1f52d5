use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Catalogue
        .route("/api/v1/catalogue", get(handlers::catalogue_summary))

        // Sky
        .route("/api/v1/sky", post(handlers::sky_for_address))
        .route("/api/v1/sky/observer", post(handlers::sky_for_observer))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the configured browser origin
pub fn cors_layer(config: &ApiConfig) -> anyhow::Result<CorsLayer> {
    let origin = config.cors_origin.parse::<HeaderValue>()?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}
