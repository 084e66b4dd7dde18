//! Router creation and configuration
//!
//! Creates the Axum router for the relay endpoints.

use super::handlers::*;
use super::types::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create REST API router
///
/// Only `allowed_origins` may call the relay cross-origin; an empty list
/// grants no cross-origin access.
pub fn create_router(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/api/market-data", post(market_data))
        .route("/api/ai-analysis", post(ai_analysis))
        .route("/api/place-trade", post(place_trade))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
