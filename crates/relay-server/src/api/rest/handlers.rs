//! API endpoint handlers
//!
//! One handler per relay route. Each makes a single upstream call and either
//! relays the result or fails with the route's [`ServerError`].

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::{Route, ServerError, UpstreamError};
use axum::{extract::State, Json};
use relay_llm::{market_analysis_prompt, LLMRequest, ANALYSIS_MAX_TOKENS, ANALYSIS_TEMPERATURE};
use serde_json::Value;
use tracing::{error, info};

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Market data relay: tick subscription for one symbol
pub(super) async fn market_data(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<MarketDataRequest>,
) -> Result<Json<Value>, ServerError> {
    info!(symbol = %payload.symbol, "Received market data request");

    let data = state
        .deriv
        .ticks(&payload.symbol)
        .await
        .map_err(|e| upstream_failure(Route::MarketData, e))?;

    Ok(Json(data))
}

/// AI analysis relay: prompt the completion model with the supplied market data
pub(super) async fn ai_analysis(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ServerError> {
    info!(
        provider = state.llm.name(),
        model = %state.analysis_model,
        "Received AI analysis request"
    );

    let request = LLMRequest::new(
        market_analysis_prompt(&payload.market_data),
        state.analysis_model.to_string(),
    )
    .with_temperature(ANALYSIS_TEMPERATURE)
    .with_max_tokens(ANALYSIS_MAX_TOKENS);

    let response = state
        .llm
        .call(request)
        .await
        .map_err(|e| upstream_failure(Route::AiAnalysis, e))?;

    Ok(Json(AnalysisResponse {
        analysis: response.content,
    }))
}

/// Trade placement relay: five-minute binary contract
pub(super) async fn place_trade(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<TradeRequest>,
) -> Result<Json<Value>, ServerError> {
    let order = payload.to_order();
    info!(
        symbol = %order.symbol,
        action = ?payload.action,
        amount = %order.amount,
        "Received trade placement request"
    );

    let result = state
        .deriv
        .buy(&order)
        .await
        .map_err(|e| upstream_failure(Route::PlaceTrade, e))?;

    Ok(Json(result))
}

/// Wrap and log a provider failure; the caller only ever sees the route message
fn upstream_failure(route: Route, source: impl Into<UpstreamError>) -> ServerError {
    let err = ServerError::upstream(route, source);
    error!(provider = route.provider(), route = %route, error = %err, "Upstream call failed");
    err
}
