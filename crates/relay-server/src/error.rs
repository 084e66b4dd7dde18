//! Server error types
//!
//! Every failure surfaces to the caller as HTTP 500 with the route's fixed
//! message. Upstream detail stays in the logs.

use crate::deriv::DerivError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_llm::LLMError;
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Relay routes, used to pick the caller-facing failure message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    MarketData,
    AiAnalysis,
    PlaceTrade,
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Route::MarketData => "/api/market-data",
            Route::AiAnalysis => "/api/ai-analysis",
            Route::PlaceTrade => "/api/place-trade",
        }
    }

    /// Static message returned to the caller on any failure
    pub const fn failure_message(self) -> &'static str {
        match self {
            Route::MarketData => "Failed to get market data",
            Route::AiAnalysis => "AI analysis failed",
            Route::PlaceTrade => "Trade placement failed",
        }
    }

    /// Provider the route talks to
    pub const fn provider(self) -> &'static str {
        match self {
            Route::MarketData | Route::PlaceTrade => "deriv",
            Route::AiAnalysis => "deepseek",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        [Route::MarketData, Route::AiAnalysis, Route::PlaceTrade]
            .into_iter()
            .find(|route| route.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

fn route_label(route: &Option<Route>) -> &'static str {
    route.map(Route::path).unwrap_or("request")
}

/// Failure of an outbound provider call
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("market provider: {0}")]
    Market(#[from] DerivError),

    #[error("completion provider: {0}")]
    Completion(#[from] LLMError),
}

/// Server error type
#[derive(Debug, Error)]
pub enum ServerError {
    /// Provider call failed (network, non-2xx, timeout, malformed body)
    #[error("{route}: upstream call failed: {source}")]
    Upstream {
        route: Route,
        #[source]
        source: UpstreamError,
    },

    /// Inbound body could not be parsed
    #[error("{}: invalid request: {message}", route_label(.route))]
    InvalidRequest { route: Option<Route>, message: String },
}

impl ServerError {
    pub fn upstream(route: Route, source: impl Into<UpstreamError>) -> Self {
        ServerError::Upstream {
            route,
            source: source.into(),
        }
    }

    /// Message exposed to the caller
    pub fn public_message(&self) -> &'static str {
        match self {
            ServerError::Upstream { route, .. } => route.failure_message(),
            ServerError::InvalidRequest {
                route: Some(route), ..
            } => route.failure_message(),
            ServerError::InvalidRequest { route: None, .. } => "Invalid request",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.public_message(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_route_messages() {
        assert_eq!(Route::MarketData.failure_message(), "Failed to get market data");
        assert_eq!(Route::AiAnalysis.failure_message(), "AI analysis failed");
        assert_eq!(Route::PlaceTrade.failure_message(), "Trade placement failed");
    }

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/api/market-data"), Some(Route::MarketData));
        assert_eq!(Route::from_path("/api/ai-analysis"), Some(Route::AiAnalysis));
        assert_eq!(Route::from_path("/api/place-trade"), Some(Route::PlaceTrade));
        assert_eq!(Route::from_path("/health"), None);
    }

    #[test]
    fn test_upstream_display_keeps_detail() {
        let err = ServerError::upstream(
            Route::AiAnalysis,
            LLMError::ApiCallFailed("DeepSeek API error (503): overloaded".to_string()),
        );
        let text = err.to_string();
        assert!(text.starts_with("/api/ai-analysis: upstream call failed"));
        assert!(text.contains("overloaded"));
    }

    #[tokio::test]
    async fn test_upstream_response_hides_detail() {
        let err = ServerError::upstream(
            Route::MarketData,
            DerivError::InvalidResponse("secret upstream detail".to_string()),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json, json!({"error": "Failed to get market data"}));
    }

    #[tokio::test]
    async fn test_invalid_request_uses_route_message() {
        let err = ServerError::InvalidRequest {
            route: Some(Route::PlaceTrade),
            message: "missing field `amount`".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Trade placement failed");
    }

    #[test]
    fn test_invalid_request_without_route() {
        let err = ServerError::InvalidRequest {
            route: None,
            message: "bad".to_string(),
        };
        assert_eq!(err.public_message(), "Invalid request");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ServerError>();
    }
}
