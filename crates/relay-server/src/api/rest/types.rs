//! REST API type definitions
//!
//! Request and response types for the relay endpoints.

use crate::deriv::{BuyContractRequest, ContractType, DerivClient};
use relay_llm::LLMClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Market/trading provider
    pub deriv: Arc<DerivClient>,

    /// Completion provider
    pub llm: Arc<dyn LLMClient>,

    /// Model requested for market analysis
    pub analysis_model: Arc<str>,
}

impl AppState {
    pub fn new(deriv: DerivClient, llm: Arc<dyn LLMClient>, analysis_model: &str) -> Self {
        Self {
            deriv: Arc::new(deriv),
            llm,
            analysis_model: Arc::from(analysis_model),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// `POST /api/market-data` body
#[derive(Debug, Deserialize)]
pub struct MarketDataRequest {
    /// Instrument symbol, e.g. "R_100"
    pub symbol: String,
}

/// `POST /api/ai-analysis` body
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    /// Arbitrary market data; absent is treated as `null`
    #[serde(default)]
    pub market_data: serde_json::Value,
}

/// `POST /api/ai-analysis` response
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Free-text advice from the model
    pub analysis: String,
}

/// Trade direction as sent by the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl From<TradeAction> for ContractType {
    fn from(action: TradeAction) -> Self {
        match action {
            TradeAction::Buy => ContractType::Call,
            TradeAction::Sell => ContractType::Put,
        }
    }
}

/// `POST /api/place-trade` body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub symbol: String,
    pub amount: f64,
    pub action: TradeAction,
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl TradeRequest {
    /// Map onto the provider's five-minute stake order
    pub fn to_order(&self) -> BuyContractRequest {
        BuyContractRequest::five_minute_stake(
            self.symbol.clone(),
            self.amount,
            self.action.into(),
            self.stop_loss,
            self.take_profit,
        )
    }
}
