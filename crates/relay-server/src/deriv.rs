//! Deriv REST client
//!
//! Issues tick-subscription and contract-purchase requests against the
//! market/trading provider. Every request carries the application identifier
//! in the `App-ID` header. Response bodies are returned as raw JSON so the
//! relay can pass them back untouched.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Header carrying the Deriv application identifier
pub const APP_ID_HEADER: &str = "App-ID";

/// Contract duration for relayed trades
pub const CONTRACT_DURATION: u32 = 5;

/// Unit of [`CONTRACT_DURATION`] (minutes)
pub const CONTRACT_DURATION_UNIT: &str = "m";

/// Settlement currency for relayed trades
pub const CONTRACT_CURRENCY: &str = "USD";

/// Deriv call errors
#[derive(Debug, Error)]
pub enum DerivError {
    /// Transport failure, including timeouts
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Deriv API error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    /// Provider answered 2xx with a body that is not JSON
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Tick subscription request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicksRequest {
    pub ticks: String,
    pub subscribe: u8,
}

impl TicksRequest {
    pub fn subscribe(symbol: impl Into<String>) -> Self {
        Self {
            ticks: symbol.into(),
            subscribe: 1,
        }
    }
}

/// Direction of a binary contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractType {
    /// Pays out if the price ends above entry
    Call,
    /// Pays out if the price ends below entry
    Put,
}

/// Stake basis for a contract purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    Stake,
}

/// Contract purchase request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuyContractRequest {
    pub proposal: u8,
    /// Stake as a decimal string
    pub amount: String,
    pub basis: Basis,
    pub contract_type: ContractType,
    pub currency: String,
    pub duration: u32,
    pub duration_unit: String,
    pub symbol: String,
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl BuyContractRequest {
    /// Fixed-shape order: five-minute contract, staked in USD.
    pub fn five_minute_stake(
        symbol: impl Into<String>,
        amount: f64,
        contract_type: ContractType,
        stop_loss: f64,
        take_profit: f64,
    ) -> Self {
        Self {
            proposal: 1,
            amount: format_amount(amount),
            basis: Basis::Stake,
            contract_type,
            currency: CONTRACT_CURRENCY.to_string(),
            duration: CONTRACT_DURATION,
            duration_unit: CONTRACT_DURATION_UNIT.to_string(),
            symbol: symbol.into(),
            stop_loss,
            take_profit,
        }
    }
}

/// Shortest decimal rendering of a stake: `10.0` becomes `"10"`, `10.5` stays `"10.5"`.
///
/// Follows JavaScript number formatting at the edges: `-0` renders as `"0"`,
/// and magnitudes of at least `1e21` or below `1e-6` use a signed exponent
/// (`"1e+21"`, `"1e-7"`).
pub fn format_amount(amount: f64) -> String {
    if amount == 0.0 {
        return "0".to_string();
    }

    let magnitude = amount.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{:e}", amount);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }

    amount.to_string()
}

/// Deriv REST client
#[derive(Clone)]
pub struct DerivClient {
    client: Client,
    base_url: String,
    app_id: String,
}

impl DerivClient {
    /// Create a client for `base_url` (e.g. "https://api.deriv.com")
    pub fn new(client: Client, base_url: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_id: app_id.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a tick subscription for `symbol`
    pub async fn ticks(&self, symbol: &str) -> Result<Value, DerivError> {
        self.post("ticks", &TicksRequest::subscribe(symbol)).await
    }

    /// Submit a contract purchase
    pub async fn buy(&self, order: &BuyContractRequest) -> Result<Value, DerivError> {
        self.post("buy", order).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, DerivError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "Calling Deriv API");

        let response = self
            .client
            .post(&url)
            .header(APP_ID_HEADER, &self.app_id)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(DerivError::Status { status, body: text });
        }

        serde_json::from_str(&text)
            .map_err(|e| DerivError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}
