//! Upstream client initialization
//!
//! Builds the provider clients from [`RelayConfig`] once at startup. Both
//! providers share one pooled HTTP client carrying the configured timeout.

use crate::api::AppState;
use crate::config::RelayConfig;
use crate::deriv::DerivClient;
use relay_llm::DeepSeekProvider;
use std::sync::Arc;
use tracing::info;

/// Build the shared application state
pub fn init_state(config: &RelayConfig) -> Result<AppState, reqwest::Error> {
    let http = reqwest::Client::builder()
        .timeout(config.upstream_timeout())
        .build()?;

    let deriv = DerivClient::new(http.clone(), &config.deriv.base_url, &config.deriv.app_id);
    let llm = DeepSeekProvider::with_client(config.deepseek.api_key.clone(), http)
        .with_base_url(&config.deepseek.base_url);

    info!(
        deriv = %deriv.base_url(),
        deepseek = %llm.base_url(),
        model = %config.deepseek.model,
        timeout_secs = config.upstream_timeout_secs,
        "Upstream clients initialized"
    );

    Ok(AppState::new(deriv, Arc::new(llm), &config.deepseek.model))
}
