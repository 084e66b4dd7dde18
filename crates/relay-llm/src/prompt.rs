//! Prompt template for market analysis

use serde_json::Value;

/// Sampling temperature used for market analysis requests
pub const ANALYSIS_TEMPERATURE: f64 = 0.3;

/// Output token cap for market analysis requests
pub const ANALYSIS_MAX_TOKENS: u32 = 300;

/// Prompt template asking for a trading signal on the supplied market data
pub const MARKET_ANALYSIS_PROMPT: &str = r#"As a professional trading analyst, analyze the following market data and provide:
1. Trading signal (BUY/SELL/HOLD) with confidence percentage
2. Recommended entry price
3. Stop loss price
4. Take profit price
5. Brief reasoning (max 2 sentences)

Market data: {market_data}"#;

/// Render the analysis prompt with `market_data` serialized as compact JSON.
pub fn market_analysis_prompt(market_data: &Value) -> String {
    // Value's Display is infallible compact JSON
    MARKET_ANALYSIS_PROMPT.replace("{market_data}", &market_data.to_string())
}
