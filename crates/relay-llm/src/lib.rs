//! Relay LLM Integration
//!
//! Chat-completion client used by the trading relay:
//! - `LLMClient`: provider-agnostic request/response interface
//! - `DeepSeekProvider`: OpenAI-compatible chat-completion endpoint
//! - `MockProvider`: in-memory provider for tests
//! - `prompt`: the market-analysis prompt template

// Re-export core types
pub use client::{LLMClient, LLMRequest, LLMResponse};
pub use error::{LLMError, Result};

// Re-export providers
pub use provider::{DeepSeekProvider, MockProvider, DEFAULT_DEEPSEEK_BASE_URL};

pub use prompt::{market_analysis_prompt, ANALYSIS_MAX_TOKENS, ANALYSIS_TEMPERATURE};

pub mod client;
pub mod error;
pub mod prompt;
pub mod provider;
