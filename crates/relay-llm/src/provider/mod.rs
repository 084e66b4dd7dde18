//! LLM provider implementations

mod deepseek;
mod mock;

pub use deepseek::{DeepSeekProvider, DEFAULT_DEEPSEEK_BASE_URL};
pub use mock::MockProvider;
