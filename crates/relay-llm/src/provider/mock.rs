//! Mock LLM provider for testing

use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{LLMError, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Mock LLM provider for testing
///
/// Answers every call with a fixed response (or a fixed failure) and keeps
/// the received requests for inspection.
pub struct MockProvider {
    name: String,
    outcome: MockOutcome,
    requests: Mutex<Vec<LLMRequest>>,
}

enum MockOutcome {
    Respond(String),
    Fail(String),
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self::with_response("Mock LLM response".to_string())
    }

    /// Create with custom default response
    pub fn with_response(response: String) -> Self {
        Self {
            name: "mock".to_string(),
            outcome: MockOutcome::Respond(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider whose every call fails with `ApiCallFailed`
    pub fn failing(message: String) -> Self {
        Self {
            name: "mock".to_string(),
            outcome: MockOutcome::Fail(message),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first
    pub async fn requests(&self) -> Vec<LLMRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        match &self.outcome {
            MockOutcome::Respond(content) => Ok(LLMResponse::new(content.clone(), model)
                .with_tokens(10)
                .with_finish_reason("stop".to_string())),
            MockOutcome::Fail(message) => Err(LLMError::ApiCallFailed(message.clone())),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
