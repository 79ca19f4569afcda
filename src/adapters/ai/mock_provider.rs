//! Mock AI provider for testing.
//!
//! Configurable to return scripted responses, simulate latency, or inject
//! errors, with call tracking for verification — no network involved.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
};

/// A configured mock response.
#[derive(Debug)]
enum MockResponse {
    Success(String),
    Error(AiError),
}

/// Mock AI provider.
#[derive(Debug, Clone, Default)]
pub struct MockAiProvider {
    /// Scripted responses, consumed in order.
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Recorded requests for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockAiProvider {
    /// Creates a mock with no scripted responses; unscripted calls return
    /// `"Mock response"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: AiError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of completion calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded requests.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Error(error)) => Err(error),
            Some(MockResponse::Success(content)) => Ok(CompletionResponse {
                content,
                model: "mock-model-1".to_string(),
                finish_reason: FinishReason::Stop,
            }),
            None => Ok(CompletionResponse {
                content: "Mock response".to_string(),
                model: "mock-model-1".to_string(),
                finish_reason: FinishReason::Stop,
            }),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model-1")
    }
}
