//! Mock LLM client for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ai::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage};

/// Mock implementation of the LlmClient trait.
///
/// Queued responses are returned first, in order; after that every call
/// returns the default response. Requests are recorded for assertions.
pub struct MockLlmClient {
    default_response: Arc<RwLock<String>>,
    queued: Arc<RwLock<VecDeque<String>>>,
    requests: Arc<RwLock<Vec<CompletionRequest>>>,
    next_error: Arc<RwLock<Option<LlmError>>>,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl MockLlmClient {
    pub fn new(default_response: &str) -> Self {
        Self {
            default_response: Arc::new(RwLock::new(default_response.to_string())),
            queued: Arc::new(RwLock::new(VecDeque::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_default_response(&self, response: &str) {
        *self.default_response.write().await = response.to_string();
    }

    /// Queue a response for the next unanswered call.
    pub async fn push_response(&self, response: &str) {
        self.queued.write().await.push_back(response.to_string());
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: LlmError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.read().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.write().await.push(request);

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let text = match self.queued.write().await.pop_front() {
            Some(text) => text,
            None => self.default_response.read().await.clone(),
        };

        Ok(CompletionResponse {
            text,
            usage: LlmUsage {
                input_tokens: 100,
                output_tokens: 50,
            },
            model: "mock-model".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queued_then_default() {
        let client = MockLlmClient::new("default");
        client.push_response("first").await;

        let first = client.complete(CompletionRequest::new("a")).await.unwrap();
        let second = client.complete(CompletionRequest::new("b")).await.unwrap();

        assert_eq!(first.text, "first");
        assert_eq!(second.text, "default");
        assert_eq!(client.request_count().await, 2);
        assert_eq!(client.recorded_requests().await[1].prompt, "b");
    }

    #[tokio::test]
    async fn test_next_error_fires_once() {
        let client = MockLlmClient::default();
        client.set_next_error(LlmError::NotConfigured).await;

        assert!(client.complete(CompletionRequest::new("a")).await.is_err());
        assert!(client.complete(CompletionRequest::new("a")).await.is_ok());
    }
}
