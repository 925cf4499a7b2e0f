// AI implementation using OpenAI
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in domain layers.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};

use super::BaseAI;

/// Default model for company enrichment
pub const GPT_4O_MINI: &str = "gpt-4o-mini";

/// Five short fields fit comfortably
const MAX_COMPLETION_TOKENS: u32 = 300;

/// OpenAI implementation of AI capabilities
#[derive(Clone)]
pub struct OpenAIService {
    client: OpenAIClient,
    model: String,
    temperature: f32,
}

impl OpenAIService {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: OpenAIClient::new(api_key),
            model: model.into(),
            temperature: 0.2,
        }
    }

    /// Bound every HTTP round trip to the API
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.with_timeout(timeout);
        self
    }

    /// Point at a compatible endpoint (proxies, local mocks)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl BaseAI for OpenAIService {
    async fn complete_json(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(system_prompt))
            .message(Message::user(user_prompt))
            .temperature(self.temperature)
            .max_tokens(MAX_COMPLETION_TOKENS)
            .json_object();

        tracing::debug!(
            model = %self.model,
            prompt_length = user_prompt.len(),
            "Calling OpenAI for JSON completion"
        );

        let response = self
            .client
            .chat_completion(request)
            .await
            .context("OpenAI chat completion failed")?;

        Ok(response.content)
    }
}
