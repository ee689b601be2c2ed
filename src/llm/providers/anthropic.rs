use super::{api_key_from_env, read_json};
use crate::errors::{Error, Result, Service};
use crate::llm::{ChatMessage, CompletionRequest, CompletionService};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Provider implementation for Anthropic's API
#[derive(Debug)]
pub struct AnthropicProvider {
    /// Anthropic API key loaded from environment
    api_key: String,
    /// Model identifier to use
    model: String,
    base_url: String,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider instance
    ///
    /// # Arguments
    /// * `model` - The model identifier to use
    ///
    /// # Returns
    /// * `Result<Self>` - Provider instance or error if API key not found
    pub fn new(model: &str) -> Result<Self> {
        let api_key = api_key_from_env("ANTHROPIC_API_KEY")?;
        Ok(Self::with_api_key(&api_key, model))
    }

    pub fn with_api_key(api_key: &str, model: &str) -> Self {
        AnthropicProvider {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: ANTHROPIC_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl CompletionService for AnthropicProvider {
    /// Calls Anthropic's messages API
    async fn create(&self, request: &CompletionRequest) -> Result<String> {
        let request_body = json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": [ChatMessage::user(&request.prompt)]
        });

        let res = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.api_key.as_str())
            .header("anthropic-version", "2023-06-01")
            .json(&request_body)
            .send()
            .await;

        let json_resp = read_json(res, Service::Completion, "Anthropic").await?;
        if let Some(content) = json_resp["content"][0]["text"].as_str() {
            debug!("Anthropic response: {}", content);
            Ok(content.trim().to_string())
        } else {
            Err(Error::unavailable(
                Service::Completion,
                "No content in Anthropic LLM response",
            ))
        }
    }
}
