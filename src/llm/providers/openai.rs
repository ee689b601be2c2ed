use super::{api_key_from_env, read_json};
use crate::errors::{Error, Result, Service};
use crate::llm::{ChatMessage, CompletionRequest, CompletionService};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Provider implementation for OpenAI's API
#[derive(Debug)]
pub struct OpenAiProvider {
    /// OpenAI API key loaded from environment
    api_key: String,
    /// Model identifier to use (e.g. "gpt-4", "gpt-3.5-turbo")
    model: String,
    base_url: String,
    client: Client,
}

impl OpenAiProvider {
    /// Creates a new OpenAI provider instance
    ///
    /// # Arguments
    /// * `model` - The model identifier to use
    ///
    /// # Returns
    /// * `Result<Self>` - Provider instance or error if API key not found
    pub fn new(model: &str) -> Result<Self> {
        let api_key = api_key_from_env("OPENAI_API_KEY")?;
        Ok(Self::with_api_key(&api_key, model))
    }

    pub fn with_api_key(api_key: &str, model: &str) -> Self {
        OpenAiProvider {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: OPENAI_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Points the provider at another OpenAI-compatible server
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl CompletionService for OpenAiProvider {
    /// Calls OpenAI's chat completions API with the prompt as a single user message
    async fn create(&self, request: &CompletionRequest) -> Result<String> {
        let request_body = json!({
            "model": self.model,
            "messages": [ChatMessage::user(&request.prompt)],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "top_p": 1,
            "frequency_penalty": 0,
            "presence_penalty": 0
        });

        let res = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await;

        let json_resp = read_json(res, Service::Completion, "OpenAI").await?;
        if let Some(content) = json_resp["choices"][0]["message"]["content"].as_str() {
            Ok(content.trim().to_string())
        } else {
            Err(Error::unavailable(
                Service::Completion,
                "No content in OpenAI LLM response",
            ))
        }
    }
}
