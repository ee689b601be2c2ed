use super::read_json;
use crate::errors::{Error, Result, Service};
use crate::llm::{CompletionRequest, CompletionService};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

pub const OLLAMA_DEFAULT_HOST: &str = "http://localhost:11434";

/// Base URL of the local Ollama server, `OLLAMA_HOST` when set
pub fn ollama_host() -> String {
    std::env::var("OLLAMA_HOST").unwrap_or_else(|_| OLLAMA_DEFAULT_HOST.to_string())
}

/// Provider implementation for Ollama's local API
#[derive(Debug)]
pub struct OllamaProvider {
    /// Model identifier to use (e.g. "llama3", "mistral")
    model: String,
    base_url: String,
    client: Client,
}

impl OllamaProvider {
    /// Creates a new Ollama provider instance
    ///
    /// # Arguments
    /// * `model` - The model identifier to use
    pub fn new(model: &str) -> Result<Self> {
        Ok(OllamaProvider {
            model: model.to_string(),
            base_url: ollama_host(),
            client: Client::new(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl CompletionService for OllamaProvider {
    /// Calls Ollama's generate API without streaming
    async fn create(&self, request: &CompletionRequest) -> Result<String> {
        let request_body = json!({
            "model": self.model,
            "prompt": request.prompt,
            "stream": false,
            "options": {
                "num_predict": request.max_tokens,
                "temperature": request.temperature
            }
        });

        let res = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body)
            .send()
            .await;

        let json_resp = read_json(res, Service::Completion, "Ollama").await?;
        if let Some(content) = json_resp["response"].as_str() {
            Ok(content.trim().to_string())
        } else {
            Err(Error::unavailable(
                Service::Completion,
                "No content in Ollama LLM response",
            ))
        }
    }
}
