use super::{parse_embedding, Embedder};
use crate::errors::{Error, Result, Service};
use crate::llm::providers::openai::OPENAI_BASE_URL;
use crate::llm::providers::{api_key_from_env, read_json};
use crate::utils::normalize_for_embedding;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// OpenAI embedder implementation that uses OpenAI's API to generate text embeddings
#[derive(Debug)]
pub struct OpenAIEmbedder {
    /// OpenAI API key used for authentication
    api_key: String,
    /// Name of the OpenAI model to use for embeddings
    pub model: String,
    base_url: String,
    client: Client,
}

impl OpenAIEmbedder {
    /// Creates a new OpenAIEmbedder instance
    ///
    /// # Arguments
    ///
    /// * `model` - Name of the OpenAI model to use
    ///
    /// # Errors
    ///
    /// Fails if the OPENAI_API_KEY environment variable is not set
    pub fn new(model: &str) -> Result<Self> {
        let api_key = api_key_from_env("OPENAI_API_KEY")?;
        Ok(Self::with_api_key(&api_key, model))
    }

    pub fn with_api_key(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: OPENAI_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let body = json!({
            "input": [normalize_for_embedding(text)],
            "model": self.model
        });

        let res = self
            .client
            .post(format!("{}/v1/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await;

        let json_resp = read_json(res, Service::Embedding, "OpenAI").await?;
        parse_embedding(&json_resp["data"][0]["embedding"])
            .ok_or_else(|| Error::unavailable(Service::Embedding, "No embedding in OpenAI response"))
    }
}
