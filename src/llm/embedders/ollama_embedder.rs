use super::{parse_embedding, Embedder};
use crate::errors::{Error, Result, Service};
use crate::llm::providers::ollama::ollama_host;
use crate::llm::providers::read_json;
use crate::utils::normalize_for_embedding;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Embedder backed by a local Ollama server
#[derive(Debug)]
pub struct OllamaEmbedder {
    pub model: String,
    base_url: String,
    client: Client,
}

impl OllamaEmbedder {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            base_url: ollama_host(),
            client: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let body = json!({
            "model": self.model,
            "prompt": normalize_for_embedding(text)
        });

        let res = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&body)
            .send()
            .await;

        let json_resp = read_json(res, Service::Embedding, "Ollama").await?;
        parse_embedding(&json_resp["embedding"])
            .ok_or_else(|| Error::unavailable(Service::Embedding, "No embedding in Ollama response"))
    }
}
