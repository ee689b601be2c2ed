use crate::errors::{Error, Result};
use crate::llm::providers::{
    anthropic::AnthropicProvider, ollama::OllamaProvider, openai::OpenAiProvider,
};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

/// A single prompt together with its generation parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            temperature,
        }
    }
}

/// Text generation boundary used by every agent
#[async_trait]
pub trait CompletionService: Debug + Send + Sync {
    /// Generates a continuation for `request.prompt`
    ///
    /// # Returns
    /// * `Result<String>` - Generated text trimmed of surrounding whitespace
    async fn create(&self, request: &CompletionRequest) -> Result<String>;
}

/// Generic LLM client that delegates work to a concrete provider.
#[derive(Debug)]
pub struct LlmClient {
    provider: Box<dyn CompletionService>,
}

impl LlmClient {
    /// Creates a new LLM client with the specified provider and model.
    ///
    /// # Arguments
    /// * `provider_name` - Name of the LLM provider ("openai", "anthropic", or "ollama")
    /// * `model` - Model name to use with the provider
    ///
    /// # Returns
    /// * `Result<LlmClient>` - New LLM client instance or error
    pub fn new(provider_name: &str, model: &str) -> Result<Self> {
        let provider: Box<dyn CompletionService> = match provider_name {
            "openai" => Box::new(OpenAiProvider::new(model)?),
            "anthropic" => Box::new(AnthropicProvider::new(model)?),
            "ollama" => Box::new(OllamaProvider::new(model)?),
            _ => {
                return Err(Error::Config(format!(
                    "Unknown provider '{}'",
                    provider_name
                )))
            }
        };

        Ok(LlmClient { provider })
    }

    /// Wraps an already constructed provider
    pub fn from_provider(provider: Box<dyn CompletionService>) -> Self {
        LlmClient { provider }
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn create(&self, request: &CompletionRequest) -> Result<String> {
        debug!(
            max_tokens = request.max_tokens,
            temperature = request.temperature,
            "prompt: {}",
            request.prompt
        );
        let response = self.provider.create(request).await?;
        debug!("LLM response: {}", response);
        Ok(response)
    }
}
