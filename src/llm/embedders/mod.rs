/// Module for OpenAI embedder implementation
pub mod openai_embedder;
/// Module for Ollama embedder implementation
pub mod ollama_embedder;

use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::fmt::Debug;

pub use ollama_embedder::*;
pub use openai_embedder::*;

pub const DEFAULT_EMBEDDER_MODEL: &str = "text-embedding-ada-002";

/// Trait defining interface for text embedding functionality
#[async_trait]
pub trait Embedder: Debug + Send + Sync {
    /// Embeds the given text into a vector of floating point numbers
    ///
    /// Implementations replace internal newlines with spaces before submission.
    ///
    /// # Arguments
    ///
    /// * `text` - The text to embed
    ///
    /// # Returns
    ///
    /// A vector of f32 values of the service's fixed dimension
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>>;
}

/// Builds the embedder named by `provider`
///
/// # Errors
///
/// Returns [`Error::Config`] for an unknown provider or a missing API key
pub fn build_embedder(provider: &str, model: &str) -> Result<Box<dyn Embedder>> {
    match provider {
        "openai" => Ok(Box::new(OpenAIEmbedder::new(model)?)),
        "ollama" => Ok(Box::new(OllamaEmbedder::new(model))),
        _ => Err(Error::Config(format!("Unknown embedder provider '{}'", provider))),
    }
}

/// Reads an embedding array out of a JSON value
///
/// `None` unless the value is a non-empty array of numbers.
pub(crate) fn parse_embedding(value: &serde_json::Value) -> Option<Vec<f32>> {
    value
        .as_array()?
        .iter()
        .map(|x| x.as_f64().map(|f| f as f32))
        .collect::<Option<Vec<_>>>()
        .filter(|v| !v.is_empty())
}
