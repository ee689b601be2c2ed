pub mod cache;
mod embedders;
mod llm_client;
mod message;
pub mod providers;

pub use cache::{CachedService, ResponseCache};
pub use embedders::*;
pub use llm_client::*;
pub use message::*;

use crate::errors::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
impl<T: CompletionService + ?Sized> CompletionService for Box<T> {
    async fn create(&self, request: &CompletionRequest) -> Result<String> {
        (**self).create(request).await
    }
}

#[async_trait]
impl<T: CompletionService + ?Sized> CompletionService for Arc<T> {
    async fn create(&self, request: &CompletionRequest) -> Result<String> {
        (**self).create(request).await
    }
}

#[async_trait]
impl<T: Embedder + ?Sized> Embedder for Box<T> {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed_text(text).await
    }
}

#[async_trait]
impl<T: Embedder + ?Sized> Embedder for Arc<T> {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed_text(text).await
    }
}
