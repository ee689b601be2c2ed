//! Disk-backed memoization of completion and embedding calls.
//!
//! A single JSON file holds both maps. Every miss calls the wrapped service,
//! stores the value and rewrites the file before the value is returned.

use crate::errors::{Error, Result};
use crate::llm::{CompletionRequest, CompletionService, Embedder};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheData {
    #[serde(default)]
    embeddings: HashMap<String, Vec<f32>>,
    #[serde(default)]
    completions: HashMap<String, String>,
}

/// Cache key of a completion request: prompt and generation parameters
pub fn completion_key(request: &CompletionRequest) -> String {
    let mut hasher = Sha256::new();
    hasher.update(request.prompt.as_bytes());
    hasher.update(request.max_tokens.to_le_bytes());
    hasher.update(request.temperature.to_le_bytes());
    hex::encode(hasher.finalize())
}

/// Response store shared by every [`CachedService`] of a run
#[derive(Debug)]
pub struct ResponseCache {
    path: PathBuf,
    data: Mutex<CacheData>,
}

impl ResponseCache {
    /// Opens the cache file, creating an empty one when it does not exist
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if the file exists but cannot be parsed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.is_file() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)
                .map_err(|e| Error::Cache(format!("parse {}: {}", path.display(), e)))?
        } else {
            let data = CacheData::default();
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, serde_json::to_string(&data)?)?;
            data
        };
        debug!(path = %path.display(), "response cache opened");

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn completion_count(&self) -> usize {
        self.data.lock().await.completions.len()
    }

    pub async fn embedding_count(&self) -> usize {
        self.data.lock().await.embeddings.len()
    }

    async fn completion(&self, key: &str) -> Option<String> {
        self.data.lock().await.completions.get(key).cloned()
    }

    async fn embedding(&self, text: &str) -> Option<Vec<f32>> {
        self.data.lock().await.embeddings.get(text).cloned()
    }

    async fn store_completion(&self, key: String, value: String) -> Result<()> {
        let mut data = self.data.lock().await;
        data.completions.insert(key, value);
        self.flush(&data).await
    }

    async fn store_embedding(&self, text: String, vector: Vec<f32>) -> Result<()> {
        let mut data = self.data.lock().await;
        data.embeddings.insert(text, vector);
        self.flush(&data).await
    }

    async fn flush(&self, data: &CacheData) -> Result<()> {
        let content = serde_json::to_string(data)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| Error::Cache(format!("write {}: {}", self.path.display(), e)))
    }
}

/// Read-through, write-through wrapper around a completion or embedding service
#[derive(Debug)]
pub struct CachedService<S> {
    inner: S,
    cache: Arc<ResponseCache>,
}

impl<S> CachedService<S> {
    pub fn new(inner: S, cache: Arc<ResponseCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}

#[async_trait]
impl<S: CompletionService> CompletionService for CachedService<S> {
    async fn create(&self, request: &CompletionRequest) -> Result<String> {
        let key = completion_key(request);
        if let Some(hit) = self.cache.completion(&key).await {
            debug!(key = %key, "completion cache hit");
            return Ok(hit);
        }
        let response = self.inner.create(request).await?;
        self.cache.store_completion(key, response.clone()).await?;
        Ok(response)
    }
}

#[async_trait]
impl<S: Embedder> Embedder for CachedService<S> {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        if let Some(hit) = self.cache.embedding(text).await {
            debug!("embedding cache hit");
            return Ok(hit);
        }
        let vector = self.inner.embed_text(text).await?;
        self.cache
            .store_embedding(text.to_string(), vector.clone())
            .await?;
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingService {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionService for CountingService {
        async fn create(&self, request: &CompletionRequest) -> Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("{} #{}", request.prompt, n))
        }
    }

    #[async_trait]
    impl Embedder for CountingService {
        async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    #[test]
    fn completion_key_depends_on_parameters() {
        let base = CompletionRequest::new("prompt", 100, 0.5);
        assert_eq!(completion_key(&base), completion_key(&base.clone()));
        assert_ne!(
            completion_key(&base),
            completion_key(&CompletionRequest::new("prompt", 1000, 0.5))
        );
        assert_ne!(
            completion_key(&base),
            completion_key(&CompletionRequest::new("prompt", 100, 0.7))
        );
    }

    #[tokio::test]
    async fn second_completion_is_served_from_cache() {
        let temp = tempfile::tempdir().unwrap();
        let cache = Arc::new(ResponseCache::open(temp.path().join("cache.json")).unwrap());
        let service = CachedService::new(CountingService::default(), cache);
        let request = CompletionRequest::new("hello", 100, 0.5);

        assert_eq!(service.create(&request).await.unwrap(), "hello #1");
        assert_eq!(service.create(&request).await.unwrap(), "hello #1");
        assert_eq!(service.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn entries_survive_reopening() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("cache.json");
        {
            let cache = Arc::new(ResponseCache::open(&path).unwrap());
            let service = CachedService::new(CountingService::default(), cache);
            service.embed_text("some text").await.unwrap();
            service
                .create(&CompletionRequest::new("p", 10, 0.5))
                .await
                .unwrap();
        }

        let cache = ResponseCache::open(&path).unwrap();
        assert_eq!(cache.embedding_count().await, 1);
        assert_eq!(cache.completion_count().await, 1);
    }

    #[test]
    fn open_creates_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("cache.json");
        ResponseCache::open(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn corrupt_file_is_a_cache_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("cache.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(ResponseCache::open(&path), Err(Error::Cache(_))));
    }
}
