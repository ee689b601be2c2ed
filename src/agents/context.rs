use crate::core::rag::VectorStoreProvider;
use crate::errors::Result;
use tracing::debug;

/// Fetches the names of the most relevant prior results
pub struct ContextAgent<'a> {
    pub store: &'a dyn VectorStoreProvider,
    pub top_k: usize,
}

impl<'a> ContextAgent<'a> {
    pub fn new(store: &'a dyn VectorStoreProvider, top_k: usize) -> Self {
        Self { store, top_k }
    }

    /// Returns up to `top_k` payload task names, most similar first
    ///
    /// Equal scores keep the order the store returned them in.
    pub async fn retrieve(&self, query: &[f32]) -> Result<Vec<String>> {
        let mut results = self.store.query(query, self.top_k).await?;
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!(
            collection = self.store.collection(),
            "ContextAgent: {} record(s) retrieved",
            results.len()
        );
        Ok(results
            .into_iter()
            .take(self.top_k)
            .map(|r| r.payload.task)
            .collect())
    }
}
