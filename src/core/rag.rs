use crate::errors::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Payload stored next to every result vector
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    /// Name of the task that produced the result
    pub task: String,
    /// Result text returned by the execution agent
    pub result: String,
}

/// A persisted `(id, vector, payload)` triple
#[derive(Clone, Debug, PartialEq)]
pub struct VectorRecord {
    /// Unique identifier within the collection
    pub id: String,
    /// Embedding of the result text
    pub vector: Vec<f32>,
    /// Task name and result text
    pub payload: RecordPayload,
}

/// A record returned by a similarity query
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredRecord {
    pub id: String,
    /// Cosine similarity to the query vector
    pub score: f32,
    pub payload: RecordPayload,
}

/// Operations every vector store backend provides
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Name of the collection the store writes to
    fn collection(&self) -> &str;

    /// Length every stored and queried vector must have
    fn dimension(&self) -> usize;

    /// Inserts the record, overwriting any record with the same id
    ///
    /// # Arguments
    /// * `record` - Record to persist
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    async fn upsert(&mut self, record: VectorRecord) -> Result<()>;

    /// Returns up to `top_k` records ordered by descending similarity
    ///
    /// # Arguments
    /// * `vector` - Query vector
    /// * `top_k` - Maximum number of results to return
    ///
    /// # Returns
    /// * `Result<Vec<ScoredRecord>>` - Matching records or error
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredRecord>>;
}

/// Calculates cosine similarity between two vectors
///
/// Returns 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Checks a vector against the store dimension
pub fn check_dimension(expected: usize, vector: &[f32]) -> Result<()> {
    if vector.len() != expected {
        return Err(Error::DimensionMismatch {
            expected,
            actual: vector.len(),
        });
    }
    Ok(())
}

/// Scores `records` against `query` and keeps the best `top_k`
///
/// The sort is stable, so equal scores keep the order of `records`.
pub fn rank<'a, I>(query: &[f32], records: I, top_k: usize) -> Vec<ScoredRecord>
where
    I: IntoIterator<Item = &'a VectorRecord>,
{
    let mut scored: Vec<ScoredRecord> = records
        .into_iter()
        .map(|record| ScoredRecord {
            id: record.id.clone(),
            score: cosine_similarity(query, &record.vector),
            payload: record.payload.clone(),
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_k);
    scored
}

/// In-memory implementation of a vector store
#[derive(Debug)]
pub struct InMemoryVectorStore {
    collection: String,
    dimension: usize,
    records: Vec<VectorRecord>,
}

impl InMemoryVectorStore {
    /// Creates a new empty collection
    ///
    /// # Arguments
    /// * `collection` - Collection name
    /// * `dimension` - Vector length accepted by the store
    pub fn new(collection: &str, dimension: usize) -> Self {
        Self {
            collection: collection.to_string(),
            dimension,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&VectorRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

#[async_trait]
impl VectorStoreProvider for InMemoryVectorStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn upsert(&mut self, record: VectorRecord) -> Result<()> {
        check_dimension(self.dimension, &record.vector)?;
        if let Some(pos) = self.records.iter().position(|r| r.id == record.id) {
            self.records[pos] = record;
        } else {
            self.records.push(record);
        }
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredRecord>> {
        check_dimension(self.dimension, vector)?;
        debug!(collection = %self.collection, top_k, "querying in-memory vector store");
        Ok(rank(vector, &self.records, top_k))
    }
}
