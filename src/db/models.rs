use crate::core::rag::{RecordPayload, VectorRecord};
use crate::errors::Result;
use crate::schema::vector_records;
use diesel::{Insertable, Queryable};

/// Represents a stored result vector in the database
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = vector_records)]
pub struct VectorRow {
    /// Collection the record belongs to
    pub collection: String,
    /// Record identifier, unique within the collection
    pub record_id: String,
    /// JSON array of the vector components
    pub vector: String,
    /// Name of the task that produced the result
    pub task: String,
    /// Result text
    pub result: String,
    pub created_at: String,
    pub updated_at: String,
}

impl VectorRow {
    /// Builds a row for `record`, stamped with `now`
    pub fn from_record(collection: &str, record: &VectorRecord, now: &str) -> Result<Self> {
        Ok(Self {
            collection: collection.to_string(),
            record_id: record.id.clone(),
            vector: serde_json::to_string(&record.vector)?,
            task: record.payload.task.clone(),
            result: record.payload.result.clone(),
            created_at: now.to_string(),
            updated_at: now.to_string(),
        })
    }

    pub fn into_record(self) -> Result<VectorRecord> {
        Ok(VectorRecord {
            id: self.record_id,
            vector: serde_json::from_str(&self.vector)?,
            payload: RecordPayload {
                task: self.task,
                result: self.result,
            },
        })
    }
}
