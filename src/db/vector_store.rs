use super::{storage_error, Database, VectorRow, CREATE_VECTOR_RECORDS};
use crate::core::rag::{check_dimension, rank, ScoredRecord, VectorRecord, VectorStoreProvider};
use crate::errors::Result;
use crate::schema::vector_records;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use tracing::{debug, info};

/// Vector store persisted in a SQLite table, one collection per name
#[derive(Debug)]
pub struct SqliteVectorStore {
    database: Database,
    collection: String,
    dimension: usize,
}

impl SqliteVectorStore {
    /// Opens the store, creating the table when missing
    ///
    /// # Arguments
    /// * `db_path` - SQLite file path
    /// * `collection` - Collection name
    /// * `dimension` - Vector length accepted by the store
    /// * `reset` - Remove existing records of the collection first
    pub fn open(db_path: &str, collection: &str, dimension: usize, reset: bool) -> Result<Self> {
        let database = Database::open(db_path)?;
        let mut conn = database.get_conn()?;
        diesel::sql_query(CREATE_VECTOR_RECORDS)
            .execute(&mut *conn)
            .map_err(storage_error)?;

        if reset {
            let removed = diesel::delete(
                vector_records::table.filter(vector_records::collection.eq(collection)),
            )
            .execute(&mut *conn)
            .map_err(storage_error)?;
            info!("collection '{}' reset, {} record(s) removed", collection, removed);
        }

        Ok(Self {
            database,
            collection: collection.to_string(),
            dimension,
        })
    }

    /// Number of records in the collection
    pub fn count(&self) -> Result<i64> {
        let mut conn = self.database.get_conn()?;
        vector_records::table
            .filter(vector_records::collection.eq(&self.collection))
            .count()
            .get_result(&mut *conn)
            .map_err(storage_error)
    }

    fn load(&self) -> Result<Vec<VectorRecord>> {
        let mut conn = self.database.get_conn()?;
        let rows: Vec<VectorRow> = vector_records::table
            .filter(vector_records::collection.eq(&self.collection))
            .order(vector_records::created_at.asc())
            .load(&mut *conn)
            .map_err(storage_error)?;
        rows.into_iter().map(VectorRow::into_record).collect()
    }
}

#[async_trait]
impl VectorStoreProvider for SqliteVectorStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn upsert(&mut self, record: VectorRecord) -> Result<()> {
        check_dimension(self.dimension, &record.vector)?;
        let now = Utc::now().to_rfc3339();
        let row = VectorRow::from_record(&self.collection, &record, &now)?;
        let mut conn = self.database.get_conn()?;

        diesel::insert_into(vector_records::table)
            .values(&row)
            .on_conflict((vector_records::collection, vector_records::record_id))
            .do_update()
            .set((
                vector_records::vector.eq(&row.vector),
                vector_records::task.eq(&row.task),
                vector_records::result.eq(&row.result),
                vector_records::updated_at.eq(&row.updated_at),
            ))
            .execute(&mut *conn)
            .map_err(storage_error)?;
        debug!(collection = %self.collection, "upserted {}", record.id);
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredRecord>> {
        check_dimension(self.dimension, vector)?;
        let records = self.load()?;
        Ok(rank(vector, &records, top_k))
    }
}
