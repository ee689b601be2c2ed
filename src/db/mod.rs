mod models;
mod vector_store;

use crate::errors::{Error, Result, Service};
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

pub use models::*;
pub use vector_store::*;

pub(crate) const CREATE_VECTOR_RECORDS: &str = "CREATE TABLE IF NOT EXISTS vector_records (
    collection TEXT NOT NULL,
    record_id TEXT NOT NULL,
    vector TEXT NOT NULL,
    task TEXT NOT NULL,
    result TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (collection, record_id)
)";

/// Maps a storage failure to `ServiceUnavailable`
pub(crate) fn storage_error(e: impl std::fmt::Display) -> Error {
    Error::unavailable(Service::VectorStore, e)
}

#[derive(Clone, Debug)]
pub struct Database {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl Database {
    /// Opens a pooled connection to the SQLite file at `db_path`
    pub fn open(db_path: &str) -> Result<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(db_path);
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(storage_error)?;

        Ok(Database {
            pool: Arc::new(pool),
        })
    }

    pub fn get_conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        self.pool.get().map_err(storage_error)
    }
}
