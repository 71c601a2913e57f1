//! Customer storage.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::CollectorError;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// A registered customer.
///
/// The caller's token is never part of this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Storage backend with or without persistence.
pub enum Store {
    /// SQLite file storage
    Sqlite(SqliteStore),
    /// In-memory only (no persistence)
    Memory(MemoryStore),
}

impl Store {
    /// Open the SQLite store at `path`, creating the schema if needed.
    pub async fn sqlite(path: &Path) -> Result<Self, CollectorError> {
        info!(path = %path.display(), "Using SQLite customer store");
        Ok(Store::Sqlite(SqliteStore::open(path).await?))
    }

    /// Force memory store.
    pub fn memory() -> Self {
        Store::Memory(MemoryStore::new())
    }

    /// Append a customer and return it with its assigned id.
    pub async fn insert(&self, name: &str, email: &str) -> Result<Customer, CollectorError> {
        match self {
            Store::Sqlite(s) => s.insert(name, email).await,
            Store::Memory(s) => s.insert(name, email).await,
        }
    }

    /// Number of stored customers.
    pub async fn count(&self) -> Result<i64, CollectorError> {
        match self {
            Store::Sqlite(s) => s.count().await,
            Store::Memory(s) => Ok(s.count().await),
        }
    }
}

#[cfg(test)]
impl Store {
    /// Break the SQLite backend so the next insert fails.
    pub(crate) async fn drop_table_for_test(&self) {
        if let Store::Sqlite(s) = self {
            s.drop_table().await;
        }
    }
}
