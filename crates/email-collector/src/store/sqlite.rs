//! SQLite-backed customer store.

use super::Customer;
use crate::error::CollectorError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

const CREATE_CUSTOMERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS customers (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name VARCHAR(128) NOT NULL,
  email VARCHAR(128) NOT NULL)";

/// Customer table in a SQLite database.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    ///
    /// Creates the parent directory if it does not exist, enables WAL journal
    /// mode, sets a 5-second busy timeout and ensures the table exists.
    pub async fn open(path: &Path) -> Result<Self, CollectorError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!(path = %path.display(), "Database opened");
        Self::with_pool(pool).await
    }

    /// Open an in-memory database (for testing).
    pub async fn open_in_memory() -> Result<Self, CollectorError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        // Every connection to `:memory:` is a separate database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: Pool<Sqlite>) -> Result<Self, CollectorError> {
        sqlx::query(CREATE_CUSTOMERS_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert a customer; the id comes from the table's auto-increment.
    pub async fn insert(&self, name: &str, email: &str) -> Result<Customer, CollectorError> {
        let result = sqlx::query("INSERT INTO customers (name, email) VALUES (?, ?)")
            .bind(name)
            .bind(email)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        if id <= 0 {
            return Err(CollectorError::Storage(
                "insert did not report a row id".to_string(),
            ));
        }

        debug!(id, "Customer row inserted");
        Ok(Customer {
            id,
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// Number of stored customers.
    pub async fn count(&self) -> Result<i64, CollectorError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
impl SqliteStore {
    pub(crate) async fn get(&self, id: i64) -> Result<Option<Customer>, CollectorError> {
        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT id, name, email FROM customers WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(id, name, email)| Customer { id, name, email }))
    }

    pub(crate) async fn drop_table(&self) {
        sqlx::query("DROP TABLE customers")
            .execute(&self.pool)
            .await
            .unwrap();
    }
}
