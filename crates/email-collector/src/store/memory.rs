//! In-memory customer store.

use super::Customer;
use crate::error::CollectorError;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory customer table.
///
/// Ids start at 1 and are allocated under the write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    customers: RwLock<Vec<Customer>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a customer.
    pub async fn insert(&self, name: &str, email: &str) -> Result<Customer, CollectorError> {
        let mut customers = self.customers.write().await;
        let id = customers.last().map(|c| c.id + 1).unwrap_or(1);
        let customer = Customer {
            id,
            name: name.to_string(),
            email: email.to_string(),
        };
        customers.push(customer.clone());

        debug!(id, "Memory store: customer appended");
        Ok(customer)
    }

    /// Number of stored customers.
    pub async fn count(&self) -> i64 {
        self.customers.read().await.len() as i64
    }
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) async fn get(&self, id: i64) -> Option<Customer> {
        self.customers
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }
}
