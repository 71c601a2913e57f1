//! Signed customer registration.

use crate::error::CollectorError;
use crate::store::{Customer, Store};
use crate::token::TokenCodec;
use tracing::{info, warn};

/// Result of a registration attempt.
///
/// A bad token is not an error: the caller sees the same success-shaped
/// response whether or not the token matched, but no row is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The token matched and the customer was stored.
    Created(Customer),
    /// The token did not match; nothing was stored.
    Rejected,
}

/// Verify `token` for `(name, email)` and store the customer if it matches.
pub async fn register(
    codec: &TokenCodec,
    store: &Store,
    name: &str,
    email: &str,
    token: &str,
) -> Result<RegisterOutcome, CollectorError> {
    if !codec.verify(name, email, token) {
        warn!(email = %email, "Rejected registration with wrong token");
        return Ok(RegisterOutcome::Rejected);
    }

    let customer = store.insert(name, email).await.map_err(|e| {
        warn!(email = %email, error = %e, "Failed to store customer");
        e
    })?;

    info!(id = customer.id, email = %customer.email, "Customer created");
    Ok(RegisterOutcome::Created(customer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn codec() -> TokenCodec {
        TokenCodec::new(SecretString::new("S".to_string()))
    }

    #[tokio::test]
    async fn test_matching_token_creates_customer() {
        let codec = codec();
        let store = Store::memory();
        let token = codec.sign("test user", "test@email.com");

        let outcome = register(&codec, &store, "test user", "test@email.com", &token)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            RegisterOutcome::Created(Customer {
                id: 1,
                name: "test user".into(),
                email: "test@email.com".into(),
            })
        );
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_wrong_token_is_rejected_without_writing() {
        let codec = codec();
        let store = Store::memory();

        let outcome = register(&codec, &store, "test user", "test@email.com", "a")
            .await
            .unwrap();

        assert_eq!(outcome, RegisterOutcome::Rejected);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_token_for_different_name_is_rejected() {
        let codec = codec();
        let store = Store::memory();
        let token = codec.sign("test user", "test@email.com");

        let outcome = register(&codec, &store, "someone else", "test@email.com", &token)
            .await
            .unwrap();

        assert_eq!(outcome, RegisterOutcome::Rejected);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_an_error() {
        let codec = codec();
        let store = Store::Sqlite(crate::store::SqliteStore::open_in_memory().await.unwrap());
        store.drop_table_for_test().await;
        let token = codec.sign("test user", "test@email.com");

        let result = register(&codec, &store, "test user", "test@email.com", &token).await;
        assert!(matches!(result, Err(CollectorError::Storage(_))));
    }
}
