//! Customer lookup contract.

use async_trait::async_trait;

use crate::models::{Customer, Store};

use super::ServiceError;

/// Looks up customer accounts within a store.
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Resolve an authenticated principal name to the store's customer
    /// account. An unknown handle is `Ok(None)`.
    async fn customer_by_handle(
        &self,
        store: &Store,
        handle: &str,
    ) -> Result<Option<Customer>, ServiceError>;
}
