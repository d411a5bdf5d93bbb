//! Store (tenant) lookup contract.

use async_trait::async_trait;

use crate::models::Store;

use super::ServiceError;

/// Looks up stores by their stable code.
#[async_trait]
pub trait StoreService: Send + Sync {
    /// Resolve a store code. An unknown code is `Ok(None)`.
    async fn store_by_code(&self, code: &str) -> Result<Option<Store>, ServiceError>;
}
