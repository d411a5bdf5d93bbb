//! Catalog contract: category hierarchy and localized lookups.

use async_trait::async_trait;

use quayside_core::{CategoryId, LanguageCode, ProductId};

use crate::models::{CategoryNode, CategorySummary, ProductSummary, Store};

use super::ServiceError;

/// Reads the catalog on behalf of navigation and breadcrumb assembly.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// The category hierarchy for a store, localized for one language.
    ///
    /// `max_depth` of 0 means unbounded; `page_size` bounds the number of
    /// nodes the collaborator returns.
    async fn category_hierarchy(
        &self,
        store: &Store,
        language: &LanguageCode,
        max_depth: u32,
        page_size: usize,
    ) -> Result<Vec<CategoryNode>, ServiceError>;

    /// A localized product reference. Deleted products are `Ok(None)`.
    async fn product_for_language(
        &self,
        id: ProductId,
        language: &LanguageCode,
    ) -> Result<Option<ProductSummary>, ServiceError>;

    /// A localized category reference. Deleted categories are `Ok(None)`.
    async fn category_for_language(
        &self,
        id: CategoryId,
        language: &LanguageCode,
    ) -> Result<Option<CategorySummary>, ServiceError>;
}
