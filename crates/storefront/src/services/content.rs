//! CMS content contract.

use async_trait::async_trait;

use quayside_core::{ContentId, LanguageCode};

use crate::models::{ContentDescription, ContentItem, ContentKind, Store};

use super::ServiceError;

/// Lists and resolves CMS content for a store.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// All content items of the given kinds, with their descriptions.
    async fn list_by_kinds(
        &self,
        kinds: &[ContentKind],
        store: &Store,
        language: &LanguageCode,
    ) -> Result<Vec<ContentItem>, ServiceError>;

    /// Localized name descriptors of the given kinds (used for the page
    /// index, which does not need full item bodies).
    async fn list_names_by_kinds(
        &self,
        kinds: &[ContentKind],
        store: &Store,
        language: &LanguageCode,
    ) -> Result<Vec<ContentDescription>, ServiceError>;

    /// A single content page by ID, for breadcrumb re-resolution.
    /// Unpublished or deleted pages are `Ok(None)`.
    async fn page_for_language(
        &self,
        id: ContentId,
        language: &LanguageCode,
    ) -> Result<Option<ContentItem>, ServiceError>;
}
