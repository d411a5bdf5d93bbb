//! Catalog shapes consumed by navigation and breadcrumb assembly.
//!
//! Full product/category view-model population lives with the catalog
//! collaborator; this layer only needs localized labels, URLs, and the
//! category hierarchy for navigation.

use serde::{Deserialize, Serialize};

use quayside_core::{CategoryId, ProductId};

/// One node of the category navigation tree, localized for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub code: String,
    /// Localized display label.
    pub label: String,
    /// SEO-friendly target URL.
    pub url: String,
    pub visible: bool,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Total number of nodes in this subtree, including self.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// A localized product reference, enough to rebuild a breadcrumb step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub url: String,
}

/// A localized category reference, enough to rebuild a breadcrumb step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    pub url: String,
}
