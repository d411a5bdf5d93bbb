//! The breadcrumb trail.
//!
//! A session-scoped ordered navigation history. The trail records which
//! language its labels were rendered in; when the request language changes,
//! the whole trail is rebuilt from the (kind, id) pairs rather than patched
//! step by step (see `context::breadcrumb`).

use serde::{Deserialize, Serialize};

use quayside_core::{CategoryId, ContentId, LanguageCode, ProductId};

/// Fixed URL of the home step.
pub const HOME_URL: &str = "/";

/// Message key for the localized home label.
pub const HOME_LABEL_KEY: &str = "home";

/// What a breadcrumb step points at.
///
/// The entity reference is carried in the variant, so rebuilds match on the
/// variant directly instead of comparing type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreadcrumbTarget {
    Home,
    Product(ProductId),
    Category(CategoryId),
    Page(ContentId),
}

/// One step of the trail: a target plus its localized rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreadcrumbEntry {
    pub target: BreadcrumbTarget,
    pub label: String,
    pub url: String,
}

/// The ordered trail, tagged with the language its labels belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// The language every entry label was rendered in.
    pub language: LanguageCode,
    pub entries: Vec<BreadcrumbEntry>,
}

impl Breadcrumb {
    /// A fresh single-step trail starting at the localized home entry.
    #[must_use]
    pub fn starting_at_home(language: LanguageCode, home: BreadcrumbEntry) -> Self {
        Self {
            language,
            entries: vec![home],
        }
    }

    /// Append a navigation step.
    ///
    /// Called by navigation handlers after a product/category/page view; if
    /// the target is already the last step the trail is left unchanged.
    pub fn push(&mut self, entry: BreadcrumbEntry) {
        if self.entries.last().is_some_and(|e| e.target == entry.target) {
            return;
        }
        self.entries.push(entry);
    }
}
