//! Derived page metadata.

use serde::{Deserialize, Serialize};

use super::content::ContentDescription;
use super::store::Store;

/// Title/description/keywords published for the page being rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

impl PageMeta {
    /// The default metadata: every field is the store name.
    #[must_use]
    pub fn for_store(store: &Store) -> Self {
        Self {
            title: store.name.clone(),
            description: store.name.clone(),
            keywords: store.name.clone(),
        }
    }

    /// Override the defaults from a landing-page content description.
    pub fn apply_landing_page(&mut self, description: &ContentDescription) {
        self.title = description.name.clone();
        if let Some(meta) = &description.meta_description {
            self.description = meta.clone();
        }
        if let Some(keywords) = &description.meta_keywords {
            self.keywords = keywords.clone();
        }
    }
}
