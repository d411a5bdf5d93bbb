//! CMS content descriptors.

use serde::{Deserialize, Serialize};

use quayside_core::{ContentId, LanguageCode};

/// Content code whose description overrides the default page metadata.
pub const LANDING_PAGE_CODE: &str = "LANDING_PAGE";

/// The class of a CMS content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    /// A reusable fragment embedded in page layouts.
    Box,
    /// A larger layout section.
    Section,
    /// A standalone CMS page.
    Page,
}

/// A localized description of a content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDescription {
    pub name: String,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    /// SEO-friendly target URL.
    pub url: String,
    pub language: LanguageCode,
}

/// A CMS content item with its localized descriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub code: String,
    pub kind: ContentKind,
    /// Invisible items are excluded from published content maps.
    pub visible: bool,
    pub descriptions: Vec<ContentDescription>,
}

impl ContentItem {
    /// The description for a language, falling back to the first one.
    #[must_use]
    pub fn description_for(&self, language: &LanguageCode) -> Option<&ContentDescription> {
        self.descriptions
            .iter()
            .find(|d| d.language == *language)
            .or_else(|| self.descriptions.first())
    }
}
