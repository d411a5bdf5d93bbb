//! Store-scoped typed caches for the content classes.
//!
//! Two `moka` instances with distinct sizing/eviction profiles: a
//! general-purpose cache (merchant configs, CMS content, CMS pages) and a
//! navigation cache reserved for category trees. Keys carry the store and,
//! where the content class is localized, the language; values are tagged per
//! content class so a hit can never be interpreted as the wrong shape.
//!
//! Entries have no explicit invalidation hook; staleness is bounded only by
//! each instance's eviction profile. Concurrent get/insert from parallel
//! requests is safe, last write wins.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use moka::future::Cache;

use quayside_core::{LanguageCode, StoreId};

use crate::config::CacheSettings;
use crate::models::{CategoryNode, ContentDescription, ContentItem};

/// Composite cache key: store, content class, and language where relevant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    MerchantConfig {
        store: StoreId,
    },
    CmsContent {
        store: StoreId,
        language: LanguageCode,
    },
    CmsPages {
        store: StoreId,
        language: LanguageCode,
    },
    Categories {
        store: StoreId,
        language: LanguageCode,
    },
}

impl fmt::Display for CacheKey {
    /// Canonical string rendering.
    ///
    /// Locale-scoped bundles key their inner map by this same string, so the
    /// rendering is part of the cached shape, not just a debug aid.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MerchantConfig { store } => write!(f, "{store}_CONFIG"),
            Self::CmsContent { store, language } => write!(f, "{store}_CONTENT-{language}"),
            Self::CmsPages { store, language } => write!(f, "{store}_CONTENT_PAGE-{language}"),
            Self::Categories { store, language } => {
                write!(f, "{store}_CATALOG_CATEGORIES-{language}")
            }
        }
    }
}

/// A cached value, tagged by content class.
#[derive(Debug, Clone)]
pub enum CachedBundle {
    /// Merged merchant configuration map.
    Configs(HashMap<String, String>),
    /// CMS box/section items, grouped under their full cache-key string.
    Content(HashMap<String, Vec<ContentItem>>),
    /// CMS page descriptors, grouped under their full cache-key string.
    Pages(HashMap<String, Vec<ContentDescription>>),
    /// Visible category trees, grouped under their full cache-key string.
    Categories(HashMap<String, Vec<CategoryNode>>),
}

impl CachedBundle {
    /// True when the bundle carries no data at all. Empty bundles are never
    /// inserted: a transient empty load must not be cached as authoritative.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Configs(map) => map.is_empty(),
            Self::Content(map) => map.is_empty(),
            Self::Pages(map) => map.is_empty(),
            Self::Categories(map) => map.is_empty(),
        }
    }
}

/// The two shared cache instances.
pub struct ContextCaches {
    general: Cache<CacheKey, CachedBundle>,
    navigation: Cache<CacheKey, CachedBundle>,
}

impl ContextCaches {
    /// Build both instances from the configured sizing profiles.
    #[must_use]
    pub fn new(settings: &CacheSettings) -> Self {
        Self {
            general: Cache::builder()
                .max_capacity(settings.general_capacity)
                .time_to_live(Duration::from_secs(settings.general_ttl_secs))
                .build(),
            navigation: Cache::builder()
                .max_capacity(settings.navigation_capacity)
                .time_to_live(Duration::from_secs(settings.navigation_ttl_secs))
                .build(),
        }
    }

    /// Category trees live in the navigation instance, everything else in
    /// the general one.
    fn instance_for(&self, key: &CacheKey) -> &Cache<CacheKey, CachedBundle> {
        match key {
            CacheKey::Categories { .. } => &self.navigation,
            _ => &self.general,
        }
    }

    /// Look up a bundle.
    pub async fn get(&self, key: &CacheKey) -> Option<CachedBundle> {
        self.instance_for(key).get(key).await
    }

    /// Store a bundle, replacing any previous value under the key.
    pub async fn insert(&self, key: CacheKey, bundle: CachedBundle) {
        self.instance_for(&key).insert(key, bundle).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn language(code: &str) -> LanguageCode {
        LanguageCode::parse(code).unwrap()
    }

    #[test]
    fn test_key_rendering() {
        let store = StoreId::new(1);
        assert_eq!(CacheKey::MerchantConfig { store }.to_string(), "1_CONFIG");
        assert_eq!(
            CacheKey::CmsContent {
                store,
                language: language("en")
            }
            .to_string(),
            "1_CONTENT-en"
        );
        assert_eq!(
            CacheKey::CmsPages {
                store,
                language: language("fr")
            }
            .to_string(),
            "1_CONTENT_PAGE-fr"
        );
        assert_eq!(
            CacheKey::Categories {
                store,
                language: language("en")
            }
            .to_string(),
            "1_CATALOG_CATEGORIES-en"
        );
    }

    #[test]
    fn test_keys_distinguish_store_and_language() {
        let a = CacheKey::CmsContent {
            store: StoreId::new(1),
            language: language("en"),
        };
        let b = CacheKey::CmsContent {
            store: StoreId::new(2),
            language: language("en"),
        };
        let c = CacheKey::CmsContent {
            store: StoreId::new(1),
            language: language("fr"),
        };
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn test_insert_and_get_roundtrip() {
        let caches = ContextCaches::new(&CacheSettings::default());
        let key = CacheKey::MerchantConfig {
            store: StoreId::new(1),
        };
        let bundle =
            CachedBundle::Configs(HashMap::from([("currency".to_owned(), "USD".to_owned())]));

        assert!(caches.get(&key).await.is_none());
        caches.insert(key.clone(), bundle).await;
        let hit = caches.get(&key).await;
        assert!(matches!(hit, Some(CachedBundle::Configs(map)) if map.len() == 1));
    }

    #[test]
    fn test_bundle_is_empty() {
        assert!(CachedBundle::Configs(HashMap::new()).is_empty());
        let populated =
            CachedBundle::Pages(HashMap::from([("1_CONTENT_PAGE-en".to_owned(), vec![])]));
        assert!(!populated.is_empty());
    }
}
