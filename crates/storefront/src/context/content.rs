//! Cache-aside assembly of the four content classes.
//!
//! The same pattern is applied uniformly: build the typed key, consult the
//! cache when the store allows it, load through the collaborator on a miss,
//! and cache only non-empty results. At most one load is attempted per
//! content class per request; a failed load publishes the empty default.
//!
//! Locale-scoped bundles are maps keyed by the full cache-key string, and
//! the published value is the slice under this request's own key. Downstream
//! consumers depend on that one-entry-per-key shape.

use std::collections::HashMap;

use tracing::instrument;

use quayside_core::LanguageCode;

use crate::config::StorefrontConfig;
use crate::models::{
    CategoryNode, ContentDescription, ContentItem, ContentKind, LANDING_PAGE_CODE, PageMeta, Store,
};
use crate::services::{ConfigKind, ServiceError, Services};

use super::cache::{CacheKey, CachedBundle, ContextCaches};

/// Configuration key carrying the public URL scheme.
pub const SHOP_SCHEME_KEY: &str = "shop_scheme";

/// Configuration key carrying the social app ID.
pub const SOCIAL_APP_ID_KEY: &str = "social_app_id";

/// Node budget for the published navigation tree.
const NAVIGATION_NODE_LIMIT: usize = 200;

/// The cache-aside core shared by all four content classes.
///
/// Returns `None` when the load failed; the caller publishes its empty
/// default in that case.
async fn load_through<F, Fut>(
    caches: &ContextCaches,
    store: &Store,
    key: CacheKey,
    load: F,
) -> Option<CachedBundle>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<CachedBundle, ServiceError>>,
{
    if !store.caching_enabled {
        return match load().await {
            Ok(bundle) => Some(bundle),
            Err(err) => {
                tracing::error!(key = %key, error = %err, "content load failed");
                None
            }
        };
    }

    if let Some(hit) = caches.get(&key).await {
        tracing::debug!(key = %key, "content cache hit");
        return Some(hit);
    }

    match load().await {
        Ok(bundle) => {
            // An empty result may be transient; recompute until non-empty.
            if !bundle.is_empty() {
                caches.insert(key, bundle.clone()).await;
            }
            Some(bundle)
        }
        Err(err) => {
            tracing::error!(key = %key, error = %err, "content load failed");
            None
        }
    }
}

// =============================================================================
// Merchant configuration
// =============================================================================

/// The merged merchant configuration map for a store.
#[instrument(skip_all, fields(store = %store.code))]
pub async fn merchant_configs(
    config: &StorefrontConfig,
    services: &Services,
    caches: &ContextCaches,
    store: &Store,
) -> HashMap<String, String> {
    let key = CacheKey::MerchantConfig { store: store.id };
    let loaded = load_through(caches, store, key, || {
        load_merchant_configs(config, services, store)
    })
    .await;

    match loaded {
        Some(CachedBundle::Configs(map)) => map,
        _ => HashMap::new(),
    }
}

async fn load_merchant_configs(
    config: &StorefrontConfig,
    services: &Services,
    store: &Store,
) -> Result<CachedBundle, ServiceError> {
    let general = services
        .merchant_config
        .list_by_kind(ConfigKind::General, store)
        .await?;
    let social = services
        .merchant_config
        .list_by_kind(ConfigKind::Social, store)
        .await?;

    if general.is_empty() && social.is_empty() {
        return Ok(CachedBundle::Configs(HashMap::new()));
    }

    let mut map: HashMap<String, String> = general
        .into_iter()
        .chain(social)
        .map(|entry| (entry.key, entry.value))
        .collect();

    map.insert(SHOP_SCHEME_KEY.to_owned(), config.shop_scheme.clone());
    if let Some(app_id) = &config.social_app_id {
        map.insert(SOCIAL_APP_ID_KEY.to_owned(), app_id.clone());
    }

    if let Some(overrides) = services.merchant_config.merchant_overrides(store).await? {
        for (key, value) in overrides.flatten() {
            map.insert(key, value);
        }
    }

    Ok(CachedBundle::Configs(map))
}

// =============================================================================
// CMS boxes and sections
// =============================================================================

/// The visible box/section descriptions for a store and language, keyed by
/// content code.
#[instrument(skip_all, fields(store = %store.code, language = %language))]
pub async fn cms_content(
    services: &Services,
    caches: &ContextCaches,
    store: &Store,
    language: &LanguageCode,
) -> HashMap<String, ContentDescription> {
    let key = CacheKey::CmsContent {
        store: store.id,
        language: language.clone(),
    };
    let loaded = load_through(caches, store, key.clone(), || {
        load_cms_content(services, store, language)
    })
    .await;

    let Some(CachedBundle::Content(by_key)) = loaded else {
        return HashMap::new();
    };
    let Some(items) = by_key.get(&key.to_string()) else {
        return HashMap::new();
    };

    let mut map = HashMap::new();
    for item in items {
        if item.visible
            && let Some(description) = item.description_for(language)
        {
            map.insert(item.code.clone(), description.clone());
        }
    }
    map
}

async fn load_cms_content(
    services: &Services,
    store: &Store,
    language: &LanguageCode,
) -> Result<CachedBundle, ServiceError> {
    let items = services
        .content
        .list_by_kinds(&[ContentKind::Box, ContentKind::Section], store, language)
        .await?;

    // Group each visible item under the cache key of every language it is
    // described in, so one load covers all locales of the store.
    let mut grouped: HashMap<String, Vec<ContentItem>> = HashMap::new();
    for item in items {
        if !item.visible {
            continue;
        }
        let mut languages: Vec<&LanguageCode> =
            item.descriptions.iter().map(|d| &d.language).collect();
        languages.dedup();
        for item_language in languages {
            let entry_key = CacheKey::CmsContent {
                store: store.id,
                language: item_language.clone(),
            };
            grouped
                .entry(entry_key.to_string())
                .or_default()
                .push(item.clone());
        }
    }

    Ok(CachedBundle::Content(grouped))
}

// =============================================================================
// CMS page index
// =============================================================================

/// The localized CMS page descriptors for a store and language.
#[instrument(skip_all, fields(store = %store.code, language = %language))]
pub async fn cms_pages(
    services: &Services,
    caches: &ContextCaches,
    store: &Store,
    language: &LanguageCode,
) -> Vec<ContentDescription> {
    let key = CacheKey::CmsPages {
        store: store.id,
        language: language.clone(),
    };
    let loaded = load_through(caches, store, key.clone(), || {
        load_cms_pages(services, store, language, &key)
    })
    .await;

    let Some(CachedBundle::Pages(by_key)) = loaded else {
        return Vec::new();
    };
    by_key.get(&key.to_string()).cloned().unwrap_or_default()
}

async fn load_cms_pages(
    services: &Services,
    store: &Store,
    language: &LanguageCode,
    key: &CacheKey,
) -> Result<CachedBundle, ServiceError> {
    let descriptions = services
        .content
        .list_names_by_kinds(&[ContentKind::Page], store, language)
        .await?;

    let mut grouped = HashMap::new();
    if !descriptions.is_empty() {
        grouped.insert(key.to_string(), descriptions);
    }
    Ok(CachedBundle::Pages(grouped))
}

// =============================================================================
// Category navigation tree
// =============================================================================

/// The visible category navigation tree for a store and language, capped at
/// the node budget. Served from the dedicated navigation cache instance.
#[instrument(skip_all, fields(store = %store.code, language = %language))]
pub async fn navigation_categories(
    services: &Services,
    caches: &ContextCaches,
    store: &Store,
    language: &LanguageCode,
) -> Vec<CategoryNode> {
    let key = CacheKey::Categories {
        store: store.id,
        language: language.clone(),
    };
    let loaded = load_through(caches, store, key.clone(), || {
        load_navigation_categories(services, store, language, &key)
    })
    .await;

    let Some(CachedBundle::Categories(by_key)) = loaded else {
        return Vec::new();
    };
    by_key.get(&key.to_string()).cloned().unwrap_or_default()
}

async fn load_navigation_categories(
    services: &Services,
    store: &Store,
    language: &LanguageCode,
    key: &CacheKey,
) -> Result<CachedBundle, ServiceError> {
    let roots = services
        .catalog
        .category_hierarchy(store, language, 0, NAVIGATION_NODE_LIMIT)
        .await?;

    let visible = prune_invisible(roots);
    let capped = cap_nodes(visible, NAVIGATION_NODE_LIMIT);

    let mut grouped = HashMap::new();
    if !capped.is_empty() {
        grouped.insert(key.to_string(), capped);
    }
    Ok(CachedBundle::Categories(grouped))
}

/// Drop invisible nodes, and with them their whole subtree.
fn prune_invisible(nodes: Vec<CategoryNode>) -> Vec<CategoryNode> {
    nodes
        .into_iter()
        .filter(|node| node.visible)
        .map(|mut node| {
            node.children = prune_invisible(std::mem::take(&mut node.children));
            node
        })
        .collect()
}

/// Truncate the forest depth-first to at most `budget` nodes in total.
fn cap_nodes(nodes: Vec<CategoryNode>, budget: usize) -> Vec<CategoryNode> {
    fn take(node: CategoryNode, remaining: &mut usize) -> Option<CategoryNode> {
        if *remaining == 0 {
            return None;
        }
        *remaining -= 1;
        let mut node = node;
        node.children = node
            .children
            .into_iter()
            .filter_map(|child| take(child, remaining))
            .collect();
        Some(node)
    }

    let mut remaining = budget;
    nodes
        .into_iter()
        .filter_map(|node| take(node, &mut remaining))
        .collect()
}

// =============================================================================
// Page metadata
// =============================================================================

/// Derive page metadata: the store name everywhere, overridden by the
/// landing-page content description when the CMS map carries one.
#[must_use]
pub fn derive_page_meta(
    store: &Store,
    content: &HashMap<String, ContentDescription>,
) -> PageMeta {
    let mut meta = PageMeta::for_store(store);
    if let Some(landing) = content.get(LANDING_PAGE_CODE) {
        meta.apply_landing_page(landing);
    }
    meta
}
