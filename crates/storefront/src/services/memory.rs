//! Seeded in-memory collaborator implementations.
//!
//! Persistence is out of scope for this service, so these implementations
//! back the collaborator contracts for local development and tests. The
//! [`demo_services`] constructor wires a complete seeded set behind the
//! same trait objects a production deployment would use.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;

use quayside_core::{
    CategoryId, ContentId, CountryCode, CustomerId, LanguageCode, Locale, ProductId, StoreId,
};

use crate::models::{
    CategoryNode, CategorySummary, ContentDescription, ContentItem, ContentKind, Customer,
    LANDING_PAGE_CODE, ProductSummary, Store,
};

use super::{
    CatalogService, ConfigEntry, ConfigKind, ContentService, CustomerService, GeoAddress,
    GeoIpService, MerchantConfigService, MerchantOverrides, MessageCatalog, ServiceError, Services,
    StoreService,
};

// =============================================================================
// Stores
// =============================================================================

/// Store lookup over a fixed set of stores.
pub struct InMemoryStores {
    by_code: HashMap<String, Store>,
}

impl InMemoryStores {
    #[must_use]
    pub fn new(stores: impl IntoIterator<Item = Store>) -> Self {
        Self {
            by_code: stores.into_iter().map(|s| (s.code.clone(), s)).collect(),
        }
    }
}

#[async_trait]
impl StoreService for InMemoryStores {
    async fn store_by_code(&self, code: &str) -> Result<Option<Store>, ServiceError> {
        Ok(self.by_code.get(code).cloned())
    }
}

// =============================================================================
// Customers
// =============================================================================

/// Customer lookup over a fixed set of accounts.
pub struct InMemoryCustomers {
    customers: Vec<Customer>,
}

impl InMemoryCustomers {
    #[must_use]
    pub fn new(customers: Vec<Customer>) -> Self {
        Self { customers }
    }
}

#[async_trait]
impl CustomerService for InMemoryCustomers {
    async fn customer_by_handle(
        &self,
        store: &Store,
        handle: &str,
    ) -> Result<Option<Customer>, ServiceError> {
        Ok(self
            .customers
            .iter()
            .find(|c| c.store_id == store.id && c.handle == handle)
            .cloned())
    }
}

// =============================================================================
// Content
// =============================================================================

/// CMS content over a fixed item list.
pub struct InMemoryContent {
    items: Vec<ContentItem>,
}

impl InMemoryContent {
    #[must_use]
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl ContentService for InMemoryContent {
    async fn list_by_kinds(
        &self,
        kinds: &[ContentKind],
        _store: &Store,
        _language: &LanguageCode,
    ) -> Result<Vec<ContentItem>, ServiceError> {
        Ok(self
            .items
            .iter()
            .filter(|item| kinds.contains(&item.kind))
            .cloned()
            .collect())
    }

    async fn list_names_by_kinds(
        &self,
        kinds: &[ContentKind],
        _store: &Store,
        language: &LanguageCode,
    ) -> Result<Vec<ContentDescription>, ServiceError> {
        Ok(self
            .items
            .iter()
            .filter(|item| kinds.contains(&item.kind))
            .filter_map(|item| item.description_for(language).cloned())
            .collect())
    }

    async fn page_for_language(
        &self,
        id: ContentId,
        language: &LanguageCode,
    ) -> Result<Option<ContentItem>, ServiceError> {
        Ok(self
            .items
            .iter()
            .find(|item| {
                item.id == id
                    && item.kind == ContentKind::Page
                    && item.visible
                    && item.description_for(language).is_some()
            })
            .cloned())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Catalog reads over per-language seeded trees and summaries.
pub struct InMemoryCatalog {
    trees: HashMap<LanguageCode, Vec<CategoryNode>>,
    products: HashMap<ProductId, HashMap<LanguageCode, ProductSummary>>,
    categories: HashMap<CategoryId, HashMap<LanguageCode, CategorySummary>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(
        trees: HashMap<LanguageCode, Vec<CategoryNode>>,
        products: HashMap<ProductId, HashMap<LanguageCode, ProductSummary>>,
        categories: HashMap<CategoryId, HashMap<LanguageCode, CategorySummary>>,
    ) -> Self {
        Self {
            trees,
            products,
            categories,
        }
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn category_hierarchy(
        &self,
        _store: &Store,
        language: &LanguageCode,
        _max_depth: u32,
        page_size: usize,
    ) -> Result<Vec<CategoryNode>, ServiceError> {
        let mut roots = self.trees.get(language).cloned().unwrap_or_default();
        roots.truncate(page_size);
        Ok(roots)
    }

    async fn product_for_language(
        &self,
        id: ProductId,
        language: &LanguageCode,
    ) -> Result<Option<ProductSummary>, ServiceError> {
        Ok(self
            .products
            .get(&id)
            .and_then(|by_lang| by_lang.get(language))
            .cloned())
    }

    async fn category_for_language(
        &self,
        id: CategoryId,
        language: &LanguageCode,
    ) -> Result<Option<CategorySummary>, ServiceError> {
        Ok(self
            .categories
            .get(&id)
            .and_then(|by_lang| by_lang.get(language))
            .cloned())
    }
}

// =============================================================================
// Merchant configuration
// =============================================================================

/// Fixed per-store configuration.
pub struct StaticMerchantConfig {
    general: Vec<ConfigEntry>,
    social: Vec<ConfigEntry>,
    overrides: Option<MerchantOverrides>,
}

impl StaticMerchantConfig {
    #[must_use]
    pub fn new(
        general: Vec<ConfigEntry>,
        social: Vec<ConfigEntry>,
        overrides: Option<MerchantOverrides>,
    ) -> Self {
        Self {
            general,
            social,
            overrides,
        }
    }
}

#[async_trait]
impl MerchantConfigService for StaticMerchantConfig {
    async fn list_by_kind(
        &self,
        kind: ConfigKind,
        _store: &Store,
    ) -> Result<Vec<ConfigEntry>, ServiceError> {
        Ok(match kind {
            ConfigKind::General => self.general.clone(),
            ConfigKind::Social => self.social.clone(),
        })
    }

    async fn merchant_overrides(
        &self,
        _store: &Store,
    ) -> Result<Option<MerchantOverrides>, ServiceError> {
        Ok(self.overrides.clone())
    }
}

// =============================================================================
// Geo-IP
// =============================================================================

/// A geo resolver with no backend; every lookup fails.
///
/// The default for local development: guests fall back to the store's
/// configured address.
pub struct OfflineGeo;

#[async_trait]
impl GeoIpService for OfflineGeo {
    async fn locate(&self, _ip: IpAddr) -> Result<GeoAddress, ServiceError> {
        Err(ServiceError::Unavailable(
            "no geo-ip backend configured".to_owned(),
        ))
    }
}

/// A geo resolver that answers every lookup with one fixed address.
pub struct FixedGeo(pub GeoAddress);

#[async_trait]
impl GeoIpService for FixedGeo {
    async fn locate(&self, _ip: IpAddr) -> Result<GeoAddress, ServiceError> {
        Ok(self.0.clone())
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Message lookup over a fixed (key, language) table, echoing unknown keys.
#[derive(Default)]
pub struct StaticMessages {
    entries: HashMap<(String, String), String>,
}

impl StaticMessages {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, language: &str, text: &str) {
        self.entries
            .insert((key.to_owned(), language.to_owned()), text.to_owned());
    }
}

impl MessageCatalog for StaticMessages {
    fn message(&self, key: &str, locale: &Locale) -> String {
        self.entries
            .get(&(key.to_owned(), locale.language.as_str().to_owned()))
            .cloned()
            .unwrap_or_else(|| key.to_owned())
    }
}

// =============================================================================
// Demo seed
// =============================================================================

fn leaf(id: i32, code: &str, label: &str, visible: bool) -> CategoryNode {
    CategoryNode {
        id: CategoryId::new(id),
        code: code.to_owned(),
        label: label.to_owned(),
        url: format!("/category/{code}"),
        visible,
        children: vec![],
    }
}

fn description(language: &LanguageCode, name: &str, url: &str) -> ContentDescription {
    ContentDescription {
        name: name.to_owned(),
        meta_description: Some(format!("{name} page")),
        meta_keywords: None,
        url: url.to_owned(),
        language: language.clone(),
    }
}

/// A complete seeded collaborator set for local development.
///
/// One store (`DEFAULT`), an English and French catalog, a landing-page
/// content box, two CMS pages, and localized home labels.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn demo_services() -> Services {
    let en = LanguageCode::default();
    let fr = LanguageCode::parse("fr").unwrap_or_default();

    let store = Store {
        id: StoreId::new(1),
        code: "DEFAULT".to_owned(),
        name: "Quayside".to_owned(),
        default_language: en.clone(),
        template: None,
        country: CountryCode::default(),
        zone: None,
        state_province: Some("California".to_owned()),
        caching_enabled: true,
    };

    let mut shoes_en = leaf(10, "shoes", "Shoes", true);
    shoes_en.children = vec![leaf(11, "boots", "Boots", true)];
    let mut shoes_fr = leaf(10, "shoes", "Chaussures", true);
    shoes_fr.children = vec![leaf(11, "boots", "Bottes", true)];

    let trees = HashMap::from([
        (
            en.clone(),
            vec![
                shoes_en,
                leaf(20, "accessories", "Accessories", true),
                leaf(30, "archive", "Archive", false),
            ],
        ),
        (
            fr.clone(),
            vec![
                shoes_fr,
                leaf(20, "accessories", "Accessoires", true),
                leaf(30, "archive", "Archives", false),
            ],
        ),
    ]);

    let products = HashMap::from([(
        ProductId::new(100),
        HashMap::from([
            (
                en.clone(),
                ProductSummary {
                    id: ProductId::new(100),
                    name: "Harbor boot".to_owned(),
                    url: "/product/harbor-boot".to_owned(),
                },
            ),
            (
                fr.clone(),
                ProductSummary {
                    id: ProductId::new(100),
                    name: "Botte du port".to_owned(),
                    url: "/produit/botte-du-port".to_owned(),
                },
            ),
        ]),
    )]);

    let categories = HashMap::from([
        (
            CategoryId::new(10),
            HashMap::from([
                (
                    en.clone(),
                    CategorySummary {
                        id: CategoryId::new(10),
                        name: "Shoes".to_owned(),
                        url: "/category/shoes".to_owned(),
                    },
                ),
                (
                    fr.clone(),
                    CategorySummary {
                        id: CategoryId::new(10),
                        name: "Chaussures".to_owned(),
                        url: "/categorie/chaussures".to_owned(),
                    },
                ),
            ]),
        ),
        (
            CategoryId::new(20),
            HashMap::from([(
                en.clone(),
                CategorySummary {
                    id: CategoryId::new(20),
                    name: "Accessories".to_owned(),
                    url: "/category/accessories".to_owned(),
                },
            )]),
        ),
    ]);

    let content_items = vec![
        ContentItem {
            id: ContentId::new(200),
            code: LANDING_PAGE_CODE.to_owned(),
            kind: ContentKind::Box,
            visible: true,
            descriptions: vec![
                description(&en, "Welcome to Quayside", "/"),
                description(&fr, "Bienvenue chez Quayside", "/"),
            ],
        },
        ContentItem {
            id: ContentId::new(201),
            code: "hero_banner".to_owned(),
            kind: ContentKind::Box,
            visible: true,
            descriptions: vec![description(&en, "Summer arrivals", "/collections/summer")],
        },
        ContentItem {
            id: ContentId::new(202),
            code: "retired_promo".to_owned(),
            kind: ContentKind::Section,
            visible: false,
            descriptions: vec![description(&en, "Old promo", "/promo")],
        },
        ContentItem {
            id: ContentId::new(300),
            code: "about-us".to_owned(),
            kind: ContentKind::Page,
            visible: true,
            descriptions: vec![
                description(&en, "About us", "/pages/about-us"),
                description(&fr, "A propos", "/pages/a-propos"),
            ],
        },
        ContentItem {
            id: ContentId::new(301),
            code: "shipping-policy".to_owned(),
            kind: ContentKind::Page,
            visible: true,
            descriptions: vec![description(&en, "Shipping policy", "/pages/shipping-policy")],
        },
    ];

    let general = vec![
        ConfigEntry {
            key: "currency".to_owned(),
            value: "USD".to_owned(),
        },
        ConfigEntry {
            key: "support_email".to_owned(),
            value: "support@quayside.dev".to_owned(),
        },
    ];
    let social = vec![ConfigEntry {
        key: "instagram_handle".to_owned(),
        value: "quayside".to_owned(),
    }];
    let overrides = MerchantOverrides {
        display_search_box: true,
        display_contact_us: true,
        display_shipping: true,
        display_customer_section: false,
        allow_purchase_items: true,
    };

    let customers = vec![Customer {
        id: CustomerId::new(500),
        store_id: StoreId::new(1),
        handle: "alex@example.com".to_owned(),
        display_name: "Alex".to_owned(),
        anonymous: false,
    }];

    let mut messages = StaticMessages::new();
    messages.insert("home", "en", "Home");
    messages.insert("home", "fr", "Accueil");

    Services {
        stores: Arc::new(InMemoryStores::new([store])),
        customers: Arc::new(InMemoryCustomers::new(customers)),
        content: Arc::new(InMemoryContent::new(content_items)),
        catalog: Arc::new(InMemoryCatalog::new(trees, products, categories)),
        merchant_config: Arc::new(StaticMerchantConfig::new(general, social, Some(overrides))),
        geo: Arc::new(OfflineGeo),
        messages: Arc::new(messages),
    }
}
