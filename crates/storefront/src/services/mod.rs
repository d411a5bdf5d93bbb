//! Collaborator contracts for the context pipeline.
//!
//! The pipeline never talks to persistence, geo-IP, or message bundles
//! directly; it goes through these traits. Absence of an entity is normal
//! control flow (`Ok(None)` / an empty list), never an error — errors are
//! reserved for collaborator failures (backend down, network error).
//!
//! # Modules
//!
//! - `stores` - Store (tenant) lookup
//! - `customers` - Customer lookup by principal name
//! - `content` - CMS content listing and page lookup
//! - `catalog` - Category hierarchy and localized product/category lookup
//! - `merchant_config` - Per-store configuration entries and overrides
//! - `geo` - Geo-IP address resolution
//! - `messages` - Localized UI message lookup
//! - `memory` - Seeded in-memory implementations (development and tests)

pub mod catalog;
pub mod content;
pub mod customers;
pub mod geo;
pub mod memory;
pub mod merchant_config;
pub mod messages;
pub mod stores;

use std::sync::Arc;

pub use catalog::CatalogService;
pub use content::ContentService;
pub use customers::CustomerService;
pub use geo::{GeoAddress, GeoIpService};
pub use merchant_config::{ConfigEntry, ConfigKind, MerchantConfigService, MerchantOverrides};
pub use messages::MessageCatalog;
pub use stores::StoreService;

/// Error from a collaborator call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The collaborator could not be reached.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// The collaborator was reached but failed.
    #[error("collaborator error: {0}")]
    Backend(String),
}

/// The full set of collaborators the pipeline depends on.
///
/// Cheaply cloneable; every field is an `Arc` trait object so alternative
/// backends (and test doubles) can be swapped in per instance.
#[derive(Clone)]
pub struct Services {
    pub stores: Arc<dyn StoreService>,
    pub customers: Arc<dyn CustomerService>,
    pub content: Arc<dyn ContentService>,
    pub catalog: Arc<dyn CatalogService>,
    pub merchant_config: Arc<dyn MerchantConfigService>,
    pub geo: Arc<dyn GeoIpService>,
    pub messages: Arc<dyn MessageCatalog>,
}
