//! Per-store configuration contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::Store;

use super::ServiceError;

/// The class of a configuration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    /// General storefront settings.
    General,
    /// Social network handles and integrations.
    Social,
}

/// One key/value configuration entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

/// Structured per-store configuration, flattened into the published
/// configuration map alongside the plain entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MerchantOverrides {
    pub display_search_box: bool,
    pub display_contact_us: bool,
    pub display_shipping: bool,
    pub display_customer_section: bool,
    pub allow_purchase_items: bool,
}

impl MerchantOverrides {
    /// Flatten into string key/value pairs.
    ///
    /// Goes through `serde_json` so field names stay in lockstep with the
    /// struct; string values are inserted verbatim, everything else uses its
    /// JSON rendering.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(self) else {
            return Vec::new();
        };
        fields
            .into_iter()
            .map(|(key, value)| {
                let rendered = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, rendered)
            })
            .collect()
    }
}

/// Reads per-store configuration.
#[async_trait]
pub trait MerchantConfigService: Send + Sync {
    /// All entries of one kind for a store.
    async fn list_by_kind(
        &self,
        kind: ConfigKind,
        store: &Store,
    ) -> Result<Vec<ConfigEntry>, ServiceError>;

    /// The structured overrides object, when one is configured.
    async fn merchant_overrides(
        &self,
        store: &Store,
    ) -> Result<Option<MerchantOverrides>, ServiceError>;
}
