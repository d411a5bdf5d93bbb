//! Visitor identity: authenticated customers and anonymous guests.

use serde::{Deserialize, Serialize};

use quayside_core::{CountryCode, CustomerId, StoreId};

use super::store::Store;

/// An authenticated customer, as stored in the session.
///
/// The owning store is recorded so a cross-store session can be detected
/// and evicted when the resolved store changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Stable customer ID.
    pub id: CustomerId,
    /// The store this customer account belongs to.
    pub store_id: StoreId,
    /// Login handle, matched against the authenticated principal name.
    pub handle: String,
    /// Display name for rendering.
    pub display_name: String,
    /// Whether this record represents an anonymous account.
    pub anonymous: bool,
}

/// An anonymous visitor profile.
///
/// Fabricated once per session with a best-effort billing address and reused
/// verbatim on subsequent requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    /// Best-effort billing address for pricing/shipping estimation.
    pub billing: Address,
}

/// A minimal address, enough for pricing and shipping estimation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub country: CountryCode,
    pub city: Option<String>,
    pub zone: Option<String>,
    pub state_province: Option<String>,
}

impl Address {
    /// The deterministic fallback address: the store's configured country
    /// plus its zone, or its state/province when no zone applies.
    #[must_use]
    pub fn from_store_defaults(store: &Store) -> Self {
        let (zone, state_province) = if store.zone.is_some() {
            (store.zone.clone(), None)
        } else {
            (None, store.state_province.clone())
        };
        Self {
            country: store.country.clone(),
            city: None,
            zone,
            state_province,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quayside_core::{LanguageCode, StoreId};

    use super::*;

    fn store(zone: Option<&str>, state: Option<&str>) -> Store {
        Store {
            id: StoreId::new(1),
            code: "DEFAULT".to_owned(),
            name: "Default store".to_owned(),
            default_language: LanguageCode::default(),
            template: None,
            country: CountryCode::parse("CA").unwrap(),
            zone: zone.map(str::to_owned),
            state_province: state.map(str::to_owned),
            caching_enabled: true,
        }
    }

    #[test]
    fn test_fallback_address_prefers_zone() {
        let address = Address::from_store_defaults(&store(Some("QC"), Some("ignored")));
        assert_eq!(address.country.as_str(), "CA");
        assert_eq!(address.zone.as_deref(), Some("QC"));
        assert_eq!(address.state_province, None);
    }

    #[test]
    fn test_fallback_address_uses_state_without_zone() {
        let address = Address::from_store_defaults(&store(None, Some("Quebec")));
        assert_eq!(address.zone, None);
        assert_eq!(address.state_province.as_deref(), Some("Quebec"));
    }
}
