//! The store (tenant) model.

use serde::{Deserialize, Serialize};

use quayside_core::{CountryCode, LanguageCode, Locale, StoreId};

/// One storefront tenant.
///
/// Resolved once per request and attached to both the session and the
/// request-scoped context; immutable for the duration of a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// Stable numeric ID, used in cache keys.
    pub id: StoreId,
    /// Stable store code, used for lookup and session affinity.
    pub code: String,
    /// Display name; also the default page title/description/keywords.
    pub name: String,
    /// Language used when the request carries no language signal.
    pub default_language: LanguageCode,
    /// Navigation template; filled with the system default when unset.
    pub template: Option<String>,
    /// The store's home country.
    pub country: CountryCode,
    /// Geographic zone code, when the country is zone-subdivided.
    pub zone: Option<String>,
    /// Free-form state/province, used when no zone applies.
    pub state_province: Option<String>,
    /// Per-tenant toggle for the content caches.
    pub caching_enabled: bool,
}

impl Store {
    /// Derive the request locale for a resolved language.
    #[must_use]
    pub fn locale_for(&self, language: &LanguageCode) -> Locale {
        Locale::new(language.clone(), self.country.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store {
            id: StoreId::new(1),
            code: "DEFAULT".to_owned(),
            name: "Default store".to_owned(),
            default_language: LanguageCode::default(),
            template: None,
            country: CountryCode::parse("CA").unwrap(),
            zone: Some("QC".to_owned()),
            state_province: None,
            caching_enabled: true,
        }
    }

    #[test]
    fn test_locale_for_uses_store_country() {
        let locale = store().locale_for(&LanguageCode::parse("fr").unwrap());
        assert_eq!(locale.to_string(), "fr_CA");
    }
}
