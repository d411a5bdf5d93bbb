//! Language and locale resolution.
//!
//! The language is recomputed every request: an explicit `lang` parameter
//! wins (and becomes the session's sticky choice), then the session, then
//! the store default. The locale pairs the language with the store country.

use tower_sessions::Session;

use quayside_core::{CountryCode, LanguageCode, Locale};

use crate::models::{Store, session::keys};

use super::{session_get, session_insert};

/// Request parameter naming the language to switch to.
pub const LANGUAGE_PARAM: &str = "lang";

/// Resolve the request language.
pub async fn resolve_language(
    session: &Session,
    requested: Option<&str>,
    store: Option<&Store>,
) -> LanguageCode {
    if let Some(raw) = requested {
        match LanguageCode::parse(raw) {
            Ok(language) => {
                session_insert(session, keys::LANGUAGE, &language).await;
                return language;
            }
            Err(err) => {
                tracing::warn!(raw, error = %err, "ignoring invalid language parameter");
            }
        }
    }

    if let Some(language) = session_get::<LanguageCode>(session, keys::LANGUAGE).await {
        return language;
    }

    store.map_or_else(LanguageCode::default, |s| s.default_language.clone())
}

/// Derive the system locale from the resolved language and store.
#[must_use]
pub fn derive_locale(language: &LanguageCode, store: Option<&Store>) -> Locale {
    store.map_or_else(
        || Locale::new(language.clone(), CountryCode::default()),
        |s| s.locale_for(language),
    )
}
