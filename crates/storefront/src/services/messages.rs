//! Localized UI message lookup contract.

use quayside_core::Locale;

/// Resolves message keys to localized strings.
///
/// Implementations fall back to echoing the key when no translation exists,
/// so lookup is infallible.
pub trait MessageCatalog: Send + Sync {
    fn message(&self, key: &str, locale: &Locale) -> String;
}
