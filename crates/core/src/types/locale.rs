//! Language, country, and locale codes.
//!
//! A [`LanguageCode`] is a lowercase ISO 639-1 code ("en", "fr"); a
//! [`CountryCode`] is an uppercase ISO 3166-1 alpha-2 code ("US", "CA").
//! A [`Locale`] pairs the two ("en_US") and is derived per request from the
//! resolved language and the active store's country.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a language or country code.
#[derive(thiserror::Error, Debug, Clone)]
pub enum LocaleError {
    /// The input string is empty.
    #[error("code cannot be empty")]
    Empty,
    /// The input is not exactly two characters.
    #[error("code must be exactly 2 letters, got {0:?}")]
    WrongLength(String),
    /// The input contains non-alphabetic characters.
    #[error("code must contain only ASCII letters, got {0:?}")]
    NotAlphabetic(String),
}

/// A lowercase ISO 639-1 language code.
///
/// ## Examples
///
/// ```
/// use quayside_core::LanguageCode;
///
/// assert!(LanguageCode::parse("en").is_ok());
/// assert!(LanguageCode::parse("FR").is_ok()); // normalized to "fr"
/// assert!(LanguageCode::parse("eng").is_err());
/// assert!(LanguageCode::parse("e1").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse a `LanguageCode` from a string, normalizing to lowercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly two ASCII letters.
    pub fn parse(s: &str) -> Result<Self, LocaleError> {
        let code = validate_alpha2(s)?;
        Ok(Self(code.to_ascii_lowercase()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    /// English, the system-wide language of last resort.
    fn default() -> Self {
        Self("en".to_owned())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = LocaleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

/// An uppercase ISO 3166-1 alpha-2 country code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Parse a `CountryCode` from a string, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly two ASCII letters.
    pub fn parse(s: &str) -> Result<Self, LocaleError> {
        let code = validate_alpha2(s)?;
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self("US".to_owned())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = LocaleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

/// A resolved locale: language plus country, rendered as `en_US`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Locale {
    /// The language component.
    pub language: LanguageCode,
    /// The country component.
    pub country: CountryCode,
}

impl Locale {
    /// Build a locale from its components.
    #[must_use]
    pub const fn new(language: LanguageCode, country: CountryCode) -> Self {
        Self { language, country }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.language, self.country)
    }
}

fn validate_alpha2(s: &str) -> Result<&str, LocaleError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(LocaleError::Empty);
    }
    if trimmed.len() != 2 {
        return Err(LocaleError::WrongLength(trimmed.to_owned()));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(LocaleError::NotAlphabetic(trimmed.to_owned()));
    }
    Ok(trimmed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_normalizes_case() {
        assert_eq!(LanguageCode::parse("EN").unwrap().as_str(), "en");
        assert_eq!(LanguageCode::parse(" fr ").unwrap().as_str(), "fr");
    }

    #[test]
    fn test_language_code_rejects_bad_input() {
        assert!(LanguageCode::parse("").is_err());
        assert!(LanguageCode::parse("eng").is_err());
        assert!(LanguageCode::parse("e1").is_err());
    }

    #[test]
    fn test_country_code_normalizes_case() {
        assert_eq!(CountryCode::parse("ca").unwrap().as_str(), "CA");
    }

    #[test]
    fn test_locale_display() {
        let locale = Locale::new(
            LanguageCode::parse("en").unwrap(),
            CountryCode::parse("us").unwrap(),
        );
        assert_eq!(locale.to_string(), "en_US");
    }

    #[test]
    fn test_language_code_serde_rejects_invalid() {
        let result: Result<LanguageCode, _> = serde_json::from_str("\"english\"");
        assert!(result.is_err());
        let ok: LanguageCode = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(ok.as_str(), "en");
    }
}
