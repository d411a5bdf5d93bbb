//! Core types for Quayside.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod locale;

pub use id::*;
pub use locale::{CountryCode, Locale, LocaleError, LanguageCode};
