//! Quayside Core - Shared types library.
//!
//! This crate provides common types used across all Quayside components:
//! - `storefront` - Multi-tenant storefront context-assembly service
//! - `integration-tests` - Cross-crate integration tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no caches, no HTTP. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and locale codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
