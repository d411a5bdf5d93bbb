//! Request-time context assembly.
//!
//! Once per request the pipeline resolves the active store, binds a visitor
//! identity, localizes the response, and populates the semi-static content
//! bundle, publishing everything as one strongly-typed [`RequestContext`]
//! in the request extensions.
//!
//! # Modules
//!
//! - [`cache`] - Store-scoped typed caches (general + navigation instances)
//! - [`store_resolver`] - Tenant resolution with session affinity
//! - [`language`] - Language and locale resolution
//! - [`visitor`] - Customer reconciliation and guest fabrication
//! - [`content`] - Cache-aside assembly of the four content classes
//! - [`breadcrumb`] - Trail creation and locale rebuild
//! - [`pipeline`] - The orchestrating middleware

pub mod breadcrumb;
pub mod cache;
pub mod content;
pub mod language;
pub mod pipeline;
pub mod store_resolver;
pub mod visitor;

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower_sessions::Session;

use quayside_core::{LanguageCode, Locale};

use crate::error::AppError;
use crate::models::{
    Breadcrumb, CategoryNode, ContentDescription, Customer, Guest, PageMeta, Store,
};

/// Everything the pipeline assembled for one request.
///
/// Stages populate their slice and downstream rendering reads the whole; a
/// stage that failed leaves its slice at the empty default (fail-open).
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    /// The resolved store; `None` only when even the default store is
    /// unresolvable, in which case the rest of the context is skeletal.
    pub store: Option<Store>,
    pub language: LanguageCode,
    pub locale: Locale,
    /// The authenticated customer, when one survived reconciliation.
    pub customer: Option<Customer>,
    /// The session's anonymous visitor profile.
    pub guest: Option<Guest>,
    pub breadcrumb: Breadcrumb,
    pub page: Option<PageMeta>,
    /// Merged merchant configuration map.
    pub configs: HashMap<String, String>,
    /// CMS box/section descriptions by content code.
    pub content: HashMap<String, ContentDescription>,
    /// CMS page index.
    pub pages: Vec<ContentDescription>,
    /// Visible category navigation tree.
    pub categories: Vec<CategoryNode>,
    /// Shopping-cart code passed through from the session.
    pub cart_code: Option<String>,
}

/// Extractor for the assembled request context.
///
/// Rejects with [`AppError::MissingContext`] on routes the pipeline does not
/// cover (the bypass patterns in [`pipeline`]).
#[derive(Clone)]
pub struct ShopContext(pub Arc<RequestContext>);

impl<S> FromRequestParts<S> for ShopContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Arc<RequestContext>>()
            .cloned()
            .map(Self)
            .ok_or(AppError::MissingContext)
    }
}

/// Read a session value, logging and swallowing session-layer failures.
///
/// A broken session must degrade to "no value", not abort the pipeline.
pub(crate) async fn session_get<T: DeserializeOwned>(session: &Session, key: &str) -> Option<T> {
    match session.get::<T>(key).await {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "session read failed");
            None
        }
    }
}

/// Write a session value, logging and swallowing session-layer failures.
pub(crate) async fn session_insert<T: Serialize + Send + Sync>(
    session: &Session,
    key: &str,
    value: &T,
) {
    if let Err(err) = session.insert(key, value).await {
        tracing::warn!(key, error = %err, "session write failed");
    }
}
