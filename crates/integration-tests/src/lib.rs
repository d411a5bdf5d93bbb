//! Integration tests for Quayside.
//!
//! Drives the full storefront router (routes plus the whole middleware
//! stack) in-process with `tower::ServiceExt::oneshot`, propagating the
//! session cookie between requests so session-affine behavior (store
//! affinity, guest reuse, breadcrumb rebuild) is exercised end to end.
//!
//! # Test Categories
//!
//! - `pipeline` - Context assembly end-to-end scenarios
//! - `caching` - Cache-aside properties across requests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use tower::ServiceExt;

use quayside_core::{CategoryId, LanguageCode, ProductId};
use quayside_storefront::config::StorefrontConfig;
use quayside_storefront::models::{CategoryNode, CategorySummary, ProductSummary, Store};
use quayside_storefront::services::{CatalogService, ServiceError, Services};
use quayside_storefront::state::AppState;

/// In-process client for the full storefront stack, carrying the session
/// cookie across requests like a browser would.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Client over the given collaborator set and a development config.
    #[must_use]
    pub fn new(services: Services) -> Self {
        let state = AppState::new(StorefrontConfig::for_development(), services);
        Self {
            app: quayside_storefront::app(state),
            cookie: None,
        }
    }

    /// Issue a GET request, updating the stored session cookie.
    ///
    /// # Panics
    ///
    /// Panics when the request cannot be built or the service errors;
    /// both indicate a broken test setup.
    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        let request = builder.body(Body::empty()).expect("request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("infallible service");

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE)
            && let Ok(raw) = set_cookie.to_str()
            && let Some(pair) = raw.split(';').next()
        {
            self.cookie = Some(pair.to_owned());
        }

        response
    }

    /// Drop the stored session cookie, simulating a brand-new visitor.
    pub fn forget_session(&mut self) {
        self.cookie = None;
    }

    /// Issue a GET request and parse the JSON body.
    ///
    /// # Panics
    ///
    /// Panics on a non-success status or an unparsable body.
    pub async fn get_json(&mut self, uri: &str) -> serde_json::Value {
        let response = self.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }
}

/// Catalog wrapper counting hierarchy loads, for cache-aside assertions.
pub struct CountingCatalog {
    inner: Arc<dyn CatalogService>,
    hierarchy_loads: Arc<AtomicUsize>,
}

impl CountingCatalog {
    /// Wrap a catalog, returning the wrapper and its load counter.
    #[must_use]
    pub fn wrap(inner: Arc<dyn CatalogService>) -> (Arc<Self>, Arc<AtomicUsize>) {
        let counter = Arc::new(AtomicUsize::new(0));
        let wrapper = Arc::new(Self {
            inner,
            hierarchy_loads: Arc::clone(&counter),
        });
        (wrapper, counter)
    }
}

#[async_trait]
impl CatalogService for CountingCatalog {
    async fn category_hierarchy(
        &self,
        store: &Store,
        language: &LanguageCode,
        max_depth: u32,
        page_size: usize,
    ) -> Result<Vec<CategoryNode>, ServiceError> {
        self.hierarchy_loads.fetch_add(1, Ordering::SeqCst);
        self.inner
            .category_hierarchy(store, language, max_depth, page_size)
            .await
    }

    async fn product_for_language(
        &self,
        id: ProductId,
        language: &LanguageCode,
    ) -> Result<Option<ProductSummary>, ServiceError> {
        self.inner.product_for_language(id, language).await
    }

    async fn category_for_language(
        &self,
        id: CategoryId,
        language: &LanguageCode,
    ) -> Result<Option<CategorySummary>, ServiceError> {
        self.inner.category_for_language(id, language).await
    }
}
