//! The orchestrating middleware.
//!
//! Runs the stages in a fixed order once per request: store → identity →
//! language/locale → breadcrumb → the four content loads → page metadata →
//! cart-code passthrough, then publishes the assembled [`RequestContext`]
//! into request extensions. Every stage is individually contained, so the
//! request always proceeds with whatever partial context was assembled
//! (fail-open). Service and reference endpoints bypass the pipeline
//! entirely.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use axum::extract::{Query, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tower_sessions::Session;

use crate::middleware::client_ip::client_ip;
use crate::models::session::keys;
use crate::state::AppState;

use super::breadcrumb::assemble_breadcrumb;
use super::content::{
    cms_content, cms_pages, derive_page_meta, merchant_configs, navigation_categories,
};
use super::language::{LANGUAGE_PARAM, derive_locale, resolve_language};
use super::store_resolver::{STORE_PARAM, resolve_store};
use super::visitor::{AuthPrincipal, ensure_guest, reconcile_customer};
use super::{RequestContext, session_get};

/// Paths containing this substring need no store/locale context.
pub const SERVICES_URL_PATTERN: &str = "/services";

/// Paths containing this substring need no store/locale context.
pub const REFERENCE_URL_PATTERN: &str = "/reference";

/// Whether a request path skips context assembly entirely.
#[must_use]
pub fn bypasses_pipeline(path: &str) -> bool {
    let path = path.to_ascii_lowercase();
    path.contains(SERVICES_URL_PATTERN) || path.contains(REFERENCE_URL_PATTERN)
}

/// Axum middleware assembling the request context.
pub async fn context_middleware(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    if bypasses_pipeline(request.uri().path()) {
        return next.run(request).await;
    }

    // Read everything needed from the request up front: the request itself is
    // not `Send` (its body is not `Sync`), so it must not be held across the
    // assembly awaits.
    let params = query_params(&request);
    let principal = request.extensions().get::<AuthPrincipal>().cloned();
    let client_ip = client_ip(&request);

    let context = assemble(&state, &session, params, principal, client_ip).await;
    request.extensions_mut().insert(Arc::new(context));
    next.run(request).await
}

/// Run every stage and collect the context. Infallible: each stage degrades
/// to its empty default on failure.
async fn assemble(
    state: &AppState,
    session: &Session,
    params: HashMap<String, String>,
    principal: Option<AuthPrincipal>,
    client_ip: Option<IpAddr>,
) -> RequestContext {
    let services = state.services();
    let config = state.config();
    let caches = state.caches();

    let store = resolve_store(
        services,
        config,
        session,
        params.get(STORE_PARAM).map(String::as_str),
    )
    .await;
    let language = resolve_language(
        session,
        params.get(LANGUAGE_PARAM).map(String::as_str),
        store.as_ref(),
    )
    .await;
    let locale = derive_locale(&language, store.as_ref());

    let mut customer = None;
    let mut guest = None;
    if let Some(store) = &store {
        customer = reconcile_customer(services, session, store, principal.as_ref()).await;
        guest = Some(ensure_guest(services, session, store, client_ip).await);
    }

    let breadcrumb = assemble_breadcrumb(services, session, &language, &locale).await;

    let mut configs = HashMap::new();
    let mut content = HashMap::new();
    let mut pages = Vec::new();
    let mut categories = Vec::new();
    let mut page = None;
    if let Some(store) = &store {
        configs = merchant_configs(config, services, caches, store).await;
        content = cms_content(services, caches, store, &language).await;
        pages = cms_pages(services, caches, store, &language).await;
        categories = navigation_categories(services, caches, store, &language).await;
        page = Some(derive_page_meta(store, &content));
    }

    let cart_code = session_get::<String>(session, keys::CART_CODE).await;

    RequestContext {
        store,
        language,
        locale,
        customer,
        guest,
        breadcrumb,
        page,
        configs,
        content,
        pages,
        categories,
        cart_code,
    }
}

/// Query parameters as a plain map; an unparsable query string is treated
/// as absent parameters.
fn query_params(request: &Request) -> HashMap<String, String> {
    Query::<HashMap<String, String>>::try_from_uri(request.uri())
        .map(|Query(params)| params)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bypass_patterns() {
        assert!(bypasses_pipeline("/services/catalog"));
        assert!(bypasses_pipeline("/api/reference/countries"));
        assert!(bypasses_pipeline("/SERVICES/ping"));
        assert!(!bypasses_pipeline("/shop"));
        assert!(!bypasses_pipeline("/"));
    }

    #[test]
    fn test_query_params_parse() {
        let request = axum::http::Request::builder()
            .uri("/shop?store=DEFAULT&lang=fr")
            .body(axum::body::Body::empty())
            .expect("request");
        let params = query_params(&request);
        assert_eq!(params.get("store").map(String::as_str), Some("DEFAULT"));
        assert_eq!(params.get("lang").map(String::as_str), Some("fr"));
    }
}
