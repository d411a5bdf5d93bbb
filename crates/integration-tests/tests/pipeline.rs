//! End-to-end context assembly scenarios.
//!
//! Each test drives the full router (middleware stack included) and
//! inspects the published context through the JSON context view.

use std::sync::Arc;

use axum::body::Body;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Router};
use tower::ServiceExt;

use quayside_core::{CountryCode, LanguageCode, StoreId};
use quayside_integration_tests::TestClient;
use quayside_storefront::config::StorefrontConfig;
use quayside_storefront::context::RequestContext;
use quayside_storefront::context::pipeline::context_middleware;
use quayside_storefront::middleware::create_session_layer;
use quayside_storefront::models::Store;
use quayside_storefront::services::memory::{InMemoryStores, demo_services};
use quayside_storefront::state::AppState;

fn store(id: i32, code: &str) -> Store {
    Store {
        id: StoreId::new(id),
        code: code.to_owned(),
        name: format!("{code} store"),
        default_language: LanguageCode::default(),
        template: None,
        country: CountryCode::default(),
        zone: None,
        state_province: None,
        caching_enabled: true,
    }
}

// =============================================================================
// Fresh-session end-to-end
// =============================================================================

#[tokio::test]
async fn test_fresh_session_assembles_full_context() {
    let mut client = TestClient::new(demo_services());
    let context = client.get_json("/shop?store=DEFAULT&lang=en").await;

    // Store resolved from the request parameter, template filled in
    assert_eq!(context["store"]["code"], "DEFAULT");
    assert_eq!(context["store"]["template"], "default");

    // Locale derived from language and store country
    assert_eq!(context["language"], "en");
    assert_eq!(context["locale"], "en_US");

    // First visit: single-step Home trail
    let breadcrumb = context["breadcrumb"].as_array().expect("breadcrumb");
    assert_eq!(breadcrumb.len(), 1);
    assert_eq!(breadcrumb[0]["label"], "Home");
    assert_eq!(breadcrumb[0]["url"], "/");

    // Guest fabricated with the store-country fallback (geo is offline)
    assert_eq!(context["guest_country"], "US");

    // Landing-page content overrides the page metadata
    assert_eq!(context["page"]["title"], "Welcome to Quayside");

    // Merged configs carry entries plus the injected scheme
    assert_eq!(context["configs"]["shop_scheme"], "https");
    assert_eq!(context["configs"]["currency"], "USD");
    assert_eq!(context["configs"]["display_search_box"], "true");

    // Visible boxes/sections only
    let codes = context["content_codes"].as_array().expect("codes");
    assert!(codes.iter().any(|c| c == "hero_banner"));
    assert!(codes.iter().any(|c| c == "LANDING_PAGE"));
    assert!(!codes.iter().any(|c| c == "retired_promo"));

    // Page index
    let pages = context["pages"].as_array().expect("pages");
    assert_eq!(pages.len(), 2);

    // Visible category tree, well under the node cap
    let categories = context["categories"].as_array().expect("categories");
    assert_eq!(categories.len(), 2);
    assert!(categories.len() <= 200);
    assert_eq!(categories[0]["label"], "Shoes");
    assert_eq!(categories[0]["children"][0]["label"], "Boots");
    assert!(!categories.iter().any(|c| c["label"] == "Archive"));

    // No cart has been started
    assert!(context["cart_code"].is_null());
    // No authenticated principal, no customer
    assert!(context["customer"].is_null());
}

// =============================================================================
// Session affinity
// =============================================================================

#[tokio::test]
async fn test_store_affinity_survives_requests_without_param() {
    let mut services = demo_services();
    services.stores = Arc::new(InMemoryStores::new([
        store(1, "DEFAULT"),
        store(9, "ALPHA"),
    ]));
    let mut client = TestClient::new(services);

    let first = client.get_json("/shop?store=ALPHA").await;
    assert_eq!(first["store"]["code"], "ALPHA");

    // No parameter: the session's store wins over the system default
    let second = client.get_json("/shop").await;
    assert_eq!(second["store"]["code"], "ALPHA");
}

#[tokio::test]
async fn test_store_param_switches_away_from_session_store() {
    let mut services = demo_services();
    services.stores = Arc::new(InMemoryStores::new([
        store(1, "DEFAULT"),
        store(9, "ALPHA"),
    ]));
    let mut client = TestClient::new(services);

    client.get_json("/shop?store=ALPHA").await;
    let switched = client.get_json("/shop?store=DEFAULT").await;
    assert_eq!(switched["store"]["code"], "DEFAULT");
}

#[tokio::test]
async fn test_unknown_store_param_falls_back_to_default() {
    let mut client = TestClient::new(demo_services());
    let context = client.get_json("/shop?store=NO_SUCH_STORE").await;
    assert_eq!(context["store"]["code"], "DEFAULT");
}

// =============================================================================
// Locale switch and breadcrumb rebuild
// =============================================================================

#[tokio::test]
async fn test_language_switch_rebuilds_breadcrumb_and_navigation() {
    let mut client = TestClient::new(demo_services());

    let english = client.get_json("/shop?lang=en").await;
    assert_eq!(english["breadcrumb"][0]["label"], "Home");
    assert_eq!(english["categories"][0]["label"], "Shoes");

    let french = client.get_json("/shop?lang=fr").await;
    assert_eq!(french["language"], "fr");
    assert_eq!(french["breadcrumb"][0]["label"], "Accueil");
    assert_eq!(french["categories"][0]["label"], "Chaussures");
}

#[tokio::test]
async fn test_language_choice_sticks_in_session() {
    let mut client = TestClient::new(demo_services());

    client.get_json("/shop?lang=fr").await;
    let followup = client.get_json("/shop").await;
    assert_eq!(followup["language"], "fr");
}

// =============================================================================
// Guest reuse
// =============================================================================

#[tokio::test]
async fn test_guest_profile_is_reused_across_requests() {
    let mut client = TestClient::new(demo_services());

    let first = client.get_json("/shop").await;
    let second = client.get_json("/shop").await;
    assert_eq!(first["guest_country"], second["guest_country"]);
}

// =============================================================================
// Pipeline bypass
// =============================================================================

async fn probe(context: Option<Extension<Arc<RequestContext>>>) -> &'static str {
    if context.is_some() {
        "with-context"
    } else {
        "no-context"
    }
}

async fn probe_body(app: Router, uri: &str) -> String {
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("infallible service");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[tokio::test]
async fn test_service_and_reference_paths_bypass_pipeline() {
    let state = AppState::new(StorefrontConfig::for_development(), demo_services());
    let app = Router::new()
        .route("/probe", get(probe))
        .route("/services/probe", get(probe))
        .route("/reference/probe", get(probe))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            context_middleware,
        ))
        .layer(create_session_layer())
        .with_state(state);

    assert_eq!(probe_body(app.clone(), "/probe").await, "with-context");
    assert_eq!(probe_body(app.clone(), "/services/probe").await, "no-context");
    assert_eq!(probe_body(app, "/reference/probe").await, "no-context");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let mut client = TestClient::new(demo_services());
    let response = client.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}
