//! Cache-aside properties across full requests.
//!
//! The unit tests beside `context::content` cover the pattern in isolation;
//! these verify it through the whole stack, with real sessions in between.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use quayside_core::{CountryCode, LanguageCode, StoreId};
use quayside_integration_tests::{CountingCatalog, TestClient};
use quayside_storefront::models::Store;
use quayside_storefront::services::memory::{InMemoryStores, demo_services};

fn default_store(caching_enabled: bool) -> Store {
    Store {
        id: StoreId::new(1),
        code: "DEFAULT".to_owned(),
        name: "Quayside".to_owned(),
        default_language: LanguageCode::default(),
        template: None,
        country: CountryCode::default(),
        zone: None,
        state_province: None,
        caching_enabled,
    }
}

#[tokio::test]
async fn test_categories_load_once_with_caching_enabled() {
    let mut services = demo_services();
    let (catalog, loads) = CountingCatalog::wrap(Arc::clone(&services.catalog));
    services.catalog = catalog;
    let mut client = TestClient::new(services);

    let first = client.get_json("/shop").await;
    let second = client.get_json("/shop").await;

    assert_eq!(first["categories"], second["categories"]);
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_caching_disabled_store_loads_every_request() {
    let mut services = demo_services();
    services.stores = Arc::new(InMemoryStores::new([default_store(false)]));
    let (catalog, loads) = CountingCatalog::wrap(Arc::clone(&services.catalog));
    services.catalog = catalog;
    let mut client = TestClient::new(services);

    let first = client.get_json("/shop").await;
    let second = client.get_json("/shop").await;

    // Both requests publish the same tree, but neither came from the cache
    assert_eq!(first["categories"], second["categories"]);
    assert_eq!(loads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cache_entries_are_scoped_per_language() {
    let mut services = demo_services();
    let (catalog, loads) = CountingCatalog::wrap(Arc::clone(&services.catalog));
    services.catalog = catalog;
    let mut client = TestClient::new(services);

    client.get_json("/shop?lang=en").await;
    client.get_json("/shop?lang=fr").await;
    // Back to English: served from the cache populated by the first request
    client.get_json("/shop?lang=en").await;

    assert_eq!(loads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_fresh_sessions_share_the_cache() {
    let mut services = demo_services();
    let (catalog, loads) = CountingCatalog::wrap(Arc::clone(&services.catalog));
    services.catalog = catalog;

    // Two clients over the same app would need a shared router; simulate
    // separate sessions by dropping the cookie between requests instead.
    let mut client = TestClient::new(services);
    client.get_json("/shop").await;
    client.forget_session();
    client.get_json("/shop").await;

    assert_eq!(loads.load(Ordering::SeqCst), 1);
}
