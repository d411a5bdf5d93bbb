//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::context::cache::ContextCaches;
use crate::services::Services;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the collaborator set, and the content caches.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    services: Services,
    caches: ContextCaches,
}

impl AppState {
    /// Create a new application state; the caches are built from the
    /// configured sizing profiles.
    #[must_use]
    pub fn new(config: StorefrontConfig, services: Services) -> Self {
        let caches = ContextCaches::new(&config.cache);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                services,
                caches,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the collaborator set.
    #[must_use]
    pub fn services(&self) -> &Services {
        &self.inner.services
    }

    /// Get a reference to the content caches.
    #[must_use]
    pub fn caches(&self) -> &ContextCaches {
        &self.inner.caches
    }
}
