//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /        - Assembled context view (JSON)
//! GET  /shop    - Assembled context view (JSON)
//! GET  /health  - Liveness check
//! ```
//!
//! Rendering is out of scope for this service; the context view is the thin
//! consumer that downstream renderers replace.

pub mod shop;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::context_view))
        .route("/shop", get(shop::context_view))
        .route("/health", get(health))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check collaborators.
async fn health() -> &'static str {
    "ok"
}
