//! Quayside Storefront library.
//!
//! The request-time context-assembly layer of a multi-tenant storefront:
//! per request the pipeline resolves the active store, binds a visitor
//! identity, localizes the response, and populates the semi-static content
//! bundle through store-scoped caches. See [`context`] for the pipeline and
//! [`services`] for the collaborator contracts it depends on.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod context;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router: routes plus the middleware stack
/// (tracing, request ID, sessions, context pipeline).
///
/// Used by the binary and by the integration tests, so both exercise the
/// identical stack.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            context::pipeline::context_middleware,
        ))
        .layer(middleware::create_session_layer())
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
