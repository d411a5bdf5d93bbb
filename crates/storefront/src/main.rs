//! Quayside Storefront - multi-tenant context-assembly service.
//!
//! This binary serves the storefront context pipeline on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework with tower-sessions for session affinity
//! - A per-request context pipeline (store → identity → locale →
//!   breadcrumb → content) published to downstream handlers
//! - Two moka caches (general + navigation) shared across requests
//! - Collaborators behind trait objects; the seeded in-memory set backs
//!   local development

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quayside_storefront::config::StorefrontConfig;
use quayside_storefront::services::memory::demo_services;
use quayside_storefront::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quayside_storefront=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Collaborators: the seeded in-memory set until real backends are wired
    let services = demo_services();
    let state = AppState::new(config.clone(), services);

    let app = quayside_storefront::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // ConnectInfo feeds the peer-address fallback of client IP extraction
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
