//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Request ID (add unique ID to each request)
//! 3. Session layer (tower-sessions with in-memory store)
//! 4. Context pipeline (`context::pipeline::context_middleware`)

pub mod client_ip;
pub mod request_id;
pub mod session;

pub use client_ip::client_ip;
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
