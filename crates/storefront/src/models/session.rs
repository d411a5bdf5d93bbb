//! Session keys for context state.
//!
//! Everything the pipeline persists between requests lives under these keys
//! in the tower-sessions session.

/// Session keys for context-assembly state.
pub mod keys {
    /// Key for the resolved store (tenant affinity).
    pub const STORE: &str = "store";

    /// Key for the authenticated customer.
    pub const CUSTOMER: &str = "customer";

    /// Key for the anonymous guest profile.
    pub const GUEST: &str = "guest";

    /// Key for the breadcrumb trail.
    pub const BREADCRUMB: &str = "breadcrumb";

    /// Key for the sticky language choice.
    pub const LANGUAGE: &str = "language";

    /// Key for the shopping-cart code, written by the cart pipeline.
    pub const CART_CODE: &str = "cart_code";
}
