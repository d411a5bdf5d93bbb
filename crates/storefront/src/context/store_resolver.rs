//! Tenant resolution with session affinity.
//!
//! Resolution order: an explicit `store` request parameter that differs from
//! the session's store (or arrives with no session store) wins and replaces
//! the session store; otherwise the session store is kept; otherwise the
//! configured default code is looked up. A store resolved by lookup is
//! persisted back into the session.

use tower_sessions::Session;

use crate::config::StorefrontConfig;
use crate::models::{Store, session::keys};
use crate::services::Services;

use super::{session_get, session_insert};

/// Request parameter naming the store to switch to.
pub const STORE_PARAM: &str = "store";

/// Resolve the active store for this request.
///
/// Returns `None` only when every lookup, including the default code,
/// failed; callers treat that as a skeletal context, not an error.
pub async fn resolve_store(
    services: &Services,
    config: &StorefrontConfig,
    session: &Session,
    requested: Option<&str>,
) -> Option<Store> {
    let mut store: Option<Store> = session_get(session, keys::STORE).await;

    if let Some(code) = requested.map(str::trim).filter(|code| !code.is_empty())
        && store.as_ref().is_none_or(|s| s.code != code)
    {
        store = lookup_into_session(services, session, code).await;
    }

    if store.is_none() {
        store = lookup_into_session(services, session, &config.default_store_code).await;
    }

    match store {
        Some(mut store) => {
            if store
                .template
                .as_deref()
                .is_none_or(|template| template.trim().is_empty())
            {
                store.template = Some(config.default_template.clone());
            }
            Some(store)
        }
        None => {
            tracing::error!(
                default_code = %config.default_store_code,
                "no resolvable store, continuing with empty store context"
            );
            None
        }
    }
}

/// Look up a store code and, on success, make it the session's store.
async fn lookup_into_session(
    services: &Services,
    session: &Session,
    code: &str,
) -> Option<Store> {
    match services.stores.store_by_code(code).await {
        Ok(Some(store)) => {
            session_insert(session, keys::STORE, &store).await;
            Some(store)
        }
        Ok(None) => {
            tracing::warn!(code, "unknown store code");
            None
        }
        Err(err) => {
            tracing::error!(code, error = %err, "store lookup failed");
            None
        }
    }
}
