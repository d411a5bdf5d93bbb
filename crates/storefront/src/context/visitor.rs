//! Visitor identity reconciliation.
//!
//! Two independent concerns per request: reconciling the authenticated
//! customer against the resolved store and the security context, and
//! guaranteeing exactly one anonymous guest profile per session.

use std::net::IpAddr;

use tower_sessions::Session;

use crate::models::{Address, Customer, Guest, Store, session::keys};
use crate::services::Services;

use super::{session_get, session_insert};

/// The authenticated principal, installed into request extensions by the
/// authentication middleware upstream of this pipeline.
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    /// Principal name; matched against the customer handle.
    pub name: String,
    pub roles: Vec<Role>,
}

/// Granted roles this pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Admin,
}

impl AuthPrincipal {
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Reconcile the session customer with the resolved store and principal.
///
/// A session customer owned by another store is evicted from the session.
/// A non-anonymous customer whose principal no longer carries the customer
/// role is suppressed for this request but left in the session. When neither
/// survives, an authenticated principal with the customer role is looked up
/// by name and adopted.
pub async fn reconcile_customer(
    services: &Services,
    session: &Session,
    store: &Store,
    principal: Option<&AuthPrincipal>,
) -> Option<Customer> {
    let mut customer: Option<Customer> = session_get(session, keys::CUSTOMER).await;

    if let Some(existing) = &customer
        && existing.store_id != store.id
    {
        tracing::debug!(
            customer_store = %existing.store_id,
            resolved_store = %store.id,
            "evicting cross-store session customer"
        );
        if let Err(err) = session.remove::<Customer>(keys::CUSTOMER).await {
            tracing::warn!(error = %err, "session customer eviction failed");
        }
        customer = None;
    }

    if let Some(existing) = &customer
        && !existing.anonymous
        && !principal.is_some_and(|p| p.has_role(Role::Customer))
    {
        // Role no longer granted: drop from the published identity only.
        customer = None;
    }

    if customer.is_none()
        && let Some(principal) = principal.filter(|p| p.has_role(Role::Customer))
    {
        match services
            .customers
            .customer_by_handle(store, &principal.name)
            .await
        {
            Ok(found) => customer = found,
            Err(err) => {
                tracing::error!(handle = %principal.name, error = %err, "customer lookup failed");
            }
        }
    }

    customer
}

/// Return the session's guest profile, fabricating it on first visit.
///
/// The billing address comes from geo-IP when the client address resolves,
/// otherwise from the store's configured defaults. Once fabricated the
/// profile is reused verbatim for the rest of the session.
pub async fn ensure_guest(
    services: &Services,
    session: &Session,
    store: &Store,
    client_ip: Option<IpAddr>,
) -> Guest {
    if let Some(guest) = session_get::<Guest>(session, keys::GUEST).await {
        return guest;
    }

    let billing = geo_billing_address(services, client_ip)
        .await
        .unwrap_or_else(|| Address::from_store_defaults(store));

    let guest = Guest { billing };
    session_insert(session, keys::GUEST, &guest).await;
    guest
}

/// Best-effort geo-IP address; any failure is logged and yields `None`.
async fn geo_billing_address(services: &Services, client_ip: Option<IpAddr>) -> Option<Address> {
    let ip = client_ip?;
    match services.geo.locate(ip).await {
        Ok(geo) => Some(Address {
            country: geo.country,
            city: geo.city,
            zone: geo.zone,
            state_province: None,
        }),
        Err(err) => {
            tracing::error!(%ip, error = %err, "cannot resolve geo-ip address");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use quayside_core::{CountryCode, CustomerId, LanguageCode, StoreId};

    use crate::services::memory::{FixedGeo, demo_services};
    use crate::services::{GeoAddress, Services};

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn store(id: i32) -> Store {
        Store {
            id: StoreId::new(id),
            code: "DEFAULT".to_owned(),
            name: "Quayside".to_owned(),
            default_language: LanguageCode::default(),
            template: None,
            country: CountryCode::parse("CA").unwrap(),
            zone: Some("QC".to_owned()),
            state_province: None,
            caching_enabled: true,
        }
    }

    fn customer(store_id: i32) -> Customer {
        Customer {
            id: CustomerId::new(500),
            store_id: StoreId::new(store_id),
            handle: "alex@example.com".to_owned(),
            display_name: "Alex".to_owned(),
            anonymous: false,
        }
    }

    fn customer_principal(name: &str) -> AuthPrincipal {
        AuthPrincipal {
            name: name.to_owned(),
            roles: vec![Role::Customer],
        }
    }

    fn geo_services(country: &str) -> Services {
        let mut services = demo_services();
        services.geo = Arc::new(FixedGeo(GeoAddress {
            country: CountryCode::parse(country).unwrap(),
            city: Some("Berlin".to_owned()),
            zone: None,
        }));
        services
    }

    #[tokio::test]
    async fn test_cross_store_customer_is_evicted_from_session() {
        let services = demo_services();
        let session = session();
        session.insert(keys::CUSTOMER, &customer(2)).await.unwrap();

        let principal = customer_principal("nobody@example.com");
        let resolved =
            reconcile_customer(&services, &session, &store(1), Some(&principal)).await;

        assert!(resolved.is_none());
        let in_session: Option<Customer> = session.get(keys::CUSTOMER).await.unwrap();
        assert!(in_session.is_none());
    }

    #[tokio::test]
    async fn test_role_mismatch_suppresses_but_keeps_session() {
        let services = demo_services();
        let session = session();
        session.insert(keys::CUSTOMER, &customer(1)).await.unwrap();

        let resolved = reconcile_customer(&services, &session, &store(1), None).await;

        assert!(resolved.is_none());
        let in_session: Option<Customer> = session.get(keys::CUSTOMER).await.unwrap();
        assert!(in_session.is_some());
    }

    #[tokio::test]
    async fn test_matching_session_customer_is_published() {
        let services = demo_services();
        let session = session();
        session.insert(keys::CUSTOMER, &customer(1)).await.unwrap();

        let principal = customer_principal("alex@example.com");
        let resolved =
            reconcile_customer(&services, &session, &store(1), Some(&principal)).await;

        assert_eq!(resolved.unwrap().display_name, "Alex");
    }

    #[tokio::test]
    async fn test_principal_lookup_adopts_customer() {
        let services = demo_services();
        let session = session();

        let principal = customer_principal("alex@example.com");
        let resolved =
            reconcile_customer(&services, &session, &store(1), Some(&principal)).await;

        assert_eq!(resolved.unwrap().id, CustomerId::new(500));
    }

    #[tokio::test]
    async fn test_principal_without_role_is_ignored() {
        let services = demo_services();
        let session = session();

        let principal = AuthPrincipal {
            name: "alex@example.com".to_owned(),
            roles: vec![Role::Admin],
        };
        let resolved =
            reconcile_customer(&services, &session, &store(1), Some(&principal)).await;

        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_guest_geo_failure_falls_back_to_store_address() {
        // demo_services carries the offline geo resolver
        let services = demo_services();
        let session = session();

        let guest = ensure_guest(
            &services,
            &session,
            &store(1),
            Some("203.0.113.7".parse().unwrap()),
        )
        .await;

        assert_eq!(guest.billing.country.as_str(), "CA");
        assert_eq!(guest.billing.zone.as_deref(), Some("QC"));
    }

    #[tokio::test]
    async fn test_guest_uses_geo_address_when_available() {
        let services = geo_services("DE");
        let session = session();

        let guest = ensure_guest(
            &services,
            &session,
            &store(1),
            Some("203.0.113.7".parse().unwrap()),
        )
        .await;

        assert_eq!(guest.billing.country.as_str(), "DE");
        assert_eq!(guest.billing.city.as_deref(), Some("Berlin"));
    }

    #[tokio::test]
    async fn test_guest_is_fabricated_once_per_session() {
        let services = geo_services("DE");
        let session = session();

        let first = ensure_guest(&services, &session, &store(1), None).await;
        // Different geo answer on the second request must not matter
        let services = geo_services("FR");
        let second = ensure_guest(&services, &session, &store(1), None).await;

        assert_eq!(first.billing.country, second.billing.country);
    }

    #[tokio::test]
    async fn test_guest_without_ip_uses_store_address() {
        let services = geo_services("DE");
        let session = session();

        let guest = ensure_guest(&services, &session, &store(1), None).await;
        assert_eq!(guest.billing.country.as_str(), "CA");
    }
}
