//! Geo-IP resolution contract.

use std::net::IpAddr;

use async_trait::async_trait;

use quayside_core::CountryCode;

use super::ServiceError;

/// A geo-located address, as much of it as the resolver knows.
#[derive(Debug, Clone)]
pub struct GeoAddress {
    pub country: CountryCode,
    pub city: Option<String>,
    pub zone: Option<String>,
}

/// Resolves a client IP address to a coarse geographic address.
///
/// Unlike the other collaborators this one is expected to fail routinely
/// (private addresses, unreachable resolver); callers fall back to the
/// store's configured address.
#[async_trait]
pub trait GeoIpService: Send + Sync {
    async fn locate(&self, ip: IpAddr) -> Result<GeoAddress, ServiceError>;
}
