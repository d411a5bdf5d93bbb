//! Proxy-aware client IP extraction.
//!
//! The pipeline only needs the client address for geo-IP; it is opaque
//! beyond that. Proxies and load balancers put the original address in
//! `x-forwarded-for` (first hop) or `x-real-ip`; the socket peer address is
//! the last resort.

use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, Request};

/// Header set by proxies with the forwarding chain.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Header set by some reverse proxies with the original client address.
pub const REAL_IP_HEADER: &str = "x-real-ip";

/// Best-effort client IP for a request.
#[must_use]
pub fn client_ip(request: &Request) -> Option<IpAddr> {
    let headers = request.headers();

    if let Some(ip) = headers
        .get(FORWARDED_FOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(first_hop)
    {
        return Some(ip);
    }

    if let Some(ip) = headers
        .get(REAL_IP_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.trim().parse().ok())
    {
        return Some(ip);
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

/// The first (client-most) address of a forwarding chain.
fn first_hop(raw: &str) -> Option<IpAddr> {
    raw.split(',').next()?.trim().parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request(headers: &[(&str, &str)]) -> Request {
        let mut builder = axum::http::Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_forwarded_for_first_hop_wins() {
        let request = request(&[
            (FORWARDED_FOR_HEADER, "203.0.113.7, 10.0.0.1"),
            (REAL_IP_HEADER, "198.51.100.1"),
        ]);
        assert_eq!(client_ip(&request), Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn test_real_ip_fallback() {
        let request = request(&[(REAL_IP_HEADER, "198.51.100.1")]);
        assert_eq!(client_ip(&request), Some("198.51.100.1".parse().unwrap()));
    }

    #[test]
    fn test_connect_info_fallback() {
        let mut request = request(&[]);
        let addr: SocketAddr = "192.0.2.9:443".parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        assert_eq!(client_ip(&request), Some("192.0.2.9".parse().unwrap()));
    }

    #[test]
    fn test_no_signal_is_none() {
        assert_eq!(client_ip(&request(&[])), None);
    }

    #[test]
    fn test_garbage_header_is_skipped() {
        let request = request(&[(FORWARDED_FOR_HEADER, "not-an-ip")]);
        assert_eq!(client_ip(&request), None);
    }
}
