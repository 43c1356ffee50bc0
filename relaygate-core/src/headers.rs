//! HTTP header constants for RelayGate.
//!
//! This module centralizes all HTTP header names used throughout the codebase,
//! avoiding magic strings and ensuring consistency.

/// Forwarded header (RFC 7239) - standardized forwarding metadata.
pub const FORWARDED: &str = "forwarded";

/// X-Forwarded-For header - de-facto chain of client/proxy addresses.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// X-Forwarded-Proto header - de-facto original request scheme.
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// X-Forwarded-Host header - de-facto original Host value.
pub const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// X-Forwarded-Port header - de-facto original request port.
pub const X_FORWARDED_PORT: &str = "x-forwarded-port";

/// X-Forwarded-Path header - de-facto original request path (non-standard
/// but commonly emitted by API gateways).
pub const X_FORWARDED_PATH: &str = "x-forwarded-path";

/// Host header.
pub const HOST: &str = "host";

/// Content-Length header.
pub const CONTENT_LENGTH: &str = "content-length";

/// Connection header (hop-by-hop).
pub const CONNECTION: &str = "connection";

/// Keep-Alive header (hop-by-hop).
pub const KEEP_ALIVE: &str = "keep-alive";

/// Proxy-Authenticate header (hop-by-hop).
pub const PROXY_AUTHENTICATE: &str = "proxy-authenticate";

/// Proxy-Authorization header (hop-by-hop).
pub const PROXY_AUTHORIZATION: &str = "proxy-authorization";

/// TE header (hop-by-hop).
pub const TE: &str = "te";

/// Trailers header (hop-by-hop).
pub const TRAILERS: &str = "trailers";

/// Transfer-Encoding header (hop-by-hop).
pub const TRANSFER_ENCODING: &str = "transfer-encoding";

/// Upgrade header (hop-by-hop).
pub const UPGRADE: &str = "upgrade";

/// The legacy forwarding header family superseded by RFC 7239.
///
/// These are consumed by the transition step and always removed before a
/// request is handed upstream.
pub const LEGACY_FORWARDED_HEADERS: &[&str] = &[
    X_FORWARDED_FOR,
    X_FORWARDED_PROTO,
    X_FORWARDED_HOST,
    X_FORWARDED_PORT,
    X_FORWARDED_PATH,
];

/// List of all hop-by-hop headers that should not be forwarded.
pub const HOP_BY_HOP_HEADERS: &[&str] = &[
    CONNECTION,
    KEEP_ALIVE,
    PROXY_AUTHENTICATE,
    PROXY_AUTHORIZATION,
    TE,
    TRAILERS,
    TRANSFER_ENCODING,
    UPGRADE,
];

/// Check if a header belongs to the legacy `X-Forwarded-*` family.
///
/// # Arguments
///
/// * `header_name` - The header name to check (lowercase).
///
/// # Example
///
/// ```
/// use relaygate_core::headers::is_legacy_forwarded;
///
/// assert!(is_legacy_forwarded("x-forwarded-for"));
/// assert!(!is_legacy_forwarded("forwarded"));
/// ```
pub fn is_legacy_forwarded(header_name: &str) -> bool {
    LEGACY_FORWARDED_HEADERS.contains(&header_name)
}

/// Check if a header is a hop-by-hop header that shouldn't be forwarded.
///
/// # Arguments
///
/// * `header_name` - The header name to check (lowercase).
///
/// # Example
///
/// ```
/// use relaygate_core::headers::is_hop_by_hop;
///
/// assert!(is_hop_by_hop("connection"));
/// assert!(!is_hop_by_hop("content-type"));
/// ```
pub fn is_hop_by_hop(header_name: &str) -> bool {
    HOP_BY_HOP_HEADERS.contains(&header_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_forwarded_headers() {
        assert!(is_legacy_forwarded(X_FORWARDED_FOR));
        assert!(is_legacy_forwarded(X_FORWARDED_PROTO));
        assert!(is_legacy_forwarded(X_FORWARDED_HOST));
        assert!(is_legacy_forwarded(X_FORWARDED_PORT));
        assert!(is_legacy_forwarded(X_FORWARDED_PATH));
    }

    #[test]
    fn test_not_legacy_forwarded_headers() {
        assert!(!is_legacy_forwarded(FORWARDED));
        assert!(!is_legacy_forwarded(HOST));
        assert!(!is_legacy_forwarded("x-real-ip"));
        assert!(!is_legacy_forwarded("accept"));
    }

    #[test]
    fn test_hop_by_hop_headers() {
        assert!(is_hop_by_hop(CONNECTION));
        assert!(is_hop_by_hop(KEEP_ALIVE));
        assert!(is_hop_by_hop(PROXY_AUTHENTICATE));
        assert!(is_hop_by_hop(PROXY_AUTHORIZATION));
        assert!(is_hop_by_hop(TE));
        assert!(is_hop_by_hop(TRAILERS));
        assert!(is_hop_by_hop(TRANSFER_ENCODING));
        assert!(is_hop_by_hop(UPGRADE));
    }

    #[test]
    fn test_not_hop_by_hop_headers() {
        assert!(!is_hop_by_hop("content-type"));
        assert!(!is_hop_by_hop(HOST));
        assert!(!is_hop_by_hop(CONTENT_LENGTH));
        assert!(!is_hop_by_hop(FORWARDED));
        assert!(!is_hop_by_hop(X_FORWARDED_FOR));
    }

    #[test]
    fn test_header_constants_lowercase() {
        // All header constants should be lowercase for consistent matching
        for name in LEGACY_FORWARDED_HEADERS {
            assert_eq!(*name, name.to_lowercase());
        }
        assert_eq!(FORWARDED, FORWARDED.to_lowercase());
        assert_eq!(HOST, HOST.to_lowercase());
        assert_eq!(CONTENT_LENGTH, CONTENT_LENGTH.to_lowercase());
    }
}
