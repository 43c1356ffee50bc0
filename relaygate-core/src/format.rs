//! RFC 7239 token formatting for RelayGate.
//!
//! This module contains the pure formatting rules shared by the transition
//! and apply steps:
//! - Canonical-port suppression for `host` values
//! - IPv6 bracketing and double-quoting of node identifiers
//! - Obfuscated `for` token generation
//!
//! # Quoting
//!
//! RFC 7239 requires parameter values containing `:` (IPv6 literals, host
//! values carrying a port inside brackets) to be double-quoted. Hostnames and
//! IPv4 addresses are never quoted.

use std::net::IpAddr;

use uuid::Uuid;

/// The `http` URI scheme.
pub const HTTP_SCHEME: &str = "http";

/// The `https` URI scheme.
pub const HTTPS_SCHEME: &str = "https";

/// Canonical port for `http`.
pub const HTTP_PORT: u16 = 80;

/// Canonical port for `https`.
pub const HTTPS_PORT: u16 = 443;

/// Prefix of a `for` parameter within a Forwarded element.
pub const FOR_PREFIX: &str = "for=";

/// Name of the `host` parameter.
pub const HOST_PARAM: &str = "host";

/// Name of the `proto` parameter.
pub const PROTO_PARAM: &str = "proto";

/// Name of the `path` parameter (not in RFC 7239 but commonly used).
pub const PATH_PARAM: &str = "path";

/// Returns the canonical port for a URI scheme, or 0 when unknown.
pub fn canonical_port(scheme: &str) -> u16 {
    match scheme {
        HTTP_SCHEME => HTTP_PORT,
        HTTPS_SCHEME => HTTPS_PORT,
        _ => 0,
    }
}

/// Computes the `:port` suffix for a `host` parameter value.
///
/// The suffix is empty when the port is canonical for the given proto
/// (80 for `http`, 443 for `https`) or when the port is unknown (0).
/// Any proto other than `http`/`https` suppresses nothing.
///
/// # Arguments
///
/// * `proto` - The resolved proto the port is paired with (may be empty)
/// * `port` - The port value (0 = unknown)
///
/// # Example
///
/// ```
/// use relaygate_core::format::port_suffix;
///
/// assert_eq!(port_suffix("https", 443), "");
/// assert_eq!(port_suffix("https", 8080), ":8080");
/// assert_eq!(port_suffix("", 8080), ":8080");
/// ```
pub fn port_suffix(proto: &str, port: u16) -> String {
    if port == 0
        || (proto == HTTP_SCHEME && port == HTTP_PORT)
        || (proto == HTTPS_SCHEME && port == HTTPS_PORT)
    {
        String::new()
    } else {
        format!(":{port}")
    }
}

/// Formats a `host` parameter value from a host and a precomputed port suffix.
///
/// If the host parses as a literal IPv6 address (with or without surrounding
/// brackets), the combined value is bracketed and double-quoted:
/// `"[addr]:port"` or `"[addr]"`. Hostnames and IPv4 addresses are returned
/// verbatim with the suffix appended, unquoted.
///
/// # Arguments
///
/// * `host` - Hostname, IPv4, or IPv6 literal (brackets optional)
/// * `suffix` - Port suffix from [`port_suffix`] (may be empty)
///
/// # Example
///
/// ```
/// use relaygate_core::format::format_host;
///
/// assert_eq!(format_host("example.com", ":8080"), "example.com:8080");
/// assert_eq!(format_host("2001:db8::1", ""), "\"[2001:db8::1]\"");
/// assert_eq!(format_host("[2001:db8::1]", ":8080"), "\"[2001:db8::1]:8080\"");
/// ```
pub fn format_host(host: &str, suffix: &str) -> String {
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    match bare.parse::<IpAddr>() {
        Ok(IpAddr::V6(_)) => format!("\"[{bare}]{suffix}\""),
        _ => format!("{host}{suffix}"),
    }
}

/// Formats a `for` parameter value from a literal client address.
///
/// IPv6 addresses are bracketed and double-quoted; IPv4 addresses are
/// rendered bare.
///
/// # Example
///
/// ```
/// use relaygate_core::format::format_for_address;
///
/// assert_eq!(format_for_address("10.1.1.1".parse().unwrap()), "10.1.1.1");
/// assert_eq!(format_for_address("::1".parse().unwrap()), "\"[::1]\"");
/// ```
pub fn format_for_address(addr: IpAddr) -> String {
    match addr {
        IpAddr::V6(v6) => format!("\"[{v6}]\""),
        IpAddr::V4(v4) => v4.to_string(),
    }
}

/// Generates an obfuscated `for` token.
///
/// Returns an RFC 7239 obfuscated node identifier: `_` followed by eight hex
/// characters drawn from a fresh random UUID. The token is unpredictable,
/// distinct per call, and carries no trace of the real client address.
///
/// # Example
///
/// ```
/// use relaygate_core::format::obfuscated_for_token;
///
/// let token = obfuscated_for_token();
/// assert!(token.starts_with('_'));
/// assert_eq!(token.len(), 9);
/// ```
pub fn obfuscated_for_token() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("_{}", &id[..8])
}
