//! Legacy forwarding header transition for RelayGate.
//!
//! This module converts the de-facto `X-Forwarded-*` family into a
//! provisional RFC 7239 `Forwarded` value, and removes the legacy headers so
//! they never reach the upstream target.
//!
//! # Idempotency
//!
//! A pre-existing `Forwarded` header is taken as proof that a previous hop
//! already transitioned, so the legacy headers are ignored (and still
//! stripped). The `Forwarded` value itself is never re-derived.

use hyper::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::context::ClientContext;
use crate::format::{
    FOR_PREFIX, HOST_PARAM, HTTP_SCHEME, HTTPS_SCHEME, PATH_PARAM, PROTO_PARAM, format_host,
    port_suffix,
};
use crate::headers::{
    FORWARDED, LEGACY_FORWARDED_HEADERS, X_FORWARDED_FOR, X_FORWARDED_HOST, X_FORWARDED_PATH,
    X_FORWARDED_PORT, X_FORWARDED_PROTO, is_legacy_forwarded,
};

/// Returns a header value as a string slice, ignoring non-ASCII values.
pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Synthesizes a `Forwarded` header from the legacy `X-Forwarded-*` family.
///
/// No-ops when no legacy header is present, or when a `Forwarded` header
/// already exists (a previous hop transitioned). Otherwise assembles the
/// groups in the fixed order `for`, `path`, `proto`, `host`, each
/// `;`-terminated, and stores the result verbatim:
///
/// - `for`: one token per comma-separated `X-Forwarded-For` entry, trimmed,
///   empty entries dropped, original order preserved.
/// - `path`: the trimmed `X-Forwarded-Path` value, verbatim.
/// - `proto`: the trimmed `X-Forwarded-Proto` value, only when it is exactly
///   `http` or `https`; anything else is dropped.
/// - `host`: the trimmed `X-Forwarded-Host` value plus a port suffix derived
///   from `X-Forwarded-Port` (canonical ports for the resolved proto are
///   suppressed, unparseable ports ignored). When only a port was reported,
///   the current request's own URI host carries the suffix instead.
///
/// # Arguments
///
/// * `headers` - The mutable per-request header set
/// * `ctx` - The current hop's client context
pub fn transition_legacy_headers(headers: &mut HeaderMap, ctx: &ClientContext) {
    let has_legacy = headers.keys().any(|name| is_legacy_forwarded(name.as_str()));
    if !has_legacy || headers.contains_key(FORWARDED) {
        return;
    }

    let mut value = String::new();

    if let Some(xff) = header_str(headers, X_FORWARDED_FOR) {
        let chain: Vec<String> = xff
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| format!("{FOR_PREFIX}{entry}"))
            .collect();
        if !chain.is_empty() {
            value.push_str(&chain.join(","));
            value.push(';');
        }
    }

    if let Some(path) = header_str(headers, X_FORWARDED_PATH) {
        let path = path.trim();
        if !path.is_empty() {
            value.push_str(&format!("{PATH_PARAM}={path};"));
        }
    }

    let proto = header_str(headers, X_FORWARDED_PROTO)
        .map(str::trim)
        .unwrap_or_default();
    if proto == HTTP_SCHEME || proto == HTTPS_SCHEME {
        value.push_str(&format!("{PROTO_PARAM}={proto};"));
    }

    // The suffix is paired with the legacy proto, not the URI scheme: an
    // intermediary reporting port 80 alongside proto=http means "canonical".
    let mut suffix = String::new();
    if let Some(port) = header_str(headers, X_FORWARDED_PORT) {
        if let Ok(port) = port.trim().parse::<u16>() {
            suffix = port_suffix(proto, port);
        }
    }

    let mut host = String::new();
    if let Some(legacy_host) = header_str(headers, X_FORWARDED_HOST) {
        let legacy_host = legacy_host.trim();
        if !legacy_host.is_empty() {
            host = format_host(legacy_host, &suffix);
        }
    }
    if host.is_empty() && !suffix.is_empty() && !ctx.host().is_empty() {
        host = format_host(ctx.host(), &suffix);
    }
    if !host.is_empty() {
        value.push_str(&format!("{HOST_PARAM}={host};"));
    }

    if let Ok(header_value) = HeaderValue::from_str(&value) {
        debug!(forwarded = %value, "transitioned legacy forwarding headers");
        headers.insert(FORWARDED, header_value);
    }
}

/// Removes all legacy `X-Forwarded-*` headers from the header set.
///
/// Runs unconditionally after the transition, whether or not a transition
/// occurred, so the legacy family never reaches the upstream target.
pub fn strip_legacy_headers(headers: &mut HeaderMap) {
    for name in LEGACY_FORWARDED_HEADERS {
        headers.remove(*name);
    }
}
