//! Current-hop application of the `Forwarded` header for RelayGate.
//!
//! This step always runs, whether or not a transition happened: the hop this
//! relay represents appends its own client address to the `for` chain and
//! fills in any `host`/`proto`/`path` parameter a previous hop did not supply.
//! Parameters already present are never overwritten.

use hyper::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::context::ClientContext;
use crate::format::{
    FOR_PREFIX, HOST_PARAM, PATH_PARAM, PROTO_PARAM, format_for_address, format_host,
    obfuscated_for_token, port_suffix,
};
use crate::headers::FORWARDED;
use crate::transition::header_str;

/// Adds the current hop's forwarding information to the header set.
///
/// Derives this hop's `proto` from the request URI scheme, `host` from the
/// URI host and effective port (canonical ports suppressed, IPv6 bracketed
/// and quoted), `path` from the leading request path, and the `for` token
/// from the client address - obfuscated when `obfuscate` is set.
///
/// With an existing `Forwarded` value, the combined `for` chain comes first,
/// every other parameter keeps its original relative order, and missing
/// parameters are appended once in the fixed order `host`, `proto`, `path`.
/// Without one, a fresh value is built as `for;host;proto` plus `path` when
/// the leading path is non-empty.
///
/// # Arguments
///
/// * `headers` - The mutable per-request header set
/// * `ctx` - The current hop's client context
/// * `obfuscate` - Replace the client address with an opaque token
pub fn apply_forwarded_header(headers: &mut HeaderMap, ctx: &ClientContext, obfuscate: bool) {
    let proto = ctx.scheme().to_string();
    let path = ctx.forwarded_path();
    let suffix = port_suffix(&proto, ctx.port());
    let host = format_host(ctx.host(), &suffix);

    let for_token = if obfuscate {
        obfuscated_for_token()
    } else {
        format_for_address(ctx.client_addr())
    };

    let value = match header_str(headers, FORWARDED) {
        Some(existing) => merge_forwarded(existing, &for_token, &host, &proto, &path),
        None => {
            let mut value =
                format!("{FOR_PREFIX}{for_token};{HOST_PARAM}={host};{PROTO_PARAM}={proto};");
            if !path.is_empty() {
                value.push_str(&format!("{PATH_PARAM}={path};"));
            }
            value
        }
    };

    if let Ok(header_value) = HeaderValue::from_str(&value) {
        debug!(forwarded = %value, "applied current hop forwarding information");
        headers.insert(FORWARDED, header_value);
    }
}

/// Merges the current hop into an existing `Forwarded` value.
///
/// Parts containing `for=` (case-insensitive) form the chain and keep their
/// order; the new hop's token is appended after them. Remaining `key=value`
/// parts are carried through an insertion-order-preserving list so the output
/// order is deterministic.
fn merge_forwarded(existing: &str, for_token: &str, host: &str, proto: &str, path: &str) -> String {
    let mut for_groups: Vec<&str> = Vec::new();
    let mut params: Vec<(String, String)> = Vec::new();

    for part in existing.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        if part.to_ascii_lowercase().contains(FOR_PREFIX) {
            for_groups.push(part);
        } else if let Some((key, value)) = part.split_once('=') {
            params.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    let mut value = String::new();
    for group in &for_groups {
        value.push_str(group);
        value.push(',');
    }
    value.push_str(&format!("{FOR_PREFIX}{for_token};"));

    if !has_param(&params, HOST_PARAM) {
        params.push((HOST_PARAM.to_string(), host.to_string()));
    }
    if !has_param(&params, PROTO_PARAM) {
        params.push((PROTO_PARAM.to_string(), proto.to_string()));
    }
    if !path.is_empty() && !has_param(&params, PATH_PARAM) {
        params.push((PATH_PARAM.to_string(), path.to_string()));
    }

    let joined = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(";");

    format!("{value}{joined};")
}

fn has_param(params: &[(String, String)], name: &str) -> bool {
    params.iter().any(|(key, _)| key.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(uri: &str, addr: &str) -> ClientContext {
        ClientContext::new(uri.parse().unwrap(), addr.parse().unwrap())
    }

    fn forwarded(headers: &HeaderMap) -> &str {
        header_str(headers, FORWARDED).unwrap()
    }

    // ===========================================
    // fresh construction
    // ===========================================

    #[test]
    fn test_apply_fresh_value() {
        let mut headers = HeaderMap::new();

        apply_forwarded_header(
            &mut headers,
            &context("https://tt.invalid/path", "4.4.4.4"),
            false,
        );

        assert_eq!(
            forwarded(&headers),
            "for=4.4.4.4;host=tt.invalid;proto=https;path=/path;"
        );
    }

    #[test]
    fn test_apply_fresh_value_omits_blank_path() {
        let mut headers = HeaderMap::new();

        apply_forwarded_header(
            &mut headers,
            &context("https://tt.invalid/", "4.4.4.4"),
            false,
        );

        assert_eq!(forwarded(&headers), "for=4.4.4.4;host=tt.invalid;proto=https;");
    }

    #[test]
    fn test_apply_fresh_value_ipv6_uri_with_port() {
        let mut headers = HeaderMap::new();

        apply_forwarded_header(
            &mut headers,
            &context("http://[2001:db8:85a3::8a2e:370:7334]:20000/relay", "10.1.1.1"),
            false,
        );

        assert_eq!(
            forwarded(&headers),
            "for=10.1.1.1;host=\"[2001:db8:85a3::8a2e:370:7334]:20000\";proto=http;path=/relay;"
        );
    }

    #[test]
    fn test_apply_fresh_value_ipv6_client() {
        let mut headers = HeaderMap::new();

        apply_forwarded_header(
            &mut headers,
            &context("https://tt.invalid/path", "2001:db8:85a3::8a2e:370:7334"),
            false,
        );

        assert_eq!(
            forwarded(&headers),
            "for=\"[2001:db8:85a3::8a2e:370:7334]\";host=tt.invalid;proto=https;path=/path;"
        );
    }

    #[test]
    fn test_apply_canonical_port_suppressed() {
        let mut headers = HeaderMap::new();

        apply_forwarded_header(
            &mut headers,
            &context("http://tt.invalid:80/path", "4.4.4.4"),
            false,
        );

        assert_eq!(
            forwarded(&headers),
            "for=4.4.4.4;host=tt.invalid;proto=http;path=/path;"
        );
    }

    // ===========================================
    // merge with an existing value
    // ===========================================

    #[test]
    fn test_apply_appends_to_existing_for_chain() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED, "for=1.2.3.4;".parse().unwrap());

        apply_forwarded_header(
            &mut headers,
            &context("https://tt.invalid/path", "2001:db8:85a3::8a2e:370:7334"),
            false,
        );

        assert_eq!(
            forwarded(&headers),
            "for=1.2.3.4,for=\"[2001:db8:85a3::8a2e:370:7334]\";host=tt.invalid;proto=https;path=/path;"
        );
    }

    #[test]
    fn test_apply_never_overwrites_existing_parameters() {
        let mut headers = HeaderMap::new();
        headers.insert(
            FORWARDED,
            "for=1.2.3.4;host=upstream.invalid:9999;proto=http;"
                .parse()
                .unwrap(),
        );

        apply_forwarded_header(
            &mut headers,
            &context("https://tt.invalid/path", "4.4.4.4"),
            false,
        );

        assert_eq!(
            forwarded(&headers),
            "for=1.2.3.4,for=4.4.4.4;host=upstream.invalid:9999;proto=http;path=/path;"
        );
    }

    #[test]
    fn test_apply_preserves_existing_parameter_order() {
        let mut headers = HeaderMap::new();
        headers.insert(
            FORWARDED,
            "for=1.2.3.4;path=/relay/user/target;proto=http;host=platform934.tt.invalid;"
                .parse()
                .unwrap(),
        );

        apply_forwarded_header(
            &mut headers,
            &context("http://platform934.tt.invalid/relay/user/target", "10.1.1.1"),
            false,
        );

        assert_eq!(
            forwarded(&headers),
            "for=1.2.3.4,for=10.1.1.1;path=/relay/user/target;proto=http;host=platform934.tt.invalid;"
        );
    }

    #[test]
    fn test_apply_merges_multiple_for_groups_in_order() {
        let mut headers = HeaderMap::new();
        headers.insert(
            FORWARDED,
            "for=1.2.3.4;host=tt.invalid;for=5.6.7.8;".parse().unwrap(),
        );

        apply_forwarded_header(
            &mut headers,
            &context("https://tt.invalid/", "9.9.9.9"),
            false,
        );

        assert_eq!(
            forwarded(&headers),
            "for=1.2.3.4,for=5.6.7.8,for=9.9.9.9;host=tt.invalid;proto=https;"
        );
    }

    #[test]
    fn test_apply_fills_missing_parameters_in_fixed_order() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED, "host=8.8.8.8:8000;".parse().unwrap());

        apply_forwarded_header(
            &mut headers,
            &context("https://tt.invalid/path", "4.4.4.4"),
            false,
        );

        assert_eq!(
            forwarded(&headers),
            "for=4.4.4.4;host=8.8.8.8:8000;proto=https;path=/path;"
        );
    }

    #[test]
    fn test_apply_treats_empty_existing_value_as_parameterless() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED, "".parse().unwrap());

        apply_forwarded_header(
            &mut headers,
            &context("https://tt.invalid/path", "4.4.4.4"),
            false,
        );

        assert_eq!(
            forwarded(&headers),
            "for=4.4.4.4;host=tt.invalid;proto=https;path=/path;"
        );
    }

    #[test]
    fn test_apply_replaces_non_ascii_existing_value() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED, HeaderValue::from_bytes(&[0xFF]).unwrap());

        apply_forwarded_header(
            &mut headers,
            &context("https://tt.invalid/", "4.4.4.4"),
            false,
        );

        assert_eq!(forwarded(&headers), "for=4.4.4.4;host=tt.invalid;proto=https;");
    }

    // ===========================================
    // obfuscation
    // ===========================================

    #[test]
    fn test_apply_obfuscated_token_hides_client_address() {
        let mut headers = HeaderMap::new();

        apply_forwarded_header(
            &mut headers,
            &context("https://tt.invalid/", "10.1.1.1"),
            true,
        );

        let value = forwarded(&headers);
        assert!(value.starts_with("for=_"));
        assert!(!value.contains("10.1.1.1"));
    }

    #[test]
    fn test_apply_obfuscated_token_appended_to_chain() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED, "for=1.2.3.4;".parse().unwrap());

        apply_forwarded_header(
            &mut headers,
            &context("https://tt.invalid/", "10.1.1.1"),
            true,
        );

        let value = forwarded(&headers);
        assert!(value.starts_with("for=1.2.3.4,for=_"));
        assert!(!value.contains("10.1.1.1"));
    }
}
