//! Per-request client context for RelayGate.
//!
//! A [`ClientContext`] carries the two facts the relay pipeline knows about
//! the hop currently being processed: the URI the client requested and the
//! address the connection came from. It is read-only to the transformation
//! steps and never outlives the request.

use std::net::IpAddr;

use hyper::Uri;

use crate::format;

/// The forwarded path covers at most the relay routing prefix,
/// e.g. `/relay/{user}/{target}`.
const FORWARDED_PATH_COMPONENTS: usize = 3;

/// Read-only view of the current hop's request, supplied by the pipeline.
#[derive(Clone, Debug)]
pub struct ClientContext {
    uri: Uri,
    client_addr: IpAddr,
}

impl ClientContext {
    /// Creates a context from the client request URI and connection address.
    pub fn new(uri: Uri, client_addr: IpAddr) -> Self {
        Self { uri, client_addr }
    }

    /// The address the client connection was accepted from.
    pub fn client_addr(&self) -> IpAddr {
        self.client_addr
    }

    /// The request URI scheme, defaulting to `http` when absent.
    pub fn scheme(&self) -> &str {
        self.uri.scheme_str().unwrap_or(format::HTTP_SCHEME)
    }

    /// The request URI host, empty when the URI carries no authority.
    ///
    /// IPv6 literals may be returned with or without brackets depending on
    /// how the URI was built; the formatter normalizes either form.
    pub fn host(&self) -> &str {
        self.uri.host().unwrap_or_default()
    }

    /// The effective request port: the explicit URI port, else the canonical
    /// port for the scheme, else 0 (unknown).
    pub fn port(&self) -> u16 {
        self.uri
            .port_u16()
            .unwrap_or_else(|| format::canonical_port(self.scheme()))
    }

    /// The leading request path to report as the `path` parameter.
    ///
    /// Covers at most [`FORWARDED_PATH_COMPONENTS`] path components with no
    /// trailing slash; `/` yields an empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use relaygate_core::context::ClientContext;
    ///
    /// let ctx = ClientContext::new(
    ///     "http://tt.invalid/relay/user/target/extra".parse().unwrap(),
    ///     "10.1.1.1".parse().unwrap(),
    /// );
    /// assert_eq!(ctx.forwarded_path(), "/relay/user/target");
    /// ```
    pub fn forwarded_path(&self) -> String {
        let components: Vec<&str> = self
            .uri
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .take(FORWARDED_PATH_COMPONENTS)
            .collect();

        if components.is_empty() {
            String::new()
        } else {
            format!("/{}", components.join("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(uri: &str) -> ClientContext {
        ClientContext::new(uri.parse().unwrap(), "10.1.1.1".parse().unwrap())
    }

    // ===========================================
    // scheme / host / port tests
    // ===========================================

    #[test]
    fn test_scheme_from_uri() {
        assert_eq!(context("https://tt.invalid/").scheme(), "https");
        assert_eq!(context("http://tt.invalid/").scheme(), "http");
    }

    #[test]
    fn test_scheme_defaults_to_http() {
        assert_eq!(context("/path/only").scheme(), "http");
    }

    #[test]
    fn test_host_from_uri() {
        assert_eq!(context("https://tt.invalid/").host(), "tt.invalid");
        assert_eq!(context("/path/only").host(), "");
    }

    #[test]
    fn test_port_explicit() {
        assert_eq!(context("https://tt.invalid:8443/").port(), 8443);
        assert_eq!(context("http://tt.invalid:20000/").port(), 20000);
    }

    #[test]
    fn test_port_canonical_fallback() {
        assert_eq!(context("http://tt.invalid/").port(), 80);
        assert_eq!(context("https://tt.invalid/").port(), 443);
    }

    #[test]
    fn test_port_unknown_without_authority() {
        assert_eq!(context("/path/only").port(), 80);
    }

    #[test]
    fn test_ipv6_uri_host_roundtrips_through_formatter() {
        let ctx = context("https://[2001:db8:85a3::8a2e:370:7334]/path");
        let suffix = format::port_suffix(ctx.scheme(), ctx.port());
        assert_eq!(
            format::format_host(ctx.host(), &suffix),
            "\"[2001:db8:85a3::8a2e:370:7334]\""
        );
    }

    // ===========================================
    // forwarded_path tests
    // ===========================================

    #[test]
    fn test_forwarded_path_root_is_empty() {
        assert_eq!(context("https://tt.invalid/").forwarded_path(), "");
    }

    #[test]
    fn test_forwarded_path_single_component() {
        assert_eq!(context("https://tt.invalid/path").forwarded_path(), "/path");
    }

    #[test]
    fn test_forwarded_path_full_prefix() {
        assert_eq!(
            context("http://tt.invalid/relay/user/target").forwarded_path(),
            "/relay/user/target"
        );
    }

    #[test]
    fn test_forwarded_path_truncates_to_prefix() {
        assert_eq!(
            context("http://tt.invalid/relay/user/target/deep/er").forwarded_path(),
            "/relay/user/target"
        );
    }

    #[test]
    fn test_forwarded_path_trailing_slash_trimmed() {
        assert_eq!(context("http://tt.invalid/relay/").forwarded_path(), "/relay");
    }
}
