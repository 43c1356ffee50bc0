//! Request interception for RelayGate.
//!
//! An interceptor sees every request before it is relayed upstream and may
//! mutate its header set or short-circuit with its own response. The
//! [`ForwardedInterceptor`] is the one RelayGate ships: it normalizes
//! forwarding headers and never answers requests itself.
//!
//! # Pipeline contract
//!
//! The three phases run strictly in order on a cloned header set:
//! 1. Transition - synthesize `Forwarded` from the legacy family
//! 2. Strip - drop the legacy family
//! 3. Apply - add the current hop's own forwarding information
//!
//! The clone is handed back to the pipeline only after all three phases, so
//! a request is never observed half-transformed.

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{HeaderMap, Response};
use tracing::debug;

use crate::apply::apply_forwarded_header;
use crate::context::ClientContext;
use crate::transition::{strip_legacy_headers, transition_legacy_headers};
use crate::types::ForwardingProvider;

/// A request about to be relayed, as seen by interceptors.
#[derive(Clone, Debug)]
pub struct InterceptedRequest {
    /// The current hop's request URI and client address.
    pub context: ClientContext,
    /// The per-request header set, cloned from the inbound request and
    /// forwarded upstream after interception.
    pub headers: HeaderMap,
}

/// Hook invoked for every request before it is relayed upstream.
pub trait RequestInterceptor: Send + Sync {
    /// Inspects and possibly mutates the request.
    ///
    /// Returning `Some(response)` answers the client directly and stops the
    /// pipeline; `None` lets the (possibly mutated) request continue.
    fn on_request(&self, request: &mut InterceptedRequest) -> Option<Response<Full<Bytes>>>;
}

/// Normalizes legacy `X-Forwarded-*` headers into RFC 7239 `Forwarded` and
/// appends the current hop, optionally obfuscating the client address.
///
/// Stateless across requests; safe to share behind an [`Arc`] between
/// connection tasks.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use relaygate_core::interceptor::ForwardedInterceptor;
/// use relaygate_core::types::ForwardingProvider;
///
/// struct Config;
/// impl ForwardingProvider for Config {}
///
/// let interceptor = ForwardedInterceptor::new(Arc::new(Config));
/// # let _ = interceptor;
/// ```
pub struct ForwardedInterceptor<C> {
    config: Arc<C>,
}

impl<C: ForwardingProvider> ForwardedInterceptor<C> {
    /// Creates an interceptor with the given configuration.
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }
}

impl<C: ForwardingProvider> RequestInterceptor for ForwardedInterceptor<C> {
    fn on_request(&self, request: &mut InterceptedRequest) -> Option<Response<Full<Bytes>>> {
        debug!(
            client_addr = %request.context.client_addr(),
            "normalizing forwarding headers"
        );

        let mut headers = request.headers.clone();

        transition_legacy_headers(&mut headers, &request.context);
        strip_legacy_headers(&mut headers);
        apply_forwarded_header(
            &mut headers,
            &request.context,
            self.config.obfuscate_for_address(),
        );

        request.headers = headers;
        None
    }
}
