//! RelayGate Core - Reusable relay interception components
//!
//! This crate provides the core functionality for normalizing forwarding
//! headers inside a relay pipeline:
//! - Transition of legacy `X-Forwarded-*` headers into RFC 7239 `Forwarded`
//! - Unconditional removal of the legacy header family
//! - Per-hop `Forwarded` application with optional client-address obfuscation
//! - A keyed temporary store for relayed request/response bodies
//!
//! # Overview
//!
//! `relaygate-core` is designed to be framework-agnostic and can be
//! integrated into any Rust relay or reverse proxy. Configuration is
//! provided via the [`ConfigProvider`] trait at construction time, allowing
//! flexible configuration from any source.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use hyper::HeaderMap;
//! use relaygate_core::{
//!     ClientContext, ForwardedInterceptor, ForwardingProvider, InterceptedRequest,
//!     RequestInterceptor,
//! };
//!
//! // Implement your own configuration provider
//! struct MyConfig;
//!
//! impl ForwardingProvider for MyConfig {
//!     fn obfuscate_for_address(&self) -> bool {
//!         true
//!     }
//! }
//!
//! let interceptor = ForwardedInterceptor::new(Arc::new(MyConfig));
//!
//! let mut request = InterceptedRequest {
//!     context: ClientContext::new(
//!         "https://tt.invalid/path".parse().unwrap(),
//!         "10.1.1.1".parse().unwrap(),
//!     ),
//!     headers: HeaderMap::new(),
//! };
//!
//! // The interceptor mutates the header set and never answers the request.
//! assert!(interceptor.on_request(&mut request).is_none());
//! assert!(request.headers.contains_key("forwarded"));
//! ```
//!
//! # Modules
//!
//! - [`types`] - Configuration traits ([`ConfigProvider`] and friends)
//! - [`error`] - Error types and result aliases
//! - [`headers`] - HTTP header constants
//! - [`format`] - RFC 7239 token formatting rules
//! - [`context`] - Per-request client context
//! - [`transition`] - Legacy header transition and stripping
//! - [`apply`] - Current-hop `Forwarded` application
//! - [`interceptor`] - The request interception entry point
//! - [`store`] - Post-data temporary store

#![forbid(unsafe_code)]

pub mod apply;
pub mod context;
pub mod defaults;
pub mod error;
pub mod format;
pub mod headers;
pub mod interceptor;
pub mod store;
#[cfg(test)]
pub mod test_utils;
pub mod transition;
pub mod types;

// Re-export commonly used items at crate root
pub use context::ClientContext;
pub use error::{RelayGateError, Result};
pub use interceptor::{ForwardedInterceptor, InterceptedRequest, RequestInterceptor};
pub use store::{BodyWriter, MemoryStore};
pub use types::{
    // Aggregated configuration trait
    ConfigProvider,
    // Composable configuration traits
    ForwardingProvider,
    StoreProvider,
};
