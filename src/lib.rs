//! RelayGate - A relay gateway that keeps forwarding headers honest
//!
//! A privacy-conscious relay that normalizes legacy `X-Forwarded-*` headers
//! into the standardized RFC 7239 `Forwarded` header before requests reach
//! their upstream target.
//!
//! # Overview
//!
//! RelayGate is a small HTTP relay written in Rust that provides:
//! - Transition of the legacy `X-Forwarded-*` family into `Forwarded`
//! - Unconditional removal of the legacy headers before forwarding
//! - Per-hop `Forwarded` application across IPv4 and IPv6 chains
//! - Client-address obfuscation by default (opaque `_` tokens)
//! - A temporary store for relayed request/response bodies
//! - Structured logging with JSON support
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use relaygate::config::{self, EnvVarConfig};
//! use relaygate_core::{ForwardedInterceptor, MemoryStore};
//!
//! // Build the pipeline pieces from environment configuration
//! let interceptor = ForwardedInterceptor::new(Arc::new(EnvVarConfig));
//! let store = MemoryStore::new(config::get_storage_period()).unwrap();
//! # let _ = (interceptor, store);
//! ```
//!
//! # Modules
//!
//! - [`config`] - Configuration management from environment variables
//! - [`env_vars`] - Environment variable constants
//! - [`relay`] - Per-request relay pipeline
//! - [`server`] - Server utilities and startup info
//! - [`args`] - Command line argument parsing
//!
//! # Re-exports from relaygate-core
//!
//! Core functionality is provided by the `relaygate-core` crate:
//! - [`interceptor`] - Forwarding-header normalization
//! - [`transition`] - Legacy header transition and stripping
//! - [`apply`] - Current-hop `Forwarded` application
//! - [`store`] - Post-data temporary store

#![forbid(unsafe_code)]

pub mod args;
pub mod config;
pub mod env_vars;
pub mod relay;
pub mod server;

// Re-export relaygate-core modules
pub use relaygate_core::apply;
pub use relaygate_core::context;
pub use relaygate_core::format;
pub use relaygate_core::headers;
pub use relaygate_core::interceptor;
pub use relaygate_core::store;
pub use relaygate_core::transition;
pub use relaygate_core::types;

// Re-export commonly used items at crate root
pub use config::EnvVarConfig;
pub use relaygate_core::{
    ClientContext, ConfigProvider, ForwardedInterceptor, ForwardingProvider, InterceptedRequest,
    MemoryStore, RelayGateError, RequestInterceptor, StoreProvider,
};
