//! Type definitions for RelayGate configuration.
//!
//! Configuration is injected at construction time through small, composable
//! traits - no component reads ambient process state. Implement the traits
//! for any source: environment variables, files, remote services, etc.

use std::time::Duration;

use crate::defaults;

// ============================================================================
// Composable Configuration Traits (Interface Segregation Principle)
// ============================================================================

/// Configuration for forwarding-header behavior.
///
/// Implement this trait to control how the current hop reports itself.
pub trait ForwardingProvider: Send + Sync {
    /// Replace the client address in the `for` parameter with an opaque,
    /// non-reversible token.
    ///
    /// Defaults to `true`; revealing literal addresses is an explicit opt-out.
    fn obfuscate_for_address(&self) -> bool {
        defaults::OBFUSCATE_FOR_ADDRESS
    }
}

/// Configuration for the post-data temporary store.
///
/// Implement this trait to control how long stashed bodies stay readable.
pub trait StoreProvider: Send + Sync {
    /// How long a stashed request/response body remains retrievable.
    fn storage_period(&self) -> Duration {
        defaults::STORAGE_PERIOD
    }
}

// ============================================================================
// ConfigProvider - Aggregated trait for full configuration
// ============================================================================

/// Trait for complete configuration injection.
///
/// This trait combines all specialized configuration traits into one. For
/// more granular control, implement the individual traits:
/// - [`ForwardingProvider`] for forwarding-header behavior
/// - [`StoreProvider`] for the temporary store
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use relaygate_core::{ForwardingProvider, StoreProvider};
///
/// struct MyConfig;
///
/// impl ForwardingProvider for MyConfig {
///     fn obfuscate_for_address(&self) -> bool {
///         false
///     }
/// }
///
/// impl StoreProvider for MyConfig {
///     fn storage_period(&self) -> Duration {
///         Duration::from_secs(120)
///     }
/// }
/// ```
pub trait ConfigProvider: ForwardingProvider + StoreProvider {}

// Blanket implementation: any type implementing all sub-traits is a ConfigProvider
impl<T> ConfigProvider for T where T: ForwardingProvider + StoreProvider {}
