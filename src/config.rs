//! Configuration management for RelayGate.
//!
//! This module handles loading and caching configuration from environment
//! variables. All configurations are computed once at first access and cached
//! for the lifetime of the application using `once_cell::sync::Lazy`.
//!
//! # Caching
//!
//! Configuration values are read from environment variables only once, at
//! startup. This provides:
//! - Consistent configuration throughout the application lifetime
//! - No runtime overhead from repeated environment lookups
//! - Thread-safe access without locking
//!
//! # Degradation
//!
//! Invalid values never fail a request: anything unparseable falls back to
//! the documented default with a warning.
//!
//! # Example
//!
//! ```
//! use relaygate::config;
//!
//! // Get cached configuration
//! let obfuscate = config::get_obfuscate_for_address();
//! let period = config::get_storage_period();
//! println!("obfuscation={obfuscate}, storage period={period:?}");
//! ```

use std::env;
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::env_vars;
use relaygate_core::defaults;
use relaygate_core::types::{ForwardingProvider, StoreProvider};

// ============================================================================
// Cached Configuration (computed once at first access)
// ============================================================================

static OBFUSCATE_FOR_ADDRESS: Lazy<bool> = Lazy::new(compute_obfuscate_for_address);
static STORAGE_PERIOD: Lazy<Duration> = Lazy::new(compute_storage_period);

// ============================================================================
// Internal Helpers
// ============================================================================

/// Parses an environment variable with fallback to a default value.
///
/// Logs a warning if the value exists but cannot be parsed.
fn parse_env_var_or_default<T>(var_name: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    parse_var_or_default_internal(var_name, default, |key| env::var(key))
}

/// Lookup-injected variant so tests can run without touching process state.
fn parse_var_or_default_internal<T, F>(var_name: &str, default: T, lookup: F) -> T
where
    T: FromStr + Copy,
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match lookup(var_name) {
        Ok(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = var_name, value = %value, "Invalid env var value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

// ============================================================================
// Public Configuration Getters
// ============================================================================

/// Returns whether client addresses are obfuscated in `Forwarded` values.
///
/// Configuration is read from environment variables on first access:
/// - `OBFUSCATE_FOR_ADDRESS`: `true`/`false` (default: true)
///
/// # Example
///
/// ```
/// use relaygate::config::get_obfuscate_for_address;
///
/// if get_obfuscate_for_address() {
///     println!("client addresses stay private");
/// }
/// ```
pub fn get_obfuscate_for_address() -> bool {
    *OBFUSCATE_FOR_ADDRESS
}

fn compute_obfuscate_for_address() -> bool {
    parse_env_var_or_default(
        env_vars::OBFUSCATE_FOR_ADDRESS,
        defaults::OBFUSCATE_FOR_ADDRESS,
    )
}

/// Returns the cached storage period for stashed bodies.
///
/// Configuration is read from environment variables on first access:
/// - `STORAGE_PERIOD_SECS`: Seconds bodies stay retrievable (default: 60)
///
/// A zero period would make the store reject construction, so it degrades to
/// the default like any other invalid value.
pub fn get_storage_period() -> Duration {
    *STORAGE_PERIOD
}

fn compute_storage_period() -> Duration {
    compute_storage_period_internal(|key| env::var(key))
}

fn compute_storage_period_internal<F>(lookup: F) -> Duration
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    let secs = parse_var_or_default_internal(
        env_vars::STORAGE_PERIOD_SECS,
        defaults::STORAGE_PERIOD_SECS,
        lookup,
    );

    if secs == 0 {
        warn!("Storage period must be positive, using default");
        return defaults::STORAGE_PERIOD;
    }

    Duration::from_secs(secs)
}

// ============================================================================
// Environment-backed ConfigProvider
// ============================================================================

/// Configuration provider backed by the cached environment values.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use relaygate::config::EnvVarConfig;
/// use relaygate_core::ForwardedInterceptor;
///
/// let interceptor = ForwardedInterceptor::new(Arc::new(EnvVarConfig));
/// # let _ = interceptor;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvVarConfig;

impl ForwardingProvider for EnvVarConfig {
    fn obfuscate_for_address(&self) -> bool {
        get_obfuscate_for_address()
    }
}

impl StoreProvider for EnvVarConfig {
    fn storage_period(&self) -> Duration {
        get_storage_period()
    }
}
