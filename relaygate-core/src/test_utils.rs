//! Test utilities for RelayGate.
//!
//! This module provides shared test configuration types used across unit
//! tests. It is only compiled when running tests (`#[cfg(test)]`).

use std::time::Duration;

use crate::types::{ForwardingProvider, StoreProvider};

/// Shared test configuration for unit tests.
///
/// This struct implements all configuration traits with the documented
/// defaults and builder methods for customization.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub obfuscate_for_address: bool,
    pub storage_period: Duration,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            obfuscate_for_address: true,
            storage_period: Duration::from_secs(60),
        }
    }
}

impl TestConfig {
    /// Create a new test configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration that reveals the literal client address.
    pub fn revealing() -> Self {
        Self {
            obfuscate_for_address: false,
            ..Self::default()
        }
    }

    /// Configure the storage period.
    pub fn with_storage_period(mut self, period: Duration) -> Self {
        self.storage_period = period;
        self
    }
}

impl ForwardingProvider for TestConfig {
    fn obfuscate_for_address(&self) -> bool {
        self.obfuscate_for_address
    }
}

impl StoreProvider for TestConfig {
    fn storage_period(&self) -> Duration {
        self.storage_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TestConfig::new();
        assert!(config.obfuscate_for_address);
        assert_eq!(config.storage_period, Duration::from_secs(60));
    }

    #[test]
    fn test_revealing_config() {
        let config = TestConfig::revealing();
        assert!(!config.obfuscate_for_address);
    }

    #[test]
    fn test_builder_methods() {
        let config = TestConfig::new().with_storage_period(Duration::from_secs(5));
        assert_eq!(config.storage_period, Duration::from_secs(5));
    }
}
