//! Environment variable names used throughout RelayGate configuration

/// Forwarding privacy configuration
pub const OBFUSCATE_FOR_ADDRESS: &str = "OBFUSCATE_FOR_ADDRESS";

/// Temporary store configuration
pub const STORAGE_PERIOD_SECS: &str = "STORAGE_PERIOD_SECS";

/// Get all environment variable names for documentation/validation
pub fn all_env_vars() -> &'static [&'static str] {
    &[OBFUSCATE_FOR_ADDRESS, STORAGE_PERIOD_SECS]
}
