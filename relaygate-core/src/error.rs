//! Error types for RelayGate.
//!
//! This module provides a unified error type for all RelayGate operations,
//! enabling better error handling and propagation throughout the codebase.
//! The header transformation itself is total and never produces an error;
//! these variants cover construction-time validation.

use thiserror::Error;

/// Result type alias for RelayGate operations.
pub type Result<T> = std::result::Result<T, RelayGateError>;

/// Unified error type for RelayGate operations.
///
/// # Example
///
/// ```
/// use relaygate_core::error::{RelayGateError, Result};
///
/// fn validate_listen_port(port: u16) -> Result<()> {
///     if port == 0 {
///         return Err(RelayGateError::Config("Ports must be greater than 0".into()));
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Error)]
pub enum RelayGateError {
    /// Configuration error (missing or invalid values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Temporary store construction or operation failure.
    #[error("Store error: {0}")]
    Store(String),
}
