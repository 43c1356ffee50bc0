//! Default configuration values for RelayGate.
//!
//! This module centralizes all default values used throughout RelayGate,
//! ensuring consistency between production code and tests.

use std::time::Duration;

/// Default for replacing the client address with an opaque token.
pub const OBFUSCATE_FOR_ADDRESS: bool = true;

/// Default storage period for stashed bodies, in seconds.
pub const STORAGE_PERIOD_SECS: u64 = 60;

/// Default storage period for stashed bodies.
pub const STORAGE_PERIOD: Duration = Duration::from_secs(STORAGE_PERIOD_SECS);

/// Number of stored entries that triggers an expiry sweep on write.
pub const STORE_CLEANUP_THRESHOLD: usize = 10_000;
