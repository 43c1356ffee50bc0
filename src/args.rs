//! Command line argument parsing for RelayGate.
//!
//! This module defines the CLI interface using [`clap`] for argument parsing.
//! It provides configuration for binding addresses, ports, and output
//! verbosity.
//!
//! # Example
//!
//! ```no_run
//! use relaygate::args::Args;
//! use clap::Parser;
//!
//! let args = Args::parse();
//! if let Err(e) = args.validate() {
//!     eprintln!("{}", e);
//!     std::process::exit(1);
//! }
//! ```

use clap::Parser;

use relaygate_core::error::{RelayGateError, Result};

/// Command line arguments for RelayGate.
///
/// This struct defines all CLI options available for configuring the relay.
///
/// # Fields
///
/// * `bind` - Address to bind for listening and forwarding (default: "0.0.0.0")
/// * `listen` - Port to listen on for incoming requests
/// * `forward` - Port to forward requests to
/// * `verbose` - Enable detailed configuration output
/// * `quiet` - Suppress non-essential output (conflicts with verbose)
/// * `json_logs` - Output logs in JSON format for structured logging
#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    long_about = "A privacy-conscious relay gateway\nTransitions legacy X-Forwarded-* headers into RFC 7239 Forwarded and keeps internal addresses to itself\n\nExample usage:\n  relaygate --listen 8080 --forward 9000\n  relaygate -l 8080 -f 9000 --verbose"
)]
#[command(
    after_help = "Environment variables:\n  OBFUSCATE_FOR_ADDRESS  Replace client addresses with opaque tokens (default: true)\n  STORAGE_PERIOD_SECS    Seconds stashed bodies stay retrievable (default: 60)"
)]
pub struct Args {
    /// Address to bind to (for both listening and forwarding)
    #[arg(
        long,
        short = 'b',
        help = "Bind address for listening and forwarding",
        value_name = "ADDRESS",
        default_value = "0.0.0.0"
    )]
    pub bind: String,

    /// Port to listen on for incoming requests
    #[arg(
        long,
        short = 'l',
        help = "Listen port for incoming connections",
        value_name = "PORT"
    )]
    pub listen: u16,

    /// Port to forward requests to
    #[arg(
        long,
        short = 'f',
        help = "Destination port for forwarded requests",
        value_name = "PORT"
    )]
    pub forward: u16,

    /// Enable verbose output
    #[arg(
        long,
        short = 'v',
        help = "Show detailed configuration and startup information"
    )]
    pub verbose: bool,

    /// Enable quiet mode (minimal output)
    #[arg(
        long,
        short = 'q',
        help = "Suppress configuration output, show only essential messages",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output logs in JSON format (for structured logging)
    #[arg(long, help = "Output logs in JSON format for structured logging")]
    pub json_logs: bool,
}

impl Args {
    /// Validates the parsed command line arguments.
    ///
    /// Performs the following validations:
    /// - Listen and forward ports must be different
    /// - Both ports must be greater than 0
    /// - Bind address must be a valid IP address
    ///
    /// # Example
    ///
    /// ```
    /// use relaygate::args::Args;
    /// use clap::Parser;
    ///
    /// // Simulating args with same listen and forward ports
    /// let args = Args::try_parse_from(["relaygate", "-l", "8080", "-f", "8080"]).unwrap();
    /// assert!(args.validate().is_err());
    ///
    /// // Valid configuration
    /// let args = Args::try_parse_from(["relaygate", "-l", "8080", "-f", "9000"]).unwrap();
    /// assert!(args.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.listen == self.forward {
            return Err(RelayGateError::Config(
                "Listen and forward ports cannot be the same".to_string(),
            ));
        }

        if self.listen == 0 || self.forward == 0 {
            return Err(RelayGateError::Config(
                "Ports must be greater than 0".to_string(),
            ));
        }

        // Validate bind address format
        if self.bind.parse::<std::net::IpAddr>().is_err() {
            return Err(RelayGateError::Config(format!(
                "Invalid bind address: '{}'",
                self.bind
            )));
        }

        Ok(())
    }
}
