//! Server utilities for RelayGate: tracing setup and startup output.

use std::env;

use tracing_subscriber::EnvFilter;

use crate::{args::Args, config, env_vars};

/// Initializes the global tracing subscriber.
///
/// Respects `RUST_LOG` when set, defaulting to `info`. With `json_logs` the
/// subscriber emits one JSON object per event for structured log shipping.
pub fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Print startup banner with configuration
pub fn print_startup_info(args: &Args) {
    if args.quiet {
        // Quiet mode: only essential information
        println!(
            "🚀 RelayGate v{} starting on port {}",
            env!("CARGO_PKG_VERSION"),
            args.listen
        );
        return;
    }

    // Normal/verbose mode: full configuration display
    println!("🛡️  {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("   {}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("📡 Network Configuration:");
    println!("   Listen Port:    {}", args.listen);
    println!("   Forward Port:   {}", args.forward);
    println!();

    println!("🕶️  Forwarding Privacy:");
    if config::get_obfuscate_for_address() {
        println!("   Client Address: obfuscated (opaque tokens)");
    } else {
        println!("   Client Address: revealed (literal addresses)");
    }

    println!("🗄️  Temporary Store:");
    println!(
        "   Storage Period: {} seconds",
        config::get_storage_period().as_secs()
    );

    // Show environment configuration in verbose mode
    if args.verbose {
        print_env_config();
    }

    println!();
    println!("🚀 Server starting...");
}

/// Print environment variable configuration status (used in verbose mode)
fn print_env_config() {
    println!();
    println!("🔧 Environment Variables:");

    for &var_name in env_vars::all_env_vars() {
        match env::var(var_name) {
            Ok(value) => {
                println!("   {var_name:<25} = {value}");
            }
            Err(_) => {
                println!("   {var_name:<25} = [NOT SET]");
            }
        }
    }
}
