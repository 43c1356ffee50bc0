use clap::Parser;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

mod args;
mod config;
mod env_vars;
mod relay;
mod server;

use args::Args;
use config::EnvVarConfig;
use relaygate_core::{ForwardedInterceptor, MemoryStore};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Validate arguments
    if let Err(err) = args.validate() {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }

    server::init_tracing(args.json_logs);
    server::print_startup_info(&args);

    // Wire up the shared pipeline pieces
    let config = Arc::new(EnvVarConfig);
    let interceptor = Arc::new(ForwardedInterceptor::new(config));
    let store = match MemoryStore::new(config::get_storage_period()) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    };
    let http_client = match reqwest::Client::builder()
        .timeout(relay::UPSTREAM_TIMEOUT)
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            eprintln!("❌ Failed to build HTTP client: {err}");
            std::process::exit(1);
        }
    };

    // Bind to address
    let bind_ip: std::net::IpAddr = args.bind.parse().expect("Invalid bind address");
    let bind_addr = SocketAddr::from((bind_ip, args.listen));
    let listener = match TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("❌ Failed to bind to port {}: {}", args.listen, err);
            std::process::exit(1);
        }
    };

    println!("✅ RelayGate is running on port {}", args.listen);

    // Accept connections
    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                eprintln!("⚠️  Failed to accept connection: {err}");
                continue;
            }
        };

        if args.verbose && !args.quiet {
            println!("📡 New connection from {addr}");
        }

        let io = TokioIo::new(stream);
        let interceptor = interceptor.clone();
        let store = store.clone();
        let http_client = http_client.clone();
        let forward_host = args.bind.clone();
        let forward_port = args.forward;
        let verbose = args.verbose;
        let quiet = args.quiet;

        tokio::task::spawn(async move {
            let service = service_fn(move |req| {
                relay::handle_request(
                    req,
                    addr.ip(),
                    forward_host.clone(),
                    forward_port,
                    interceptor.clone(),
                    store.clone(),
                    http_client.clone(),
                )
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                if !quiet {
                    if verbose {
                        eprintln!("⚠️  Connection error from {addr}: {err}");
                    } else {
                        eprintln!("⚠️  Connection error: {err}");
                    }
                }
            }
        });
    }
}
