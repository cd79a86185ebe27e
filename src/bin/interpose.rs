//! Interpose proxy binary with the reference console controller.
//!
//! The controller prints every request and response and waves every request
//! through without editing; it still services the handshake, which is what
//! keeps the proxy moving.

use anyhow::{Context, Result};
use interpose_rs::intercept::InterceptGate;
use interpose_rs::proxy::{DEFAULT_LISTEN_ADDR, Proxy, ProxyConfig, ServeMode};
use tokio::sync::mpsc;
use tracing::error;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_NAME: &str = "interpose";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let mut args = std::env::args().skip(1);
    let mut listen_addr = String::new();
    let mut mode = ServeMode::Sequential;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-l" | "--listen" => {
                listen_addr = args.next().context("Expected listen address after -l")?;
            }
            "--concurrent" => {
                mode = ServeMode::PerConnection;
            }
            "-V" | "--version" => {
                println!("{APP_NAME} {VERSION}");
                return Ok(());
            }
            "-h" | "--help" => {
                println!("Usage: interpose [OPTIONS]");
                println!("Options:");
                println!("  -l, --listen ADDRESS   Listen address (default: {DEFAULT_LISTEN_ADDR})");
                println!("      --concurrent       Serve each connection in its own task");
                println!("  -V, --version          Show version information");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {
                error!("Unknown argument: {}", arg);
                return Err(anyhow::anyhow!("Unknown argument: {}", arg));
            }
        }
    }

    let (gate, mut offers) = InterceptGate::channel();
    let (response_tx, mut responses) = mpsc::channel(1);
    let (error_tx, mut errors) = mpsc::channel(16);

    let proxy = Proxy::new(
        ProxyConfig { listen_addr, mode },
        gate,
        response_tx,
        error_tx,
    );
    let mut server = tokio::spawn(async move { proxy.listen().await });

    loop {
        tokio::select! {
            result = &mut server => {
                result
                    .context("proxy task panicked")?
                    .context("proxy terminated")?;
                return Ok(());
            }
            Some(offer) = offers.recv() => {
                println!("request: ");
                println!("{}", offer.request());
                offer.pass();
            }
            Some(response) = responses.recv() => {
                println!("response: ");
                println!("{}", response);
            }
            Some(err) = errors.recv() => {
                error!("{}", err);
            }
        }
    }
}
