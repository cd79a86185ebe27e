//! Accept loop and per-connection forwarding cycle

pub(crate) mod cycle;
/// Proxy server and configuration
pub mod server;

pub use server::{DEFAULT_LISTEN_ADDR, Proxy, ProxyConfig, ServeMode};
