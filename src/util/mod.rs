//! Utility modules (error handling, socket tuning)

/// Error types
pub mod error;
/// Network-related utilities (TCP tuning)
pub mod net;

pub use error::{ProxyError, Result};
pub use net::configure_tcp_stream;
