//! Intercepting forward HTTP proxy.
//!
//! Accepts clients configured to tunnel through it, frames the raw HTTP
//! request, offers it to an external controller that may pause the exchange
//! and substitute an edited request, then forwards to the resolved origin
//! and relays the response back to the client. One request/response exchange
//! per accepted connection, plain absolute-form HTTP only.
//!
//! # Architecture
//!
//! - **http**: message framing, request rewriting, origin resolution
//! - **intercept**: the pause/resume handshake with the controller
//! - **proxy**: accept loop and per-connection forwarding cycle
//! - **util**: utilities (error handling, socket tuning)

/// HTTP message handling
pub mod http;
/// Interception handshake
pub mod intercept;
/// Accept loop and connection cycle
pub mod proxy;
/// Utility modules (error, socket tuning)
pub mod util;

pub use http::*;
pub use intercept::*;
pub use proxy::*;
pub use util::*;

// Re-export commonly used types
pub use util::error::{ProxyError, Result};
