//! HTTP message handling: framing, rewriting, origin resolution

/// Message framing (header block plus Content-Length body)
pub mod framing;
/// Proxy-form to origin-form request rewriting
pub mod rewrite;
/// Origin address extraction and resolution
pub mod target;

pub use framing::{RawMessage, read_message};
pub use rewrite::prepare_request;
pub use target::{remote_target, resolve};
