//! Interception handshake between the proxy and an external controller

/// Pause/resume gate implementation
pub mod gate;

pub use gate::{Decision, InterceptGate, Offer};
