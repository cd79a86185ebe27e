//! The pause/resume gate between parsing and forwarding.
//!
//! Every proxied request is offered to the controller before it goes to the
//! origin. The handshake is a strict rendezvous: one offer, one decision, at
//! most one replacement. Consuming methods on [`Offer`] make that an
//! enforced invariant rather than a channel convention. There is no timeout;
//! a silent controller stalls the exchange indefinitely, which is the
//! intended pause semantics.

use crate::util::{ProxyError, Result};
use tokio::sync::{mpsc, oneshot};

/// The controller's verdict on one offered request.
#[derive(Debug)]
pub enum Decision {
    /// Forward the offered request unmodified.
    Forward,
    /// Forward the supplied replacement instead.
    Replace(String),
}

/// One request paused at the gate, awaiting the controller's decision.
#[derive(Debug)]
pub struct Offer {
    request: String,
    reply: oneshot::Sender<Decision>,
}

impl Offer {
    /// The rewritten request as it would go to the origin.
    pub fn request(&self) -> &str {
        &self.request
    }

    /// Wave the request through unmodified.
    pub fn pass(self) {
        let _ = self.reply.send(Decision::Forward);
    }

    /// Substitute an edited request for the offered one.
    pub fn replace(self, edited: String) {
        let _ = self.reply.send(Decision::Replace(edited));
    }
}

/// Proxy-side handle publishing requests to the controller.
#[derive(Clone)]
pub struct InterceptGate {
    offers: mpsc::Sender<Offer>,
}

impl InterceptGate {
    /// Create a gate and the controller's offer stream.
    pub fn channel() -> (Self, mpsc::Receiver<Offer>) {
        let (offers, stream) = mpsc::channel(1);
        (Self { offers }, stream)
    }

    /// Publish `request` and block until the controller decides.
    ///
    /// Returns the bytes that actually go to the origin: the offered request
    /// itself on [`Decision::Forward`], the controller's replacement on
    /// [`Decision::Replace`]. A vanished controller (offer stream closed or
    /// reply dropped without deciding) aborts the exchange.
    pub async fn offer(&self, request: String) -> Result<String> {
        let (reply, verdict) = oneshot::channel();
        self.offers
            .send(Offer {
                request: request.clone(),
                reply,
            })
            .await
            .map_err(|_| ProxyError::ControllerClosed)?;

        match verdict.await {
            Ok(Decision::Forward) => Ok(request),
            Ok(Decision::Replace(edited)) => Ok(edited),
            Err(_) => Err(ProxyError::ControllerClosed),
        }
    }
}
