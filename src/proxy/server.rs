//! Proxy server: listener setup and the accept loop.

use crate::intercept::InterceptGate;
use crate::proxy::cycle;
use crate::util::{ProxyError, Result};
use std::io;
use tokio::net::{TcpListener, lookup_host};
use tokio::sync::mpsc;
use tracing::{Instrument, info_span};

/// Address bound when the configured one is empty.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// How accepted connections are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServeMode {
    /// One exchange at a time; the next accept waits for the current cycle
    /// to finish or abort.
    #[default]
    Sequential,
    /// One spawned task per accepted connection.
    PerConnection,
}

/// Proxy configuration, passed at construction.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Local listen address; an empty string selects [`DEFAULT_LISTEN_ADDR`].
    pub listen_addr: String,
    pub mode: ServeMode,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            mode: ServeMode::default(),
        }
    }
}

impl ProxyConfig {
    fn effective_listen_addr(&self) -> &str {
        if self.listen_addr.is_empty() {
            DEFAULT_LISTEN_ADDR
        } else {
            &self.listen_addr
        }
    }
}

/// The proxy server. Owns the proxy side of every controller channel.
pub struct Proxy {
    config: ProxyConfig,
    gate: InterceptGate,
    responses: mpsc::Sender<String>,
    errors: mpsc::Sender<ProxyError>,
}

impl Proxy {
    /// Create a new proxy
    pub fn new(
        config: ProxyConfig,
        gate: InterceptGate,
        responses: mpsc::Sender<String>,
        errors: mpsc::Sender<ProxyError>,
    ) -> Self {
        Self {
            config,
            gate,
            responses,
            errors,
        }
    }

    /// Bind the configured address and serve until the process ends.
    ///
    /// Listener resolution and bind failures are returned and are fatal.
    /// Every later failure is scoped to one exchange: reported on the error
    /// channel, the failing client closed without a response, and the loop
    /// keeps accepting.
    pub async fn listen(&self) -> Result<()> {
        let addr = self.config.effective_listen_addr();
        let laddr = lookup_host(addr)
            .await
            .map_err(|e| ProxyError::ListenerResolve(addr.to_string(), e))?
            .next()
            .ok_or_else(|| {
                ProxyError::ListenerResolve(
                    addr.to_string(),
                    io::Error::new(io::ErrorKind::NotFound, "no addresses returned"),
                )
            })?;
        let listener = TcpListener::bind(laddr)
            .await
            .map_err(|e| ProxyError::ListenerBind(laddr.to_string(), e))?;

        tracing::info!("[Proxy] Listening on {}", laddr);

        loop {
            let (lconn, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    self.report(ProxyError::Accept(e)).await;
                    continue;
                }
            };
            tracing::debug!("[Proxy] New connection from {}", peer);

            let span = info_span!("proxy.cycle", peer_addr = %peer);
            match self.config.mode {
                ServeMode::Sequential => {
                    let result = cycle::run(lconn, self.gate.clone(), self.responses.clone())
                        .instrument(span)
                        .await;
                    if let Err(e) = result {
                        self.report(e).await;
                    }
                }
                ServeMode::PerConnection => {
                    let gate = self.gate.clone();
                    let responses = self.responses.clone();
                    let errors = self.errors.clone();
                    tokio::spawn(
                        async move {
                            if let Err(e) = cycle::run(lconn, gate, responses).await {
                                tracing::error!("[Proxy] {}", e);
                                let _ = errors.send(e).await;
                            }
                        }
                        .instrument(span),
                    );
                }
            }
        }
    }

    async fn report(&self, err: ProxyError) {
        tracing::error!("[Proxy] {}", err);
        let _ = self.errors.send(err).await;
    }
}
