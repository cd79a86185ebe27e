//! Common test utilities and helpers

use interpose_rs::intercept::{InterceptGate, Offer};
use interpose_rs::proxy::{Proxy, ProxyConfig, ServeMode};
use interpose_rs::util::ProxyError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Reserve an ephemeral port.
#[allow(dead_code)]
pub fn available_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .expect("bind ephemeral port")
        .local_addr()
        .expect("get local addr")
        .port()
}

/// A running proxy plus the controller side of its channels.
#[allow(dead_code)]
pub struct ProxyHarness {
    pub addr: String,
    pub offers: mpsc::Receiver<Offer>,
    pub responses: mpsc::Receiver<String>,
    pub errors: mpsc::Receiver<ProxyError>,
}

impl ProxyHarness {
    /// Service the handshake without ever intercepting: pass every offer
    /// through and drain published responses. Returns the proxy address and
    /// the error stream.
    #[allow(dead_code)]
    pub fn auto_pass(self) -> (String, mpsc::Receiver<ProxyError>) {
        let ProxyHarness {
            addr,
            mut offers,
            mut responses,
            errors,
        } = self;
        tokio::spawn(async move {
            while let Some(offer) = offers.recv().await {
                offer.pass();
            }
        });
        tokio::spawn(async move { while responses.recv().await.is_some() {} });
        (addr, errors)
    }
}

/// Spawn a proxy on an ephemeral port and hand back the controller channels.
#[allow(dead_code)]
pub fn spawn_proxy(mode: ServeMode) -> ProxyHarness {
    let addr = format!("127.0.0.1:{}", available_port());
    let (gate, offers) = InterceptGate::channel();
    let (response_tx, responses) = mpsc::channel(1);
    let (error_tx, errors) = mpsc::channel(16);

    let config = ProxyConfig {
        listen_addr: addr.clone(),
        mode,
    };
    let proxy = Proxy::new(config, gate, response_tx, error_tx);
    tokio::spawn(async move {
        if let Err(e) = proxy.listen().await {
            tracing::error!("[Test] Proxy error: {}", e);
        }
    });

    ProxyHarness {
        addr,
        offers,
        responses,
        errors,
    }
}

/// Spawn an origin stub that serves one connection: it reads a full request
/// (headers plus any Content-Length body), answers with `response`, and
/// yields the request bytes it saw.
#[allow(dead_code)]
pub async fn spawn_origin_stub(
    response: &'static [u8],
) -> anyhow::Result<(std::net::SocketAddr, JoinHandle<Vec<u8>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        let (mut socket, _peer) = listener.accept().await.expect("origin accept");
        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.expect("origin read");
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
            if request_complete(&received) {
                break;
            }
        }
        socket.write_all(response).await.expect("origin write");
        let _ = socket.shutdown().await;
        received
    });

    Ok((addr, handle))
}

/// True once `received` holds a header block and its announced body.
#[allow(dead_code)]
fn request_complete(received: &[u8]) -> bool {
    let Some(head_end) = received
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| pos + 4)
    else {
        return false;
    };
    let head = String::from_utf8_lossy(&received[..head_end]);
    let body_len = head
        .split_once("Content-Length: ")
        .and_then(|(_, rest)| rest.split("\r\n").next())
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(0);
    received.len() >= head_end + body_len
}
