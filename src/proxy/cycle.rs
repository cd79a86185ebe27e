//! One client connection's full lifecycle.

use crate::http::{prepare_request, read_message, resolve};
use crate::intercept::InterceptGate;
use crate::util::{ProxyError, Result, configure_tcp_stream};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

/// Drive one accepted connection through the whole exchange: frame the
/// request, resolve the origin, rewrite, hold at the gate, dial, forward,
/// frame the response, publish it to the controller, relay it back.
///
/// Both connections drop closed on every exit path. On failure the client
/// gets no response at all; no error status is synthesized.
pub(crate) async fn run(
    lconn: TcpStream,
    gate: InterceptGate,
    responses: mpsc::Sender<String>,
) -> Result<()> {
    configure_tcp_stream(&lconn, "client");
    let (lconn_read, mut lconn_write) = lconn.into_split();
    let mut lconn_read = BufReader::new(lconn_read);

    let request = read_message(&mut lconn_read).await?.into_text();
    let raddr = resolve(&request).await?;
    let prepared = prepare_request(&request)?;

    let outgoing = gate.offer(prepared).await?;

    tracing::debug!("[Proxy] Dialing origin {}", raddr);
    let rconn = TcpStream::connect(raddr)
        .await
        .map_err(|e| ProxyError::Dial(raddr, e))?;
    configure_tcp_stream(&rconn, "origin");
    let (rconn_read, mut rconn_write) = rconn.into_split();
    rconn_write.write_all(outgoing.as_bytes()).await?;

    let mut rconn_read = BufReader::new(rconn_read);
    let response = read_message(&mut rconn_read).await?.into_bytes();
    drop(rconn_read);
    drop(rconn_write);

    // The controller sees the response before the client does; the send
    // blocks until the controller takes it.
    responses
        .send(String::from_utf8_lossy(&response).into_owned())
        .await
        .map_err(|_| ProxyError::ControllerClosed)?;

    lconn_write.write_all(&response).await?;
    lconn_write.shutdown().await?;
    Ok(())
}
