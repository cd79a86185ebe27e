//! Network-related utilities (TCP tuning)

use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

const KEEPALIVE_TIME: Duration = Duration::from_secs(120);
const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// Enable low-latency options on a proxied TCP stream (best-effort).
pub fn configure_tcp_stream(stream: &TcpStream, role: &str) {
    if let Err(err) = stream.set_nodelay(true) {
        debug!(
            "[Net] Failed to enable TCP_NODELAY for {} connection: {}",
            role, err
        );
    }

    #[cfg(any(unix, windows))]
    {
        use socket2::{SockRef, TcpKeepalive};

        let keepalive = TcpKeepalive::new()
            .with_time(KEEPALIVE_TIME)
            .with_interval(KEEPALIVE_INTERVAL);

        if let Err(err) = SockRef::from(stream).set_tcp_keepalive(&keepalive) {
            debug!(
                "[Net] Failed to configure TCP keepalive for {} connection: {}",
                role, err
            );
        }
    }
}
