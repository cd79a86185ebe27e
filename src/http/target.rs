//! Origin address extraction and resolution.

use crate::util::{ProxyError, Result};
use std::io;
use std::net::SocketAddr;
use tokio::net::lookup_host;

/// Port appended when the authority names none.
const HTTP_PORT: &str = ":80";

/// Extract the `host:port` authority from a raw absolute-form request.
///
/// Works on the pre-rewrite request; after rewriting the target no longer
/// carries the authority. An authority without an explicit port gets the
/// default HTTP port appended.
pub fn remote_target(request: &str) -> Result<String> {
    let target = request
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ProxyError::MalformedRequest("missing request-target".into()))?;
    let authority = target.split('/').nth(2).ok_or_else(|| {
        ProxyError::MalformedRequest(format!("request-target {target:?} carries no authority"))
    })?;

    let mut authority = authority.to_string();
    if !authority.contains(':') {
        authority.push_str(HTTP_PORT);
    }
    Ok(authority)
}

/// Resolve the origin named by a raw request to a dialable socket address.
pub async fn resolve(request: &str) -> Result<SocketAddr> {
    let target = remote_target(request)?;
    let mut addrs = lookup_host(target.as_str())
        .await
        .map_err(|e| ProxyError::RemoteResolve(target.clone(), e))?;
    addrs.next().ok_or_else(|| {
        ProxyError::RemoteResolve(
            target.clone(),
            io::Error::new(io::ErrorKind::NotFound, "no addresses returned"),
        )
    })
}
