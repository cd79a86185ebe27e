//! Proxy-form to origin-form request rewriting.
//!
//! Clients speaking to a forward proxy send absolute-form request lines
//! (`GET http://host:port/path HTTP/1.1`) and a `Proxy-Connection` header.
//! Origins expect neither. The rewrite operates on the whole message as one
//! string with fixed token positions: the header rename is a literal
//! substring replacement (a body containing `Proxy-Connection: ` is renamed
//! too), and unusual spacing shifts the token indices. That matches the
//! proxy convention this rewrite targets and is not guarded against.

use crate::util::{ProxyError, Result};

/// Slash-delimited segments preceding the path in an absolute-form target.
const URI_START: usize = 3;
/// Position of the request-target among space-delimited message tokens.
const URI_POS: usize = 1;

/// Strip proxy-specific addressing from a raw request.
///
/// Renames `Proxy-Connection` to `Connection` and folds the absolute-form
/// request-target down to its origin-relative path. Applying this to a
/// request whose target is already origin-relative mis-slices the target;
/// callers only feed it proxy-form requests.
pub fn prepare_request(request: &str) -> Result<String> {
    let request = request.replace("Proxy-Connection: ", "Connection: ");

    let target = request
        .split_whitespace()
        .nth(URI_POS)
        .ok_or_else(|| ProxyError::MalformedRequest("missing request-target".into()))?;
    let segments: Vec<&str> = target.split('/').collect();
    if segments.len() < URI_START {
        return Err(ProxyError::MalformedRequest(format!(
            "request-target {target:?} is not absolute-form"
        )));
    }
    let uri = format!("/{}", segments[URI_START..].join("/"));

    let mut tokens: Vec<&str> = request.split(' ').collect();
    if tokens.len() <= URI_POS {
        return Err(ProxyError::MalformedRequest(
            "request-target is not space-delimited".into(),
        ));
    }
    tokens[URI_POS] = uri.as_str();
    Ok(tokens.join(" "))
}
