use thiserror::Error;

/// Proxy errors
///
/// `ListenerResolve` and `ListenerBind` are fatal to the whole process.
/// Everything else is scoped to a single proxied exchange: it is reported on
/// the error channel, the exchange aborts, and the accept loop keeps serving.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("failed to resolve listen address {0}: {1}")]
    ListenerResolve(String, #[source] std::io::Error),

    #[error("failed to bind listener on {0}: {1}")]
    ListenerBind(String, #[source] std::io::Error),

    #[error("accept failed: {0}")]
    Accept(#[source] std::io::Error),

    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("invalid Content-Length value {0:?}: {1}")]
    ContentLengthParse(String, #[source] std::num::ParseIntError),

    #[error("malformed request line: {0}")]
    MalformedRequest(String),

    #[error("failed to resolve origin {0}: {1}")]
    RemoteResolve(String, #[source] std::io::Error),

    #[error("failed to dial origin {0}: {1}")]
    Dial(std::net::SocketAddr, #[source] std::io::Error),

    #[error("intercept controller is gone")]
    ControllerClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ProxyError>;
