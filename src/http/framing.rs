//! HTTP message framing.
//!
//! A message's total length is only known once its headers have been read:
//! bytes accumulate one at a time until the `\r\n\r\n` delimiter, then the
//! body is exactly `Content-Length` bytes (zero when the field is absent).
//! Header and body buffers are unbounded, so a hostile peer can grow them
//! without limit; that is an accepted limitation of this proxy. Chunked
//! transfer-encoding is not supported.

use crate::util::{ProxyError, Result};
use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

/// End-of-headers marker.
const HEADER_DELIM: &[u8] = b"\r\n\r\n";
/// Body length field prefix, matched case-sensitively.
const CONTENT_LENGTH: &str = "Content-Length: ";

/// A complete HTTP message: header block (delimiter included) plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub head: Bytes,
    pub body: Bytes,
}

impl RawMessage {
    /// Concatenated wire form of the message.
    pub fn into_bytes(self) -> Bytes {
        if self.body.is_empty() {
            return self.head;
        }
        let mut buf = BytesMut::with_capacity(self.head.len() + self.body.len());
        buf.extend_from_slice(&self.head);
        buf.extend_from_slice(&self.body);
        buf.freeze()
    }

    /// Message as text, the form the controller channels carry.
    pub fn into_text(self) -> String {
        String::from_utf8_lossy(&self.into_bytes()).into_owned()
    }
}

/// Read one complete HTTP message off `reader`.
///
/// The header scan pulls single bytes; callers are expected to hand in a
/// buffered reader.
pub async fn read_message<R: AsyncRead + Unpin>(reader: &mut R) -> Result<RawMessage> {
    let head = read_header_block(reader).await?;
    let body_len = content_length(&String::from_utf8_lossy(&head))?;

    let mut body = vec![0u8; body_len];
    if body_len > 0 {
        reader
            .read_exact(&mut body)
            .await
            .map_err(ProxyError::Read)?;
    }

    Ok(RawMessage {
        head,
        body: Bytes::from(body),
    })
}

/// Accumulate bytes until the last four read equal the header delimiter.
async fn read_header_block<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Bytes> {
    let mut head = BytesMut::new();
    loop {
        let byte = reader.read_u8().await.map_err(ProxyError::Read)?;
        head.put_u8(byte);
        if head.len() > HEADER_DELIM.len() && head.ends_with(HEADER_DELIM) {
            return Ok(head.freeze());
        }
    }
}

/// Parse the body length out of a header block.
///
/// The field name is matched case-sensitively, the first occurrence wins,
/// and the value runs to the next CRLF. A missing field means a zero-length
/// body; a non-integer value is an error the caller decides on.
fn content_length(head: &str) -> Result<usize> {
    let Some((_, rest)) = head.split_once(CONTENT_LENGTH) else {
        return Ok(0);
    };
    let value = rest.split("\r\n").next().unwrap_or("");
    value
        .parse::<usize>()
        .map_err(|e| ProxyError::ContentLengthParse(value.to_string(), e))
}
