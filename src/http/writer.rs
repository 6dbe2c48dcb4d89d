use bytes::{Buf, Bytes};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(&resp.body);

    buf
}

/// Pending response bytes for one connection.
pub struct ResponseWriter {
    buffer: Bytes,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self::from_bytes(Bytes::from(serialize_response(response)))
    }

    /// Wraps bytes a handler already produced.
    pub fn from_bytes(buffer: Bytes) -> Self {
        Self { buffer }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.remaining()
    }

    /// Writes everything still pending, then flushes the stream.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.buffer.has_remaining() {
            let n = stream.write(self.buffer.chunk()).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.buffer.advance(n);
        }

        stream.flush().await?;
        Ok(())
    }
}
