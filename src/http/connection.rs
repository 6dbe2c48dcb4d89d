use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};

use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::routing::Dispatcher;

/// Default size of the single read a connection performs.
pub const DEFAULT_READ_BUFFER: usize = 4096;

/// Serves exactly one request over an accepted stream, then closes it.
pub struct Connection<S> {
    stream: BufWriter<S>,
    dispatcher: Dispatcher,
    read_buffer_size: usize,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Parsed(Result<Request, ParseError>),
    Dispatched(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, dispatcher: Dispatcher, read_buffer_size: usize) -> Self {
        Self {
            stream: BufWriter::new(stream),
            dispatcher,
            read_buffer_size,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to `Closed`.
    ///
    /// The stream is shut down on success and dropped on every error path,
    /// so the socket is always released.
    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Some(parsed) => ConnectionState::Parsed(parsed),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Parsed(parsed) => {
                    let dispatcher = self.dispatcher.clone();
                    // Handlers may block on file I/O.
                    let bytes = tokio::task::spawn_blocking(move || dispatcher.dispatch(&parsed))
                        .await
                        .context("handler panicked")?
                        .context("handler failed to write response")?;

                    self.state = ConnectionState::Dispatched(ResponseWriter::from_bytes(bytes));
                }

                ConnectionState::Dispatched(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }
                    break;
                }
            }
        }

        Ok(())
    }

    /// Performs the single bounded read and parses whatever arrived.
    ///
    /// Returns `None` when the peer closed without sending anything.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Result<Request, ParseError>>> {
        let mut buffer = vec![0u8; self.read_buffer_size];
        let n = self
            .stream
            .read(&mut buffer)
            .await
            .context("failed to read request")?;

        if n == 0 {
            tracing::debug!("Client closed connection before sending a request");
            return Ok(None);
        }

        Ok(Some(parse_http_request(&buffer[..n])))
    }
}
