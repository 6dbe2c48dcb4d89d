//! HTTP protocol implementation.
//!
//! This module implements the subset of HTTP/1.1 the server speaks: one
//! request per connection, GET and POST only, `Connection: close` always.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine (read, parse, dispatch, write, close)
//! - **`parser`**: Turns the bytes of a single read into a `Request` or a `ParseError`
//! - **`request`**: HTTP request representation and parameter multimaps
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes responses and writes them to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One bounded read
//!        └──────┬──────┘
//!               │ bytes received (0 bytes → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │     Parsed       │ ← Ok(Request) or Err(ParseError)
//!        └──────┬───────────┘
//!               │ 400 / 404 / handler output
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatched     │ ← Write + flush
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wicket::http::connection::Connection;
//! use wicket::routing::{Dispatcher, HandlerTable};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let dispatcher = Dispatcher::new(Arc::new(HandlerTable::new()));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let conn = Connection::new(socket, dispatcher.clone(), 4096);
//!         tokio::spawn(async move {
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
