use std::io;
use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};

use crate::http::parser::ParseError;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::serialize_response;
use crate::routing::table::HandlerTable;

/// Resolves a parse outcome to response bytes.
///
/// Cloning is cheap; every connection gets its own copy of the frozen table
/// handle.
#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<HandlerTable>,
}

impl Dispatcher {
    pub fn new(table: Arc<HandlerTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &HandlerTable {
        &self.table
    }

    /// Produces the bytes to send back for one request.
    ///
    /// Malformed input gets a 400 and unknown routes a 404, both built here.
    /// Otherwise the registered handler's output is returned unchanged. An
    /// `Err` means the handler failed and nothing should be sent.
    pub fn dispatch(&self, parsed: &Result<Request, ParseError>) -> io::Result<Bytes> {
        let request = match parsed {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(reason = %e, "Malformed request");
                return Ok(Bytes::from(serialize_response(&Response::bad_request())));
            }
        };

        let Some(handler) = self.table.lookup(request.method, &request.path) else {
            tracing::info!(
                method = ?request.method,
                path = %request.path,
                "No handler registered"
            );
            return Ok(Bytes::from(serialize_response(&Response::not_found())));
        };

        let mut out = BytesMut::with_capacity(1024).writer();
        handler.handle(request, &mut out)?;
        let bytes = out.into_inner().freeze();

        tracing::debug!(
            method = ?request.method,
            path = %request.path,
            bytes = bytes.len(),
            "Request handled"
        );

        Ok(bytes)
    }
}
