use std::io::{self, Write};

use crate::http::request::Request;

/// Turns a parsed request into response bytes.
///
/// Implementations must write a complete HTTP response (status line,
/// headers, blank line, body) to `out`. The server never inspects what a
/// handler does beyond that. Handlers may block; they run on the blocking
/// thread pool.
pub trait Handler: Send + Sync {
    fn handle(&self, request: &Request, out: &mut dyn Write) -> io::Result<()>;
}

/// Adapter produced by [`handler_fn`].
pub struct FnHandler<F>(F);

impl<F> Handler for FnHandler<F>
where
    F: Fn(&Request, &mut dyn Write) -> io::Result<()> + Send + Sync,
{
    fn handle(&self, request: &Request, out: &mut dyn Write) -> io::Result<()> {
        (self.0)(request, out)
    }
}

/// Wraps a closure as a [`Handler`].
///
/// ```
/// # use wicket::routing::handler_fn;
/// # use wicket::http::response::Response;
/// let hello = handler_fn(|_req, out| Response::ok("text/plain", "hi").write_to(out));
/// ```
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&Request, &mut dyn Write) -> io::Result<()> + Send + Sync,
{
    FnHandler(f)
}
