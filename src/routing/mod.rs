//! Method/path routing.
//!
//! - **`handler`**: the `Handler` capability and the closure adapter
//! - **`table`**: the two-level method → path → handler table
//! - **`dispatcher`**: picks a handler for a parsed request, or answers
//!   400/404 itself

pub mod dispatcher;
pub mod handler;
pub mod table;

pub use dispatcher::Dispatcher;
pub use handler::{Handler, handler_fn};
pub use table::HandlerTable;
