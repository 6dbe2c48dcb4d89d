//! Wicket - minimal HTTP/1.1 server
//!
//! Core library: request parsing, the method/path handler table,
//! dispatch and the per-connection lifecycle.

pub mod config;
pub mod http;
pub mod routing;
pub mod server;
pub mod static_files;
