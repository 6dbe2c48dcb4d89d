//! TCP accept loop and connection pool.

pub mod listener;
