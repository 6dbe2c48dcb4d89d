use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{Instrument, info};

use crate::config::ServerConfig;
use crate::http::connection::Connection;
use crate::routing::{Dispatcher, HandlerTable};

/// Binds `cfg.listen_addr` and serves connections until the process exits.
pub async fn run(cfg: &ServerConfig, table: Arc<HandlerTable>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!(
        address = %cfg.listen_addr,
        max_connections = cfg.max_connections,
        routes = table.len(),
        "Listening"
    );

    serve(listener, table, cfg).await
}

/// Accept loop over an already bound listener.
///
/// A permit is taken before each accept, so at most `max_connections`
/// connections are in flight; further clients wait in the backlog. A failed
/// accept is logged and the loop carries on.
pub async fn serve(
    listener: TcpListener,
    table: Arc<HandlerTable>,
    cfg: &ServerConfig,
) -> anyhow::Result<()> {
    let limit = Arc::new(Semaphore::new(cfg.max_connections));
    let dispatcher = Dispatcher::new(table);

    loop {
        let permit = limit
            .clone()
            .acquire_owned()
            .await
            .context("connection limit closed")?;

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        tracing::debug!(
            peer = %peer,
            available = limit.available_permits(),
            "Accepted connection"
        );

        let conn = Connection::new(socket, dispatcher.clone(), cfg.read_buffer_size);
        tokio::spawn(
            async move {
                let _permit = permit;
                if let Err(e) = conn.run().await {
                    tracing::error!(error = %format!("{:#}", e), "Connection error");
                }
            }
            .instrument(tracing::info_span!("connection", %peer)),
        );
    }
}
