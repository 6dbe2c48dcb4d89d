use std::sync::Arc;

use wicket::config::Config;
use wicket::http::request::Method;
use wicket::http::response::Response;
use wicket::routing::{HandlerTable, handler_fn};
use wicket::server;
use wicket::static_files::register_static_files;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let mut table = HandlerTable::new();
    table.register(
        Method::GET,
        "/messages",
        handler_fn(|_req, out| Response::ok("text/plain", "Hello from GET /message").write_to(out)),
    );
    table.register(
        Method::POST,
        "/messages",
        handler_fn(|_req, out| Response::ok("text/plain", "Hello from POST /message").write_to(out)),
    );

    if let Some(static_cfg) = &cfg.static_files {
        register_static_files(&mut table, static_cfg)?;
    }

    let table = Arc::new(table);

    tokio::select! {
        res = server::listener::run(&cfg.server, table) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
