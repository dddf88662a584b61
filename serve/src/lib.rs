//! REST server for the kgraph store (axum).
//!
//! Listens on http://127.0.0.1:8080 by default and exposes the store to
//! external pipelines and presentation layers: health, snapshot, text
//! exports, activity stats, tool list/call, and reset. The store is built
//! once at startup and injected through router state; nothing here is a
//! process-global.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`].

mod app;
mod error;

use tokio::net::TcpListener;
use tracing::info;

use app::{router, AppState, ServeConfig};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Runs the server on an existing listener. Used by tests (bind to
/// 127.0.0.1:0 then pass the listener).
pub async fn run_serve_on_listener(
    listener: TcpListener,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    let config = ServeConfig::from_env();
    info!(%addr, max_label_len = config.max_label_len, "kgraph server listening");

    let state = AppState::new(&config);
    let app = router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Runs the server. Listens on `addr` when given, else `KGRAPH_SERVE_ADDR`,
/// else 127.0.0.1:8080.
pub async fn run_serve(
    addr: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = match addr {
        Some(a) => a.to_string(),
        None => std::env::var("KGRAPH_SERVE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),
    };
    let listener = TcpListener::bind(&addr).await?;
    run_serve_on_listener(listener).await
}
