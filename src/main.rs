//! Ledge Hop level service entry point
//!
//! Serves stored level layouts over HTTP. The simulation itself is
//! library code (`ledge_hop::Session`) driven by whatever host embeds it.

use std::sync::Arc;

use tokio::sync::Mutex;

use ledge_hop::server::{self, AppState, LevelStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let port = std::env::var("LEDGE_HOP_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);

    // With no data path the level lives only as long as the process
    let store = match std::env::var("LEDGE_HOP_DATA") {
        Ok(path) => LevelStore::open(path)?,
        Err(_) => LevelStore::in_memory(),
    };
    log::info!("level store ready ({} platforms)", store.len());

    let state = Arc::new(AppState {
        store: Mutex::new(store),
    });
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    log::info!("level service listening on port {port}");
    axum::serve(listener, app).await?;

    Ok(())
}
