use anyhow::Context;
use axum::Router;
use axum::routing::get;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use marquee_server::{
    AppState, ConnectionManager, FileScreenDirectory, RoomRegistry, StatusFanout,
    screen_ws_handler, signaling_ws_handler, status_ws_handler,
};

#[derive(Parser)]
#[command(name = "marquee-server", about = "Display fleet control and signaling relay")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8000")]
    listen: SocketAddr,

    /// Path to the screens directory file.
    #[arg(long, default_value = "screens.json")]
    screens: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let directory = Arc::new(
        FileScreenDirectory::load(&args.screens)
            .with_context(|| format!("loading screens from {}", args.screens.display()))?,
    );
    let fanout = Arc::new(StatusFanout::new());
    let manager = Arc::new(ConnectionManager::new(directory, Arc::clone(&fanout)));
    let rooms = Arc::new(RoomRegistry::new());

    let state = AppState {
        manager,
        fanout,
        rooms,
    };

    let app = Router::new()
        .route("/ws/{screen_id}", get(screen_ws_handler))
        .route("/ws-screen-status", get(status_ws_handler))
        .route("/ws/signaling/{room_id}", get(signaling_ws_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("binding {}", args.listen))?;
    info!("marquee server listening on http://{}", args.listen);

    axum::serve(listener, app).await?;
    Ok(())
}
