//! Auction draft server - main binary.
//!
//! Wires the pieces together: loads the item catalog (with a built-in
//! fallback), spawns the room task that owns all auction state, and serves
//! the WebSocket/REST transport.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐   RoomInbound    ┌────────────────┐
//! │  Axum server   │ ───────────────► │   Room task    │
//! │  (WS + REST)   │                  │  (one loop)    │
//! │                │ ◄─────────────── │                │
//! └────────────────┘  ServerMessage   └────────────────┘
//! ```
//!
//! One process hosts exactly one room; restart the process for a fresh one.

mod config;

use clap::Parser;
use engine::Room;
use server::{create_app, RoomTask, ServerState};
use tokio::sync::mpsc;
use tracing::info;

pub use config::DraftConfig;

/// Auction draft server - blind-bid auction rooms over WebSocket
#[derive(Parser, Debug)]
#[command(name = "auction-draft")]
#[command(about = "A multiplayer blind-bid auction draft server")]
#[command(version)]
struct Args {
    /// Host to bind to
    #[arg(long, env = "DRAFT_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "DRAFT_PORT")]
    port: Option<u16>,

    /// Participants required to start the auction
    #[arg(long, env = "DRAFT_CAPACITY")]
    capacity: Option<usize>,

    /// Starting budget per participant
    #[arg(long, env = "DRAFT_BUDGET")]
    budget: Option<u64>,

    /// Bidding window length in seconds
    #[arg(long, env = "DRAFT_COUNTDOWN")]
    countdown: Option<u64>,

    /// Path to the item catalog file
    #[arg(long, env = "DRAFT_CATALOG")]
    catalog: Option<String>,
}

impl Args {
    /// Apply overrides on top of the defaults.
    fn into_config(self) -> DraftConfig {
        let mut cfg = DraftConfig::default();
        if let Some(host) = self.host {
            cfg.host = host;
        }
        if let Some(port) = self.port {
            cfg.port = port;
        }
        if let Some(capacity) = self.capacity {
            cfg.capacity = capacity;
        }
        if let Some(budget) = self.budget {
            cfg.initial_budget = budget;
        }
        if let Some(countdown) = self.countdown {
            cfg.countdown_secs = countdown;
        }
        if let Some(catalog) = self.catalog {
            cfg.catalog_path = catalog;
        }
        cfg
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cfg = Args::parse().into_config();
    info!(
        capacity = cfg.capacity,
        budget = cfg.initial_budget,
        countdown = cfg.countdown_secs,
        "starting auction draft server"
    );

    let catalog = catalog::load(&cfg.catalog_path);
    let room = Room::new(cfg.room_config(), catalog);

    // The room task is the only mutator of room state; everything else
    // talks to it through this queue.
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let task = RoomTask::new(room, inbound_tx.clone());
    let status = task.status_handle();
    tokio::spawn(task.run(inbound_rx));

    let state = ServerState::new(inbound_tx, status);
    let app = create_app(state);

    let addr = cfg.server_config().bind_addr();
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
