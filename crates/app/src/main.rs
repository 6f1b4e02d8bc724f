//! Quorum - local planning poker and project triangle sessions
//!
//! A terminal front for the session store: one cached identity, one live
//! room, story voting, and the project triangle board.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod identity;
mod shell;
mod state;
mod view;

use quorum_core::RoomCode;

#[derive(Debug, Parser)]
#[command(
    name = "quorum",
    version,
    about = "Planning poker and project triangle sessions"
)]
struct Args {
    /// Room code to surface as a join hint (joining stays explicit)
    #[arg(long)]
    room: Option<String>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Quorum");

    let args = Args::parse();

    // Mirrors the share-link hook: the supplied code is read and shown as a
    // hint, never auto-joined.
    let room_hint = args
        .room
        .as_deref()
        .and_then(|code| match RoomCode::parse(code) {
            Ok(code) => Some(code),
            Err(e) => {
                tracing::warn!("Ignoring room argument: {e}");
                None
            }
        });

    let app = match state::AppState::new() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = shell::run(&app, room_hint) {
        tracing::error!("Shell error: {e}");
        std::process::exit(1);
    }
}
