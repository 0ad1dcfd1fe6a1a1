//! TvOsd entrypoint so the IPC client, session, and dispatch loop start as one runtime.
//!
//! Connects to a running mpv's JSON IPC socket, registers the toggle key, and
//! then drains player events on a single dispatch path until the menu quits
//! the player or the connection drops.

mod cli;

use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use tvosd::init_tracing;
use tvosd::osd::OsdBackend;
use tvosd::player::ipc::MpvClient;
use tvosd::player::Player;
use tvosd::session::{Flow, Session};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.logs);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tvosd starting");

    let client = Rc::new(MpvClient::connect(&cli.socket)?);
    let player: Rc<dyn Player> = client.clone();
    let osd: Rc<dyn OsdBackend> = client.clone();
    let mut session = Session::new(
        player,
        osd,
        &cli.toggle_key,
        cli.settings_path(),
        cli.config_path(),
    )?;

    while let Some(event) = client.next_event() {
        if session.handle_event(event) == Flow::Quit {
            break;
        }
    }

    tracing::info!("tvosd exiting");
    Ok(())
}
