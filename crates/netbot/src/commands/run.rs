//! `netbot run`: poll the room until Ctrl-C or a fatal inbox error.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use netbot_core::{Dispatcher, Poller, WebexRoom};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = super::load(global)?;
    let bot = netbot_config::to_bot_config(&cfg)?;

    let room = WebexRoom::from_settings(&bot.chat)?;
    let dispatcher = Dispatcher::from_config(&bot)?;
    let poller = Poller::from_config(room, dispatcher, &bot);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("interrupt received, shutting down"),
            Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
        }
        on_signal.cancel();
    });

    info!(
        prefix = %bot.command_prefix().trim_end(),
        devices = bot.allowlist.len(),
        "netbot started"
    );
    poller.run(cancel).await?;
    Ok(())
}
