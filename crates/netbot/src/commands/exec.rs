//! `netbot exec`: dispatch one command without the chat room.

use tracing::debug;

use netbot_core::{Dispatcher, Reply, Session};

use crate::cli::{ExecArgs, GlobalOpts};
use crate::error::CliError;

pub async fn handle(args: ExecArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = super::load(global)?;
    let bot = netbot_config::to_bot_config(&cfg)?;
    let dispatcher = Dispatcher::from_config(&bot)?;

    let mut session = args.transport.map_or_else(Session::new, Session::with_transport);
    let text = args.command.join(" ");
    let intent = dispatcher.parse(&text);
    debug!(?intent, "parsed command");

    match dispatcher.dispatch(intent, &mut session).await {
        Reply::Text(text) => println!("{text}"),
        Reply::Attachment { caption, path } => println!("{caption}: {}", path.display()),
    }
    Ok(())
}
