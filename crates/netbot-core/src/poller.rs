// ── Polling loop ──
//
// Strictly sequential: sleep, fetch the newest message, and if it carries
// the prefix, parse → dispatch → post. The next poll starts only after
// the reply has been posted. Messages are not deduplicated; the bot's own
// replies never carry the prefix, so a handled command is superseded as
// soon as the reply lands.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::chat::ChatRoom;
use crate::config::BotConfig;
use crate::dispatch::Dispatcher;
use crate::error::CoreError;
use crate::model::Reply;
use crate::session::Session;

pub struct Poller<R> {
    room: R,
    dispatcher: Dispatcher,
    prefix: String,
    interval: Duration,
}

impl<R: ChatRoom> Poller<R> {
    pub fn new(room: R, dispatcher: Dispatcher, prefix: impl Into<String>, interval: Duration) -> Self {
        Self {
            room,
            dispatcher,
            prefix: prefix.into(),
            interval,
        }
    }

    pub fn from_config(room: R, dispatcher: Dispatcher, config: &BotConfig) -> Self {
        Self::new(room, dispatcher, config.command_prefix(), config.poll_interval)
    }

    pub fn room(&self) -> &R {
        &self.room
    }

    /// Poll until cancelled or until the inbox fails.
    ///
    /// Inbox errors (non-success status, empty room) are returned; every
    /// per-command failure has already been posted to the room.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), CoreError> {
        let mut session = Session::new();
        info!(prefix = %self.prefix.trim_end(), interval = ?self.interval, "polling started");

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("polling stopped");
                    return Ok(());
                }
                () = tokio::time::sleep(self.interval) => {}
            }
            self.poll_once(&mut session).await?;
        }
    }

    /// One cycle without the sleep. Returns the reply if a command ran.
    pub async fn poll_once(&self, session: &mut Session) -> Result<Option<Reply>, CoreError> {
        let message = self.room.latest().await?.ok_or(CoreError::InboxEmpty)?;
        debug!(text = %message.text, "received message");

        let Some(command) = message.text.strip_prefix(self.prefix.as_str()) else {
            return Ok(None);
        };
        info!(command, "received command");

        let intent = self.dispatcher.parse(command);
        let reply = self.dispatcher.dispatch(intent, session).await;
        self.deliver(&reply).await;
        Ok(Some(reply))
    }

    async fn deliver(&self, reply: &Reply) {
        match reply {
            Reply::Text(text) => {
                if let Err(e) = self.room.send(text).await {
                    warn!(error = %e, "failed to post reply");
                }
            }
            Reply::Attachment { caption, path } => {
                if let Err(e) = self.room.send_file(caption, path).await {
                    warn!(error = %e, path = %path.display(), "failed to post attachment");
                    let fallback = CoreError::PlaybookFailed.to_string();
                    if let Err(e) = self.room.send(&fallback).await {
                        warn!(error = %e, "failed to post attachment failure notice");
                    }
                }
            }
        }
    }
}
