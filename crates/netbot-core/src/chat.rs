// ── Chat room abstraction ──
//
// The poller only needs the newest message and two ways to post. The
// Webex implementation maps every API failure onto `CoreError`.

use std::path::Path;

use async_trait::async_trait;
use netbot_api::{TransportConfig, WebexClient};
use tracing::debug;

use crate::config::ChatSettings;
use crate::error::CoreError;

/// One inbound chat message. Only the text matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
pub trait ChatRoom: Send + Sync {
    /// Newest message in the room, `None` when the room is empty.
    async fn latest(&self) -> Result<Option<Message>, CoreError>;

    async fn send(&self, text: &str) -> Result<(), CoreError>;

    async fn send_file(&self, caption: &str, path: &Path) -> Result<(), CoreError>;
}

/// A single Webex room.
pub struct WebexRoom {
    client: WebexClient,
    room_id: String,
}

impl WebexRoom {
    pub fn new(client: WebexClient, room_id: impl Into<String>) -> Self {
        Self {
            client,
            room_id: room_id.into(),
        }
    }

    pub fn from_settings(settings: &ChatSettings) -> Result<Self, CoreError> {
        let token = settings.token.as_ref().ok_or_else(|| CoreError::Config {
            message: "no chat access token configured".into(),
        })?;
        if settings.room_id.is_empty() {
            return Err(CoreError::Config {
                message: "no chat room id configured".into(),
            });
        }
        let client = WebexClient::new(&settings.api_base, token, &TransportConfig::default())
            .map_err(|e| CoreError::Config {
                message: e.to_string(),
            })?;
        Ok(Self::new(client, settings.room_id.clone()))
    }
}

#[async_trait]
impl ChatRoom for WebexRoom {
    async fn latest(&self) -> Result<Option<Message>, CoreError> {
        let message = self
            .client
            .latest_message(&self.room_id)
            .await
            .map_err(|e| CoreError::InboxUnavailable {
                message: e.to_string(),
            })?;
        Ok(message.map(|m| {
            debug!(id = %m.id, "fetched newest message");
            Message::new(m.text)
        }))
    }

    async fn send(&self, text: &str) -> Result<(), CoreError> {
        self.client
            .post_markdown(&self.room_id, text)
            .await
            .map_err(CoreError::from)
    }

    async fn send_file(&self, caption: &str, path: &Path) -> Result<(), CoreError> {
        self.client
            .post_file(&self.room_id, caption, path)
            .await
            .map_err(CoreError::from)
    }
}
