// Webex messages API client.
//
// Base path: https://webexapis.com/v1/
// Auth: `Authorization: Bearer <token>`

use std::path::Path;

use chrono::{DateTime, Utc};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Default public API root.
pub const DEFAULT_API_BASE: &str = "https://webexapis.com/v1";

/// One message as returned by `GET /messages`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    #[serde(default)]
    pub room_id: String,
    /// Plain-text rendering; absent for file-only posts.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub person_email: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct MessageList {
    #[serde(default)]
    items: Vec<ChatMessage>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewMessage<'a> {
    room_id: &'a str,
    markdown: &'a str,
}

/// Async client for the Webex messages endpoint.
pub struct WebexClient {
    http: reqwest::Client,
    base_url: Url,
}

impl WebexClient {
    /// Build from a bearer token and transport config.
    pub fn new(base_url: &str, token: &SecretString, transport: &TransportConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid access token header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
        })
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    fn messages_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join("messages")?)
    }

    /// Fetch the newest message in `room_id`. `Ok(None)` for an empty room.
    pub async fn latest_message(&self, room_id: &str) -> Result<Option<ChatMessage>, Error> {
        let url = self.messages_url()?;
        debug!("GET {url} roomId={room_id}");

        let resp = self
            .http
            .get(url)
            .query(&[("roomId", room_id), ("max", "1")])
            .send()
            .await?;
        let resp = Self::check(resp).await?;

        let body = resp.text().await?;
        let list: MessageList = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;
        Ok(list.items.into_iter().next())
    }

    /// Post a markdown message.
    pub async fn post_markdown(&self, room_id: &str, markdown: &str) -> Result<(), Error> {
        let url = self.messages_url()?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(&NewMessage { room_id, markdown })
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Post a message with one file attached (multipart upload).
    pub async fn post_file(&self, room_id: &str, text: &str, file: &Path) -> Result<(), Error> {
        let url = self.messages_url()?;
        debug!("POST {url} file={}", file.display());

        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map_or_else(|| "attachment.txt".to_owned(), |n| n.to_string_lossy().into_owned());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("text/plain")?;
        let form = Form::new()
            .text("roomId", room_id.to_owned())
            .text("text", text.to_owned())
            .part("files", part);

        let resp = self.http.post(url).multipart(form).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "Webex rejected the access token".into(),
            });
        }
        let raw = resp.text().await.unwrap_or_default();
        Err(Error::Chat {
            status: status.as_u16(),
            message: raw.chars().take(200).collect(),
        })
    }
}
