// RESTCONF client for the `ietf-interfaces` data tree.
//
// One resource path per interface:
//   {scheme}://{host}/restconf/data/ietf-interfaces:interfaces/interface={name}
// GET reads state, PUT creates, PATCH merges `enabled`, DELETE removes.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::auth::DeviceCredentials;
use crate::error::Error;
use crate::transport::TransportConfig;

const YANG_JSON: &str = "application/yang-data+json";

// ── Payload types ────────────────────────────────────────────────────

/// `ietf-interfaces:interface` entry, as read from or written to the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceConfig {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub if_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "ietf-ip:ipv4", skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Ipv4Config>,
    /// Only present when the device mixes operational leaves into the reply.
    #[serde(rename = "oper-status", skip_serializing_if = "Option::is_none")]
    pub oper_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4Config {
    #[serde(default)]
    pub address: Vec<Ipv4Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4Address {
    pub ip: String,
    pub netmask: String,
}

/// Devices answer a keyed GET either with the bare entry or with a
/// one-element list; both shapes are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

#[derive(Deserialize)]
struct InterfaceReply {
    #[serde(rename = "ietf-interfaces:interface")]
    interface: OneOrMany<InterfaceConfig>,
}

#[derive(Serialize)]
struct InterfaceBody<'a, T: Serialize> {
    #[serde(rename = "ietf-interfaces:interface")]
    interface: &'a T,
}

#[derive(Serialize)]
struct EnabledPatch<'a> {
    name: &'a str,
    enabled: bool,
}

/// What a PUT did to the target resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutDisposition {
    /// `201 Created`: the resource did not exist before.
    Created,
    /// Any other 2xx: an existing resource was replaced.
    Replaced,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async RESTCONF client. Holds no per-device state; the target host is
/// passed to every call.
pub struct RestconfClient {
    http: reqwest::Client,
    scheme: String,
    credentials: DeviceCredentials,
}

impl RestconfClient {
    /// Build an HTTPS client from a transport config.
    ///
    /// Pins `Accept` and `Content-Type` to the YANG JSON media type.
    pub fn new(credentials: DeviceCredentials, transport: &TransportConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(YANG_JSON));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(YANG_JSON));
        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            scheme: "https".into(),
            credentials,
        })
    }

    /// Wrap an existing `reqwest::Client` with an explicit URL scheme.
    ///
    /// Tests use this with `"http"` against a mock server.
    pub fn with_client(
        http: reqwest::Client,
        scheme: impl Into<String>,
        credentials: DeviceCredentials,
    ) -> Self {
        Self {
            http,
            scheme: scheme.into(),
            credentials,
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn interface_url(&self, host: &str, name: &str) -> Result<Url, Error> {
        let raw = format!(
            "{}://{host}/restconf/data/ietf-interfaces:interfaces/interface={name}",
            self.scheme
        );
        Ok(Url::parse(&raw)?)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .basic_auth(
                &self.credentials.username,
                Some(self.credentials.password.expose_secret()),
            )
            .header(ACCEPT, YANG_JSON)
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Read the interface entry. `Ok(None)` when the device answers 404.
    pub async fn get_interface(
        &self,
        host: &str,
        name: &str,
    ) -> Result<Option<InterfaceConfig>, Error> {
        let url = self.interface_url(host, name)?;
        debug!("GET {url}");

        let resp = self.authed(self.http.get(url)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let reply: InterfaceReply = self.handle_response(resp).await?;
        let entry = match reply.interface {
            OneOrMany::One(entry) => Some(entry),
            OneOrMany::Many(list) => list.into_iter().next(),
        };
        Ok(entry)
    }

    /// Create (or replace) the interface with a full-entry PUT.
    pub async fn put_interface(
        &self,
        host: &str,
        interface: &InterfaceConfig,
    ) -> Result<PutDisposition, Error> {
        let url = self.interface_url(host, &interface.name)?;
        debug!("PUT {url}");

        let body = InterfaceBody { interface };
        let resp = self
            .authed(self.http.put(url))
            .header(CONTENT_TYPE, YANG_JSON)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        self.handle_empty(resp).await?;
        Ok(if status == StatusCode::CREATED {
            PutDisposition::Created
        } else {
            PutDisposition::Replaced
        })
    }

    /// Merge a new `enabled` leaf into the interface.
    pub async fn set_enabled(&self, host: &str, name: &str, enabled: bool) -> Result<(), Error> {
        let url = self.interface_url(host, name)?;
        debug!("PATCH {url} enabled={enabled}");

        let patch = EnabledPatch { name, enabled };
        let body = InterfaceBody { interface: &patch };
        let resp = self
            .authed(self.http.patch(url))
            .header(CONTENT_TYPE, YANG_JSON)
            .json(&body)
            .send()
            .await?;
        self.handle_empty(resp).await
    }

    /// Delete the interface. `Ok(false)` when it was already absent.
    pub async fn delete_interface(&self, host: &str, name: &str) -> Result<bool, Error> {
        let url = self.interface_url(host, name)?;
        debug!("DELETE {url}");

        let resp = self.authed(self.http.delete(url)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        self.handle_empty(resp).await?;
        Ok(true)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        if status == StatusCode::UNAUTHORIZED {
            return Error::Authentication {
                message: "device rejected RESTCONF credentials".into(),
            };
        }
        let raw = resp.text().await.unwrap_or_default();
        Error::Http {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                raw.chars().take(200).collect()
            },
        }
    }
}
