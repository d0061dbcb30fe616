use thiserror::Error;

/// Top-level error type for the `netbot-api` crate.
///
/// Covers every failure mode across the wire clients: HTTP (RESTCONF and
/// Webex), SSH sessions (NETCONF and interactive exec), and the playbook
/// process. `netbot-core` folds these into a single transport-fault result.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Device or chat API rejected the credentials.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request or session timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// SSH connection, channel, or protocol failure.
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    // ── Protocol ────────────────────────────────────────────────────
    /// Unexpected HTTP status from a RESTCONF endpoint.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// `<rpc-error>` returned by a NETCONF server.
    #[error("NETCONF rpc-error: {message}")]
    Netconf { message: String },

    /// Reply could not be parsed as XML or lacked an expected element.
    #[error("Malformed XML reply: {0}")]
    Xml(String),

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Playbook ────────────────────────────────────────────────────
    /// The playbook process failed to start or did not report success.
    #[error("Playbook failed: {message}")]
    Playbook { message: String },

    // ── Chat ────────────────────────────────────────────────────────
    /// Non-success reply from the messages API.
    #[error("Chat API error (HTTP {status}): {message}")]
    Chat { status: u16, message: String },

    // ── Local ───────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable short name for the failure class.
    ///
    /// Used as the `<kind>` in `Error: <kind>: <detail>` chat replies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "AuthenticationError",
            Self::Transport(e) if e.is_timeout() => "Timeout",
            Self::Transport(e) if e.is_connect() => "ConnectionError",
            Self::Transport(_) => "TransportError",
            Self::InvalidUrl(_) => "InvalidUrl",
            Self::Timeout { .. } => "Timeout",
            Self::Tls(_) => "TlsError",
            Self::Ssh(_) => "SshError",
            Self::Http { .. } => "HttpError",
            Self::Netconf { .. } => "RpcError",
            Self::Xml(_) => "MalformedReply",
            Self::Deserialization { .. } => "DeserializationError",
            Self::Playbook { .. } => "PlaybookError",
            Self::Chat { .. } => "ChatApiError",
            Self::Io(_) => "IoError",
        }
    }
}
