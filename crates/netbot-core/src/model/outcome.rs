use std::path::PathBuf;

use crate::error::CoreError;

/// Result of one adapter operation.
///
/// Adapters never return `Err` for device-side conditions; a refused
/// create and a missing interface are ordinary outcomes with their own text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = String> {
    /// The operation did what was asked; payload is the reply text or artifact.
    Success(T),
    /// The resource was already in the requested state.
    Conflict(String),
    /// The resource does not exist.
    NotFound(String),
    /// The tool ran but reported failure; the text is final.
    Failed(String),
    /// The transport failed before a device answer could be interpreted.
    Fault { kind: String, detail: String },
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Conflict(text) => Outcome::Conflict(text),
            Self::NotFound(text) => Outcome::NotFound(text),
            Self::Failed(text) => Outcome::Failed(text),
            Self::Fault { kind, detail } => Outcome::Fault { kind, detail },
        }
    }
}

impl Outcome<String> {
    /// Collapse into the text posted back to the room.
    pub fn into_text(self) -> String {
        match self {
            Self::Success(text) | Self::NotFound(text) | Self::Failed(text) => text,
            Self::Conflict(text) => CoreError::ResourceStateConflict(text).to_string(),
            Self::Fault { kind, detail } => CoreError::TransportFault { kind, detail }.to_string(),
        }
    }
}

impl<T> From<netbot_api::Error> for Outcome<T> {
    fn from(err: netbot_api::Error) -> Self {
        Self::Fault {
            kind: err.kind().to_owned(),
            detail: err.to_string(),
        }
    }
}

/// What the bot sends back for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain markdown post.
    Text(String),
    /// A file post with a caption.
    Attachment { caption: String, path: PathBuf },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Attachment { .. } => None,
        }
    }
}

impl From<CoreError> for Reply {
    fn from(err: CoreError) -> Self {
        Self::Text(err.to_string())
    }
}
