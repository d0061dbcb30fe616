// ── Core error types ──
//
// The Display string of every user-facing variant is exactly the text the
// bot posts back to the room. Wire-level failures from netbot-api never
// reach the room raw; `From<netbot_api::Error>` folds them into
// `TransportFault`, rendered as `Error: <kind>: <detail>`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Addressing ───────────────────────────────────────────────────
    #[error("Error: No IP specified")]
    AddressMissing,

    #[error("Error: IP not allowed ({address})")]
    AddressNotAllowed { address: String },

    // ── Command errors ───────────────────────────────────────────────
    #[error("Error: No method specified")]
    TransportNotSelected,

    #[error("Error: No command or unknown command")]
    UnknownCommand,

    /// A bare allowlisted address with no command after it.
    #[error("Error: No command found.")]
    NoCommandFound,

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Error: {kind}: {detail}")]
    TransportFault { kind: String, detail: String },

    /// Idempotency violation; carries the adapter's text verbatim.
    #[error("{0}")]
    ResourceStateConflict(String),

    /// The playbook ran but did not report a clean recap.
    #[error("Error: Ansible")]
    PlaybookFailed,

    #[error("Error: No MOTD Configured")]
    BannerNotConfigured,

    // ── Orchestration errors ─────────────────────────────────────────
    #[error("Incorrect reply from the messages API: {message}")]
    InboxUnavailable { message: String },

    #[error("There are no messages in the room.")]
    InboxEmpty,

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// True for errors that stop the polling loop.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InboxUnavailable { .. } | Self::InboxEmpty | Self::Config { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<netbot_api::Error> for CoreError {
    fn from(err: netbot_api::Error) -> Self {
        CoreError::TransportFault {
            kind: err.kind().to_owned(),
            detail: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_texts_are_exact() {
        assert_eq!(CoreError::AddressMissing.to_string(), "Error: No IP specified");
        assert_eq!(
            CoreError::AddressNotAllowed {
                address: "10.0.0.1".into()
            }
            .to_string(),
            "Error: IP not allowed (10.0.0.1)"
        );
        assert_eq!(
            CoreError::TransportNotSelected.to_string(),
            "Error: No method specified"
        );
        assert_eq!(
            CoreError::UnknownCommand.to_string(),
            "Error: No command or unknown command"
        );
        assert_eq!(CoreError::NoCommandFound.to_string(), "Error: No command found.");
    }

    #[test]
    fn api_errors_become_transport_faults() {
        let err: CoreError = netbot_api::Error::Timeout { timeout_secs: 10 }.into();
        assert_eq!(
            err.to_string(),
            "Error: Timeout: Request timed out after 10s"
        );
        assert!(!err.is_fatal());
        assert!(CoreError::InboxEmpty.is_fatal());
    }
}
