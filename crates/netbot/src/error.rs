//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use netbot_config::ConfigError;
use netbot_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Credentials ──────────────────────────────────────────────────
    #[error("No {what} configured")]
    #[diagnostic(
        code(netbot::no_credentials),
        help(
            "Store it with: netbot config set-secret {key}\n\
             Or set the {env} environment variable."
        )
    )]
    NoCredentials {
        what: String,
        key: String,
        env: String,
    },

    // ── Chat room ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(netbot::inbox),
        help("Check the room id, the access token, and that the room has at least one message.")
    )]
    Inbox { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(netbot::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(netbot::config),
        help("Create a config file with: netbot config init")
    )]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(code(netbot::core))]
    Core(CoreError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Inbox { .. } => exit_code::CONNECTION,
            Self::Validation { .. } | Self::Config(ConfigError::Validation { .. }) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InboxUnavailable { .. } | CoreError::InboxEmpty => Self::Inbox {
                message: err.to_string(),
            },
            CoreError::Config { message } if message.contains("token") => Self::NoCredentials {
                what: "chat access token".into(),
                key: "chat-token".into(),
                env: "WEBEX_ACCESS_TOKEN".into(),
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            other => Self::Core(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbox_errors_exit_as_connection_failures() {
        let err = CliError::from(CoreError::InboxEmpty);
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
        assert_eq!(err.to_string(), "There are no messages in the room.");
    }

    #[test]
    fn missing_token_exits_as_auth_failure() {
        let err = CliError::from(CoreError::Config {
            message: "no chat access token configured".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn missing_room_is_a_usage_error() {
        let err = CliError::from(CoreError::Config {
            message: "no chat room id configured".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
