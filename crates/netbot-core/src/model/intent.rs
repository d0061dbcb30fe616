use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Session-selectable protocol for interface operations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransportKind {
    Restconf,
    Netconf,
}

impl TransportKind {
    /// Name used in confirmations and result suffixes.
    pub fn label(self) -> &'static str {
        match self {
            Self::Restconf => "Restconf",
            Self::Netconf => "Netconf",
        }
    }
}

/// Operations on the loopback resource.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InterfaceAction {
    Create,
    Delete,
    Enable,
    Disable,
    Status,
}

/// Why a command text produced no runnable intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseError {
    /// Nothing but whitespace after the prefix.
    Empty,
    /// A lone allowlisted address.
    NoCommandFound,
    /// No grammar rule matched.
    Unknown,
}

/// A parsed command.
///
/// Address fields hold the raw token; the dispatcher validates them
/// against the allowlist before any adapter runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    SelectTransport {
        transport: TransportKind,
    },
    Interface {
        address: Option<String>,
        action: InterfaceAction,
    },
    GigabitStatus {
        address: Option<String>,
    },
    ShowRunning {
        address: Option<String>,
    },
    BannerSet {
        address: String,
        text: String,
    },
    BannerGet {
        address: String,
    },
    Invalid {
        error: ParseError,
    },
}

impl Intent {
    /// Raw address token, if the intent carries one.
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Interface { address, .. }
            | Self::GigabitStatus { address }
            | Self::ShowRunning { address } => address.as_deref(),
            Self::BannerSet { address, .. } | Self::BannerGet { address } => Some(address),
            Self::SelectTransport { .. } | Self::Invalid { .. } => None,
        }
    }
}
