// ── Loopback resource ──
//
// One loopback per device, named after the student id. Every adapter
// builds its result texts through `LoopbackSpec` so the four transports
// answer with the same words.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::intent::InterfaceAction;

/// What to create and how to talk about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopbackSpec {
    pub student_id: String,
    pub ipv4_address: String,
    pub ipv4_netmask: String,
}

impl Default for LoopbackSpec {
    fn default() -> Self {
        Self {
            student_id: "66070101".into(),
            ipv4_address: "172.1.1.1".into(),
            ipv4_netmask: "255.255.255.0".into(),
        }
    }
}

impl LoopbackSpec {
    pub fn new(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            ..Self::default()
        }
    }

    /// Device-side interface name, e.g. `Loopback66070101`.
    pub fn name(&self) -> String {
        format!("Loopback{}", self.student_id)
    }

    pub fn description(&self) -> String {
        format!("Created by {}", self.student_id)
    }

    /// Human name used in every reply, e.g. `Interface loopback 66070101`.
    pub fn label(&self) -> String {
        format!("Interface loopback {}", self.student_id)
    }

    // ── Result texts ─────────────────────────────────────────────────

    pub fn success_text(&self, action: InterfaceAction) -> String {
        let verb = match action {
            InterfaceAction::Create => "created",
            InterfaceAction::Delete => "deleted",
            InterfaceAction::Enable => "enabled",
            InterfaceAction::Disable => "shutdowned",
            InterfaceAction::Status => "checked",
        };
        format!("{} is {verb} successfully", self.label())
    }

    pub fn conflict_text(&self, action: InterfaceAction) -> String {
        let verb = match action {
            InterfaceAction::Create => "create",
            InterfaceAction::Delete => "delete",
            InterfaceAction::Enable => "enable",
            InterfaceAction::Disable => "shutdown",
            InterfaceAction::Status => "read status",
        };
        format!("Cannot {verb}: {}", self.label())
    }

    /// Text for an action whose target does not exist.
    ///
    /// A missing interface on delete reads the same as any other failed delete.
    pub fn not_found_text(&self, action: InterfaceAction) -> String {
        match action {
            InterfaceAction::Status => format!("No {}", self.label()),
            InterfaceAction::Enable | InterfaceAction::Disable => {
                format!("Cannot {action}: {} not found", self.label())
            }
            InterfaceAction::Create | InterfaceAction::Delete => self.conflict_text(action),
        }
    }

    pub fn state_text(&self, state: InterfaceState) -> String {
        format!("{} is {state}", self.label())
    }
}

// ── Status reduction ─────────────────────────────────────────────────

/// One side of an admin/oper status pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkState {
    Up,
    Down,
    Unknown,
}

impl LinkState {
    /// Admin state from a configured `enabled` leaf.
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Up } else { Self::Down }
    }

    /// Parse an `admin-status` / `oper-status` value.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "up" => Self::Up,
            "down" | "lower-layer-down" => Self::Down,
            _ => Self::Unknown,
        }
    }
}

/// Reduced state of an existing interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceState {
    Enabled,
    Disabled,
}

impl fmt::Display for InterfaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        })
    }
}

/// Collapse an (admin, oper) pair into enabled/disabled.
///
/// Either side being down wins unless admin is up and oper unknown.
#[allow(clippy::match_same_arms)]
pub fn reduce_status(admin: LinkState, oper: LinkState) -> InterfaceState {
    use LinkState::{Down, Unknown, Up};

    match (admin, oper) {
        (Up, Up | Unknown) => InterfaceState::Enabled,
        (Down, Down | Unknown) => InterfaceState::Disabled,
        (Down, _) | (_, Down) => InterfaceState::Disabled,
        _ => InterfaceState::Enabled,
    }
}
