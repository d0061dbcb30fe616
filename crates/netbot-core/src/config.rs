// ── Runtime bot configuration ──
//
// Fully resolved settings handed in by the binary. Core never reads
// files or the environment; netbot-config builds this value.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::model::{Allowlist, LoopbackSpec};

/// Default Webex API root.
pub const DEFAULT_CHAT_API_BASE: &str = netbot_api::webex::DEFAULT_API_BASE;

/// Caption used when posting the running-config file.
pub const DEFAULT_ATTACHMENT_CAPTION: &str = "show running config";

/// TLS verification strategy for device HTTPS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Lab routers ship self-signed certificates.
    #[default]
    DangerAcceptInvalid,
}

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub api_base: String,
    pub room_id: String,
    /// `None` when no token could be resolved; polling then refuses to start.
    pub token: Option<SecretString>,
    pub attachment_caption: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_CHAT_API_BASE.into(),
            room_id: String::new(),
            token: None,
            attachment_caption: DEFAULT_ATTACHMENT_CAPTION.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeviceSettings {
    pub username: String,
    pub password: Option<SecretString>,
    pub tls: TlsVerification,
    pub timeout: Duration,
    pub netconf_port: u16,
    pub ssh_port: u16,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            username: "admin".into(),
            password: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            netconf_port: netbot_api::netconf::DEFAULT_PORT,
            ssh_port: 22,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlaybookSettings {
    pub program: PathBuf,
    pub inventory: PathBuf,
    pub showrun_playbook: PathBuf,
    pub motd_playbook: PathBuf,
    pub artifact_dir: PathBuf,
    pub timeout: Duration,
}

impl Default for PlaybookSettings {
    fn default() -> Self {
        Self {
            program: "ansible-playbook".into(),
            inventory: "hosts".into(),
            showrun_playbook: "showrun_playbook.yml".into(),
            motd_playbook: "motd_playbook.yml".into(),
            artifact_dir: ".".into(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Everything the dispatcher and poller need.
///
/// Built by the binary from the config file; core never touches disk.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub poll_interval: Duration,
    pub allowlist: Allowlist,
    /// Carries the student id used for the prefix and the interface name.
    pub loopback: LoopbackSpec,
    pub chat: ChatSettings,
    pub devices: DeviceSettings,
    pub playbook: PlaybookSettings,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            allowlist: Allowlist::default(),
            loopback: LoopbackSpec::default(),
            chat: ChatSettings::default(),
            devices: DeviceSettings::default(),
            playbook: PlaybookSettings::default(),
        }
    }
}

impl BotConfig {
    pub fn student_id(&self) -> &str {
        &self.loopback.student_id
    }

    /// Addressing prefix a message must start with, e.g. `/66070101 `.
    pub fn command_prefix(&self) -> String {
        format!("/{} ", self.student_id())
    }
}
