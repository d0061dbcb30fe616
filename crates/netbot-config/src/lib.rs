//! Configuration for the netbot binary.
//!
//! TOML file + `NETBOT_*` environment, credential resolution (env var →
//! keyring → plaintext), and translation to `netbot_core::BotConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

use netbot_core::config::{DEFAULT_ATTACHMENT_CAPTION, DEFAULT_CHAT_API_BASE};
use netbot_core::model::address::DEFAULT_ADDRESSES;
use netbot_core::{
    Allowlist, BotConfig, ChatSettings, DeviceSettings, LoopbackSpec, PlaybookSettings,
    TlsVerification,
};

/// Keyring service name for stored secrets.
pub const KEYRING_SERVICE: &str = "netbot";

/// Keyring user for the chat access token.
pub const CHAT_TOKEN_KEY: &str = "chat-token";

/// Keyring user for the device password.
pub const DEVICE_PASSWORD_KEY: &str = "device-password";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Addressing prefix (`/<id> `) and loopback naming.
    #[serde(default = "default_student_id", deserialize_with = "lenient::string")]
    pub student_id: String,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub devices: DevicesConfig,

    #[serde(default)]
    pub interface: InterfaceConfig,

    #[serde(default)]
    pub playbook: PlaybookConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            student_id: default_student_id(),
            poll_interval_secs: default_poll_interval(),
            chat: ChatConfig::default(),
            devices: DevicesConfig::default(),
            interface: InterfaceConfig::default(),
            playbook: PlaybookConfig::default(),
        }
    }
}

fn default_student_id() -> String {
    LoopbackSpec::default().student_id
}
fn default_poll_interval() -> u64 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Room to poll and post to.
    pub room_id: Option<String>,

    /// Access token (plaintext; prefer keyring or env var).
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub token: Option<String>,

    /// Environment variable name containing the access token.
    #[serde(default = "default_token_env")]
    pub token_env: Option<String>,

    #[serde(default = "default_caption")]
    pub attachment_caption: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            room_id: None,
            token: None,
            token_env: default_token_env(),
            attachment_caption: default_caption(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_CHAT_API_BASE.into()
}
#[allow(clippy::unnecessary_wraps)]
fn default_token_env() -> Option<String> {
    Some("WEBEX_ACCESS_TOKEN".into())
}
fn default_caption() -> String {
    DEFAULT_ATTACHMENT_CAPTION.into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DevicesConfig {
    #[serde(default = "default_allowlist")]
    pub allowlist: Vec<String>,

    #[serde(default = "default_username")]
    pub username: String,

    /// Device password (plaintext; prefer keyring or env var).
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub password: Option<String>,

    /// Environment variable name containing the device password.
    pub password_env: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Accept self-signed RESTCONF certificates. Defaults to true when
    /// no `ca_cert` is given.
    pub insecure: Option<bool>,

    /// Path to a custom CA certificate for RESTCONF.
    pub ca_cert: Option<PathBuf>,

    #[serde(default = "default_netconf_port")]
    pub netconf_port: u16,

    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            allowlist: default_allowlist(),
            username: default_username(),
            password: None,
            password_env: None,
            timeout_secs: default_timeout(),
            insecure: None,
            ca_cert: None,
            netconf_port: default_netconf_port(),
            ssh_port: default_ssh_port(),
        }
    }
}

fn default_allowlist() -> Vec<String> {
    DEFAULT_ADDRESSES.iter().map(|a| (*a).to_owned()).collect()
}
fn default_username() -> String {
    "admin".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_netconf_port() -> u16 {
    830
}
fn default_ssh_port() -> u16 {
    22
}

/// Loopback addressing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InterfaceConfig {
    #[serde(default = "default_ipv4_address")]
    pub ipv4_address: String,

    #[serde(default = "default_ipv4_netmask")]
    pub ipv4_netmask: String,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            ipv4_address: default_ipv4_address(),
            ipv4_netmask: default_ipv4_netmask(),
        }
    }
}

fn default_ipv4_address() -> String {
    LoopbackSpec::default().ipv4_address
}
fn default_ipv4_netmask() -> String {
    LoopbackSpec::default().ipv4_netmask
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybookConfig {
    #[serde(default = "default_program")]
    pub program: PathBuf,

    #[serde(default = "default_inventory")]
    pub inventory: PathBuf,

    #[serde(default = "default_showrun_playbook")]
    pub showrun_playbook: PathBuf,

    #[serde(default = "default_motd_playbook")]
    pub motd_playbook: PathBuf,

    /// Where show-running artifacts are written.
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,

    #[serde(default = "default_playbook_timeout")]
    pub timeout_secs: u64,
}

impl Default for PlaybookConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            inventory: default_inventory(),
            showrun_playbook: default_showrun_playbook(),
            motd_playbook: default_motd_playbook(),
            artifact_dir: default_artifact_dir(),
            timeout_secs: default_playbook_timeout(),
        }
    }
}

fn default_program() -> PathBuf {
    PlaybookSettings::default().program
}
fn default_inventory() -> PathBuf {
    PlaybookSettings::default().inventory
}
fn default_showrun_playbook() -> PathBuf {
    PlaybookSettings::default().showrun_playbook
}
fn default_motd_playbook() -> PathBuf {
    PlaybookSettings::default().motd_playbook
}
fn default_artifact_dir() -> PathBuf {
    PlaybookSettings::default().artifact_dir
}
fn default_playbook_timeout() -> u64 {
    PlaybookSettings::default().timeout.as_secs()
}

/// Environment values such as `NETBOT_STUDENT_ID=66070101` arrive as
/// numbers; accept them where a string is expected.
mod lenient {
    use super::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    impl From<Scalar> for String {
        fn from(s: Scalar) -> Self {
            match s {
                Scalar::Text(t) => t,
                Scalar::Unsigned(n) => n.to_string(),
                Scalar::Signed(n) => n.to_string(),
            }
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Scalar::deserialize(d).map(String::from)
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Option::<Scalar>::deserialize(d).map(|s| s.map(String::from))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "netbot", "netbot").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netbot");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETBOT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// First hit of: named env var, keyring entry, plaintext value.
pub fn resolve_secret(
    env_name: Option<&str>,
    keyring_user: &str,
    plaintext: Option<&str>,
) -> Option<SecretString> {
    // 1. Env var
    if let Some(val) = env_name.and_then(|name| std::env::var(name).ok()) {
        return Some(SecretString::from(val));
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, keyring_user) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    plaintext.map(|p| SecretString::from(p.to_owned()))
}

/// Store a secret in the system keyring.
pub fn store_secret(keyring_user: &str, value: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, keyring_user)?.set_password(value)?;
    Ok(())
}

pub fn resolve_chat_token(cfg: &Config) -> Option<SecretString> {
    resolve_secret(
        cfg.chat.token_env.as_deref(),
        CHAT_TOKEN_KEY,
        cfg.chat.token.as_deref(),
    )
}

pub fn resolve_device_password(cfg: &Config) -> Option<SecretString> {
    resolve_secret(
        cfg.devices.password_env.as_deref(),
        DEVICE_PASSWORD_KEY,
        cfg.devices.password.as_deref(),
    )
}

// ── Translation to core ─────────────────────────────────────────────

/// Validate and resolve secrets into a `BotConfig`.
pub fn to_bot_config(cfg: &Config) -> Result<BotConfig, ConfigError> {
    if cfg.student_id.trim().is_empty() || cfg.student_id.contains(char::is_whitespace) {
        return Err(ConfigError::Validation {
            field: "student_id".into(),
            reason: format!("must be a single non-empty token, got '{}'", cfg.student_id),
        });
    }
    if cfg.poll_interval_secs == 0 {
        return Err(ConfigError::Validation {
            field: "poll_interval_secs".into(),
            reason: "must be at least 1".into(),
        });
    }
    if cfg.devices.allowlist.is_empty() {
        return Err(ConfigError::Validation {
            field: "devices.allowlist".into(),
            reason: "at least one device address is required".into(),
        });
    }

    let devices = &cfg.devices;
    let tls = match (devices.insecure, &devices.ca_cert) {
        (Some(true), _) | (None, None) => TlsVerification::DangerAcceptInvalid,
        (_, Some(ca_path)) => TlsVerification::CustomCa(ca_path.clone()),
        (Some(false), None) => TlsVerification::SystemDefaults,
    };

    let pb = &cfg.playbook;
    Ok(BotConfig {
        poll_interval: Duration::from_secs(cfg.poll_interval_secs),
        allowlist: Allowlist::new(devices.allowlist.iter().cloned()),
        loopback: LoopbackSpec {
            student_id: cfg.student_id.clone(),
            ipv4_address: cfg.interface.ipv4_address.clone(),
            ipv4_netmask: cfg.interface.ipv4_netmask.clone(),
        },
        chat: ChatSettings {
            api_base: cfg.chat.api_base.clone(),
            room_id: cfg.chat.room_id.clone().unwrap_or_default(),
            token: resolve_chat_token(cfg),
            attachment_caption: cfg.chat.attachment_caption.clone(),
        },
        devices: DeviceSettings {
            username: devices.username.clone(),
            password: resolve_device_password(cfg),
            tls,
            timeout: Duration::from_secs(devices.timeout_secs),
            netconf_port: devices.netconf_port,
            ssh_port: devices.ssh_port,
        },
        playbook: PlaybookSettings {
            program: pb.program.clone(),
            inventory: pb.inventory.clone(),
            showrun_playbook: pb.showrun_playbook.clone(),
            motd_playbook: pb.motd_playbook.clone(),
            artifact_dir: pb.artifact_dir.clone(),
            timeout: Duration::from_secs(pb.timeout_secs),
        },
    })
}
