// ── Dispatcher ──
//
// Intent + session → one reply. Address validation always comes first,
// then (for interface operations) the transport selection check, then
// exactly one adapter call. Nothing here returns `Err` to the caller.

use std::sync::Arc;

use netbot_api::{
    DeviceCredentials, NetconfClient, PlaybookCommand, RestconfClient, SshClient, TlsMode,
    TransportConfig,
};
use secrecy::SecretString;
use tracing::{info, warn};

use crate::adapter::{
    AnsibleAdapter, DeviceShell, InterfaceBackend, NetconfAdapter, PlaybookRunner,
    RestconfAdapter, ShellAdapter,
};
use crate::config::{BotConfig, DEFAULT_ATTACHMENT_CAPTION, TlsVerification};
use crate::error::CoreError;
use crate::model::{
    Allowlist, InterfaceAction, Intent, Outcome, ParseError, Reply, TransportKind,
};
use crate::parser;
use crate::session::Session;

/// The adapters a dispatcher routes to.
pub struct Backends {
    pub restconf: Arc<dyn InterfaceBackend>,
    pub netconf: Arc<dyn InterfaceBackend>,
    pub runner: Arc<dyn PlaybookRunner>,
    pub shell: Arc<dyn DeviceShell>,
}

impl Backends {
    /// Build the real wire-backed adapters.
    pub fn from_config(config: &BotConfig) -> Result<Self, CoreError> {
        let devices = &config.devices;
        let password = devices.password.clone().unwrap_or_else(|| {
            warn!("no device password configured; device logins will likely fail");
            SecretString::from(String::new())
        });
        let credentials = DeviceCredentials::new(devices.username.clone(), password);

        let transport = TransportConfig {
            tls: match &devices.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: devices.timeout,
        };
        let restconf = RestconfClient::new(credentials.clone(), &transport)
            .map_err(|e| CoreError::Config {
                message: e.to_string(),
            })?;
        let netconf = NetconfClient::new(credentials.clone(), devices.netconf_port, devices.timeout);
        let ssh = SshClient::new(credentials, devices.ssh_port, devices.timeout);

        let pb = &config.playbook;
        let runner = AnsibleAdapter::new(
            PlaybookCommand::new(&pb.program, &pb.inventory, pb.timeout),
            &pb.showrun_playbook,
            &pb.motd_playbook,
            &pb.artifact_dir,
            config.student_id(),
        );

        Ok(Self {
            restconf: Arc::new(RestconfAdapter::new(restconf, config.loopback.clone())),
            netconf: Arc::new(NetconfAdapter::new(netconf, config.loopback.clone())),
            runner: Arc::new(runner),
            shell: Arc::new(ShellAdapter::new(ssh)),
        })
    }

    fn interface(&self, kind: TransportKind) -> &dyn InterfaceBackend {
        match kind {
            TransportKind::Restconf => self.restconf.as_ref(),
            TransportKind::Netconf => self.netconf.as_ref(),
        }
    }
}

pub struct Dispatcher {
    allowlist: Allowlist,
    backends: Backends,
    caption: String,
}

impl Dispatcher {
    pub fn new(allowlist: Allowlist, backends: Backends) -> Self {
        Self {
            allowlist,
            backends,
            caption: DEFAULT_ATTACHMENT_CAPTION.into(),
        }
    }

    pub fn from_config(config: &BotConfig) -> Result<Self, CoreError> {
        let backends = Backends::from_config(config)?;
        Ok(Self::new(config.allowlist.clone(), backends)
            .with_caption(config.chat.attachment_caption.clone()))
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    pub fn parse(&self, text: &str) -> Intent {
        parser::parse(text, &self.allowlist)
    }

    /// Run one intent. Every branch yields a reply.
    pub async fn dispatch(&self, intent: Intent, session: &mut Session) -> Reply {
        info!(?intent, selected = ?session.selected(), "dispatching");
        self.try_dispatch(intent, session)
            .await
            .unwrap_or_else(Reply::from)
    }

    async fn try_dispatch(&self, intent: Intent, session: &mut Session) -> Result<Reply, CoreError> {
        match intent {
            Intent::SelectTransport { transport } => {
                session.select(transport);
                Ok(Reply::Text(format!("Ok: {}", transport.label())))
            }

            Intent::Interface { address, action } => {
                let address = self.allowlist.check(address.as_deref())?;
                let kind = session.selected().ok_or(CoreError::TransportNotSelected)?;
                let outcome = self.backends.interface(kind).run(action, &address).await;
                Ok(Reply::Text(render_interface(outcome, action, kind)))
            }

            Intent::GigabitStatus { address } => {
                let address = self.allowlist.check(address.as_deref())?;
                let outcome = self.backends.shell.gigabit_status(&address).await;
                Ok(Reply::Text(outcome.into_text()))
            }

            Intent::ShowRunning { address } => {
                let address = self.allowlist.check(address.as_deref())?;
                Ok(match self.backends.runner.show_running(&address).await {
                    Outcome::Success(path) => Reply::Attachment {
                        caption: self.caption.clone(),
                        path,
                    },
                    other => Reply::Text(other.map(|p| p.display().to_string()).into_text()),
                })
            }

            Intent::BannerSet { address, text } => {
                let address = self.allowlist.check(Some(&address))?;
                let banner = unescape_banner(&text);
                let outcome = self.backends.runner.banner_set(&address, &banner).await;
                Ok(Reply::Text(outcome.into_text()))
            }

            Intent::BannerGet { address } => {
                let address = self.allowlist.check(Some(&address))?;
                let outcome = self.backends.shell.banner_get(&address).await;
                Ok(Reply::Text(outcome.into_text()))
            }

            Intent::Invalid { error } => Err(match error {
                ParseError::NoCommandFound => CoreError::NoCommandFound,
                ParseError::Empty | ParseError::Unknown => CoreError::UnknownCommand,
            }),
        }
    }
}

/// Faults pass through untouched; every other outcome gets the
/// transport suffix.
fn render_interface(outcome: Outcome, action: InterfaceAction, kind: TransportKind) -> String {
    let suffixed = !matches!(outcome, Outcome::Fault { .. });
    let text = outcome.into_text();
    if suffixed {
        apply_suffix(text, action, kind)
    } else {
        text
    }
}

/// Append ` (checked by X)` to status results and ` using X` to the rest,
/// unless the text already carries the marker.
pub fn apply_suffix(text: String, action: InterfaceAction, kind: TransportKind) -> String {
    let label = kind.label();
    match action {
        InterfaceAction::Status if !text.contains("(checked by") => {
            format!("{text} (checked by {label})")
        }
        InterfaceAction::Status => text,
        _ if !text.contains("using ") => format!("{text} using {label}"),
        _ => text,
    }
}

/// Chat clients send a typed `\n` as two characters; the device wants a
/// real line break.
pub fn unescape_banner(text: &str) -> String {
    text.replace("\\n", "\n")
}
