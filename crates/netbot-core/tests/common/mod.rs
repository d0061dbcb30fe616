#![allow(dead_code, clippy::unwrap_used)]
// In-memory adapters and chat room shared by the integration tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use netbot_core::{
    Allowlist, Backends, ChatRoom, CoreError, DeviceAddress, DeviceShell, Dispatcher,
    InterfaceAction, InterfaceBackend, InterfaceState, LoopbackSpec, Message, Outcome,
    PlaybookRunner, TransportKind,
};

// ── Call log ────────────────────────────────────────────────────────

/// Every adapter call as `"<adapter>.<op> <address>"`.
#[derive(Default)]
pub struct CallLog(Mutex<Vec<String>>);

impl CallLog {
    pub fn record(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

// ── Interface backends ──────────────────────────────────────────────

/// A device with one loopback slot: `None` absent, `Some(enabled)` present.
pub struct SimulatedInterface {
    kind: TransportKind,
    loopback: LoopbackSpec,
    state: Mutex<Option<bool>>,
    log: Arc<CallLog>,
}

impl SimulatedInterface {
    pub fn new(kind: TransportKind, log: Arc<CallLog>) -> Self {
        Self {
            kind,
            loopback: LoopbackSpec::default(),
            state: Mutex::new(None),
            log,
        }
    }

    fn record(&self, op: InterfaceAction, address: &DeviceAddress) {
        self.log.record(format!("{}.{op} {address}", self.kind));
    }

    fn set_enabled(&self, address: &DeviceAddress, enabled: bool) -> Outcome {
        let action = if enabled {
            InterfaceAction::Enable
        } else {
            InterfaceAction::Disable
        };
        self.record(action, address);
        let mut state = self.state.lock().unwrap();
        match *state {
            None => Outcome::NotFound(self.loopback.not_found_text(action)),
            Some(current) if current == enabled => {
                Outcome::Conflict(self.loopback.conflict_text(action))
            }
            Some(_) => {
                *state = Some(enabled);
                Outcome::Success(self.loopback.success_text(action))
            }
        }
    }
}

#[async_trait]
impl InterfaceBackend for SimulatedInterface {
    fn kind(&self) -> TransportKind {
        self.kind
    }

    async fn create(&self, address: &DeviceAddress) -> Outcome {
        self.record(InterfaceAction::Create, address);
        let mut state = self.state.lock().unwrap();
        if state.is_some() {
            return Outcome::Conflict(self.loopback.conflict_text(InterfaceAction::Create));
        }
        *state = Some(true);
        Outcome::Success(self.loopback.success_text(InterfaceAction::Create))
    }

    async fn delete(&self, address: &DeviceAddress) -> Outcome {
        self.record(InterfaceAction::Delete, address);
        let mut state = self.state.lock().unwrap();
        if state.take().is_none() {
            return Outcome::Conflict(self.loopback.conflict_text(InterfaceAction::Delete));
        }
        Outcome::Success(self.loopback.success_text(InterfaceAction::Delete))
    }

    async fn enable(&self, address: &DeviceAddress) -> Outcome {
        self.set_enabled(address, true)
    }

    async fn disable(&self, address: &DeviceAddress) -> Outcome {
        self.set_enabled(address, false)
    }

    async fn status(&self, address: &DeviceAddress) -> Outcome {
        self.record(InterfaceAction::Status, address);
        match *self.state.lock().unwrap() {
            None => Outcome::NotFound(self.loopback.not_found_text(InterfaceAction::Status)),
            Some(enabled) => Outcome::Success(self.loopback.state_text(if enabled {
                InterfaceState::Enabled
            } else {
                InterfaceState::Disabled
            })),
        }
    }
}

/// Answers every operation with the same outcome.
pub struct CannedInterface {
    kind: TransportKind,
    outcome: Outcome,
    log: Arc<CallLog>,
}

impl CannedInterface {
    pub fn new(kind: TransportKind, outcome: Outcome, log: Arc<CallLog>) -> Self {
        Self { kind, outcome, log }
    }

    fn answer(&self, op: &str, address: &DeviceAddress) -> Outcome {
        self.log.record(format!("{}.{op} {address}", self.kind));
        self.outcome.clone()
    }
}

#[async_trait]
impl InterfaceBackend for CannedInterface {
    fn kind(&self) -> TransportKind {
        self.kind
    }

    async fn create(&self, address: &DeviceAddress) -> Outcome {
        self.answer("create", address)
    }

    async fn delete(&self, address: &DeviceAddress) -> Outcome {
        self.answer("delete", address)
    }

    async fn enable(&self, address: &DeviceAddress) -> Outcome {
        self.answer("enable", address)
    }

    async fn disable(&self, address: &DeviceAddress) -> Outcome {
        self.answer("disable", address)
    }

    async fn status(&self, address: &DeviceAddress) -> Outcome {
        self.answer("status", address)
    }
}

// ── Runner and shell ────────────────────────────────────────────────

pub struct FakeRunner {
    /// `Some` to succeed with this file, `None` to report a failed run.
    pub artifact: Option<PathBuf>,
    pub banners: Mutex<Vec<String>>,
    log: Arc<CallLog>,
}

impl FakeRunner {
    pub fn new(artifact: Option<PathBuf>, log: Arc<CallLog>) -> Self {
        Self {
            artifact,
            banners: Mutex::new(Vec::new()),
            log,
        }
    }
}

#[async_trait]
impl PlaybookRunner for FakeRunner {
    async fn show_running(&self, address: &DeviceAddress) -> Outcome<PathBuf> {
        self.log.record(format!("runner.show_running {address}"));
        match &self.artifact {
            Some(path) => Outcome::Success(path.clone()),
            None => Outcome::Failed(CoreError::PlaybookFailed.to_string()),
        }
    }

    async fn banner_set(&self, address: &DeviceAddress, text: &str) -> Outcome {
        self.log.record(format!("runner.banner_set {address}"));
        self.banners.lock().unwrap().push(text.to_owned());
        Outcome::Success("Ok: success".into())
    }
}

pub struct FakeShell {
    pub banner: Option<String>,
    log: Arc<CallLog>,
}

impl FakeShell {
    pub fn new(banner: Option<String>, log: Arc<CallLog>) -> Self {
        Self { banner, log }
    }
}

#[async_trait]
impl DeviceShell for FakeShell {
    async fn gigabit_status(&self, address: &DeviceAddress) -> Outcome {
        self.log.record(format!("shell.gigabit_status {address}"));
        Outcome::Success(
            "GigabitEthernet1 up, GigabitEthernet2 down -> 1 up, 1 down, 0 administratively down"
                .into(),
        )
    }

    async fn banner_get(&self, address: &DeviceAddress) -> Outcome {
        self.log.record(format!("shell.banner_get {address}"));
        match &self.banner {
            Some(text) => Outcome::Success(text.clone()),
            None => Outcome::NotFound(CoreError::BannerNotConfigured.to_string()),
        }
    }
}

// ── Assembly ────────────────────────────────────────────────────────

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub log: Arc<CallLog>,
    pub runner: Arc<FakeRunner>,
}

/// Dispatcher over simulated devices on the default allowlist.
pub fn harness(artifact: Option<PathBuf>, banner: Option<&str>) -> Harness {
    let log = Arc::new(CallLog::default());
    let runner = Arc::new(FakeRunner::new(artifact, Arc::clone(&log)));
    let backends = Backends {
        restconf: Arc::new(SimulatedInterface::new(TransportKind::Restconf, Arc::clone(&log))),
        netconf: Arc::new(SimulatedInterface::new(TransportKind::Netconf, Arc::clone(&log))),
        runner: Arc::clone(&runner) as Arc<dyn PlaybookRunner>,
        shell: Arc::new(FakeShell::new(banner.map(str::to_owned), Arc::clone(&log))),
    };
    Harness {
        dispatcher: Dispatcher::new(Allowlist::default(), backends),
        log,
        runner,
    }
}

// ── Chat room ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Posted {
    Text(String),
    File { caption: String, path: PathBuf },
}

/// Scripted inbox plus a record of everything posted.
#[derive(Default)]
pub struct FakeRoom {
    inbox: Mutex<VecDeque<Result<Option<Message>, CoreError>>>,
    posted: Mutex<Vec<Posted>>,
    pub fail_files: bool,
    pub fail_text: bool,
}

impl FakeRoom {
    pub fn with_messages<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let room = Self::default();
        for text in texts {
            room.push(Ok(Some(Message::new(text))));
        }
        room
    }

    pub fn push(&self, next: Result<Option<Message>, CoreError>) {
        self.inbox.lock().unwrap().push_back(next);
    }

    pub fn posted(&self) -> Vec<Posted> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatRoom for FakeRoom {
    async fn latest(&self) -> Result<Option<Message>, CoreError> {
        self.inbox.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }

    async fn send(&self, text: &str) -> Result<(), CoreError> {
        if self.fail_text {
            return Err(CoreError::TransportFault {
                kind: "ChatApiError".into(),
                detail: "HTTP 500".into(),
            });
        }
        self.posted.lock().unwrap().push(Posted::Text(text.to_owned()));
        Ok(())
    }

    async fn send_file(&self, caption: &str, path: &Path) -> Result<(), CoreError> {
        if self.fail_files {
            return Err(CoreError::TransportFault {
                kind: "ChatApiError".into(),
                detail: "HTTP 413".into(),
            });
        }
        self.posted.lock().unwrap().push(Posted::File {
            caption: caption.to_owned(),
            path: path.to_path_buf(),
        });
        Ok(())
    }
}
