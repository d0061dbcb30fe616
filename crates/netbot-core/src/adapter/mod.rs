// ── Transport adapters ──
//
// Each adapter turns one wire client into the shared operation contract.
// Adapters take an already-validated `DeviceAddress`, and every failure
// comes back as an `Outcome`, never as `Err`.

pub mod brief;
pub mod netconf;
pub mod playbook;
pub mod restconf;
pub mod shell;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::model::{DeviceAddress, InterfaceAction, Outcome, TransportKind};

pub use netconf::NetconfAdapter;
pub use playbook::AnsibleAdapter;
pub use restconf::RestconfAdapter;
pub use shell::ShellAdapter;

/// Loopback lifecycle over a session-selectable transport.
#[async_trait]
pub trait InterfaceBackend: Send + Sync {
    fn kind(&self) -> TransportKind;

    /// Fails with a conflict if the loopback already exists.
    async fn create(&self, address: &DeviceAddress) -> Outcome;

    /// Fails with a conflict if the loopback is absent.
    async fn delete(&self, address: &DeviceAddress) -> Outcome;

    /// Reads admin state first; already enabled is a conflict.
    async fn enable(&self, address: &DeviceAddress) -> Outcome;

    /// Reads admin state first; already disabled is a conflict.
    async fn disable(&self, address: &DeviceAddress) -> Outcome;

    async fn status(&self, address: &DeviceAddress) -> Outcome;

    async fn run(&self, action: InterfaceAction, address: &DeviceAddress) -> Outcome {
        match action {
            InterfaceAction::Create => self.create(address).await,
            InterfaceAction::Delete => self.delete(address).await,
            InterfaceAction::Enable => self.enable(address).await,
            InterfaceAction::Disable => self.disable(address).await,
            InterfaceAction::Status => self.status(address).await,
        }
    }
}

/// Declarative-config runner: running-config export and banner writes.
#[async_trait]
pub trait PlaybookRunner: Send + Sync {
    /// On success the payload is a local file holding the running config.
    async fn show_running(&self, address: &DeviceAddress) -> Outcome<PathBuf>;

    async fn banner_set(&self, address: &DeviceAddress, text: &str) -> Outcome;
}

/// Interactive CLI session: operational show commands.
#[async_trait]
pub trait DeviceShell: Send + Sync {
    async fn gigabit_status(&self, address: &DeviceAddress) -> Outcome;

    async fn banner_get(&self, address: &DeviceAddress) -> Outcome;
}
