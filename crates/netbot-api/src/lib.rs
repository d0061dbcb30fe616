// netbot-api: wire clients for router management protocols and the chat API

pub mod auth;
pub mod error;
pub mod netconf;
pub mod playbook;
pub mod restconf;
pub mod ssh;
pub mod transport;
pub mod webex;

pub use auth::DeviceCredentials;
pub use error::Error;
pub use netconf::{NetconfClient, NetconfSession};
pub use playbook::{PlaybookCommand, PlaybookRun};
pub use restconf::{InterfaceConfig, PutDisposition, RestconfClient};
pub use ssh::SshClient;
pub use transport::{TlsMode, TransportConfig};
pub use webex::{ChatMessage, WebexClient};
