//! Chat-driven router automation: parser, dispatcher and transport adapters.
//!
//! - **[`parser`]** maps command text to a typed [`Intent`].
//! - **[`Dispatcher`]** validates the target against the [`Allowlist`],
//!   routes to one adapter and formats the reply. The selected transport
//!   lives in a [`Session`] passed in by the caller.
//! - **[`adapter`]** holds the four transports behind three traits
//!   ([`InterfaceBackend`], [`PlaybookRunner`], [`DeviceShell`]); all of
//!   them report through [`Outcome`].
//! - **[`Poller`]** drives the loop against a [`ChatRoom`].
//!
//! Configuration arrives as a resolved [`BotConfig`]; this crate never
//! reads files or the environment.

pub mod adapter;
pub mod chat;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod parser;
pub mod poller;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use adapter::{DeviceShell, InterfaceBackend, PlaybookRunner};
pub use chat::{ChatRoom, Message, WebexRoom};
pub use config::{BotConfig, ChatSettings, DeviceSettings, PlaybookSettings, TlsVerification};
pub use dispatch::{Backends, Dispatcher};
pub use error::CoreError;
pub use model::{
    Allowlist, DeviceAddress, InterfaceAction, InterfaceState, Intent, LinkState, LoopbackSpec,
    Outcome, ParseError, Reply, TransportKind,
};
pub use poller::Poller;
pub use session::Session;
