// ── Domain model ──
//
// Addresses, intents, the loopback resource and adapter outcomes.

pub mod address;
pub mod intent;
pub mod interface;
pub mod outcome;

pub use address::{Allowlist, DeviceAddress};
pub use intent::{InterfaceAction, Intent, ParseError, TransportKind};
pub use interface::{InterfaceState, LinkState, LoopbackSpec, reduce_status};
pub use outcome::{Outcome, Reply};
