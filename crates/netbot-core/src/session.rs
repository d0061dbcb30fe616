use crate::model::TransportKind;

/// Per-process dispatch context: which interface transport is selected.
///
/// Owned by whoever drives the dispatcher and passed in on every call;
/// nothing else survives between commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    selected: Option<TransportKind>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transport(kind: TransportKind) -> Self {
        Self {
            selected: Some(kind),
        }
    }

    pub fn selected(&self) -> Option<TransportKind> {
        self.selected
    }

    pub fn select(&mut self, kind: TransportKind) {
        self.selected = Some(kind);
    }
}
