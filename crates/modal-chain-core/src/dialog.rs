//! Dialog identity and per-dialog lifecycle state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a dialog (its element id in the page).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogId(String);

impl DialogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DialogId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DialogId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Lifecycle phase of a single dialog.
///
/// `Opening` lasts until the next animation frame, `Closing` until the
/// leaving transition completes (or its fallback timer fires).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DialogPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl fmt::Display for DialogPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        };
        f.write_str(name)
    }
}

/// What runs once a dialog's leaving transition has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Continuation {
    /// Final close: release the inert barrier, scroll lock and focus.
    Release,
    /// Close that leaves the page locked for a follow-up open.
    KeepLocked,
    /// Switch: open the given dialog on the still-held lock.
    OpenNext(DialogId),
}

/// Controller-side record for one dialog.
#[derive(Debug, Clone, Default)]
pub(crate) struct DialogState {
    pub phase: DialogPhase,
    pub pending: Option<Continuation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_id_display() {
        let id = DialogId::from("cart");
        assert_eq!(id.to_string(), "cart");
        assert_eq!(id.as_str(), "cart");
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(DialogPhase::Closing.to_string(), "closing");
        assert_eq!(DialogPhase::default(), DialogPhase::Closed);
    }
}
