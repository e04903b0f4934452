//! Errors returned by rejected controller calls.

use crate::dialog::{DialogId, DialogPhase};

/// A controller call that was refused. Refused calls have no side effects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    #[error("Unknown dialog: '{0}'")]
    UnknownDialog(DialogId),
    #[error("Dialog '{id}' is {actual}, expected {expected}")]
    InvalidPhase {
        id: DialogId,
        expected: DialogPhase,
        actual: DialogPhase,
    },
    #[error("Cannot open '{requested}' while '{active}' is active")]
    AnotherDialogActive {
        requested: DialogId,
        active: DialogId,
    },
}
