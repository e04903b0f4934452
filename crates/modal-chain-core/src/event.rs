//! Inputs routed into the controller.

use crate::dialog::DialogId;

/// Everything the controller reacts to, already resolved to dialog ids by
/// the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    /// Click on an open trigger.
    OpenTrigger { target: DialogId },
    /// Click on a close trigger nested in `dialog`.
    CloseTrigger { dialog: DialogId },
    /// Click on a prev/next trigger nested in `dialog`.
    ChainTrigger { dialog: DialogId, target: DialogId },
    /// Click that landed on `dialog`. `inside_container` is true when the
    /// target sits within the dialog's container region.
    BackdropClick {
        dialog: DialogId,
        inside_container: bool,
    },
    /// Escape / cancel request on `dialog`.
    Cancel { dialog: DialogId },
    /// The frame requested after showing `dialog`.
    AnimationFrame { dialog: DialogId },
    /// A transition finished somewhere in `dialog`.
    TransitionEnd { dialog: DialogId },
    /// The fallback timer armed for `dialog` expired.
    TransitionTimeout { dialog: DialogId },
}

/// Outcome of [`ModalController::dispatch`](crate::ModalController::dispatch).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The event changed controller state.
    pub handled: bool,
    /// The host must suppress the platform default for this event.
    pub prevent_default: bool,
}

impl Dispatch {
    pub const IGNORED: Self = Self {
        handled: false,
        prevent_default: false,
    };

    pub const HANDLED: Self = Self {
        handled: true,
        prevent_default: false,
    };

    #[must_use]
    pub fn with_prevent_default(self) -> Self {
        Self {
            prevent_default: true,
            ..self
        }
    }
}
