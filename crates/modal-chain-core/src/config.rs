//! Controller configuration: markup attribute names, transient class names
//! and behavior switches.

use serde::{Deserialize, Serialize};

/// Default fallback for a close transition that never signals completion.
pub const DEFAULT_TRANSITION_TIMEOUT_MS: u32 = 1000;

/// How the page is pinned while a dialog is active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollLock {
    /// `position: fixed` on the body with a negative `top` offset.
    /// The offset is restored when the lock is released.
    #[default]
    FixedBody,
    /// `overflow: hidden` on the body. The page never moves.
    Overflow,
}

/// Markup attribute names used to discover dialogs and triggers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkupAttributes {
    /// Marks a dialog element. The element's `id` is the dialog id.
    pub dialog: String,
    /// On an open trigger; value is the target dialog id.
    pub open: String,
    /// Marks the interior of a dialog that does not dismiss on click.
    pub container: String,
    /// On a close trigger nested in a dialog.
    pub close: String,
    /// On a "previous" chain trigger; value is the target dialog id.
    pub prev: String,
    /// On a "next" chain trigger; value is the target dialog id.
    pub next: String,
}

impl Default for MarkupAttributes {
    fn default() -> Self {
        Self {
            dialog: "data-modal".to_string(),
            open: "data-modal-open".to_string(),
            container: "data-modal-container".to_string(),
            close: "data-modal-close".to_string(),
            prev: "data-modal-prev".to_string(),
            next: "data-modal-next".to_string(),
        }
    }
}

impl MarkupAttributes {
    /// CSS selector matching elements carrying `attribute`.
    pub fn selector(attribute: &str) -> String {
        format!("[{attribute}]")
    }
}

/// Transient classes toggled for CSS transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TransitionClasses {
    /// Present from just before show until the next animation frame.
    pub entering: String,
    /// Present while the dialog plays its leaving transition.
    pub leaving: String,
}

impl Default for TransitionClasses {
    fn default() -> Self {
        Self {
            entering: "is-open".to_string(),
            leaving: "is-close".to_string(),
        }
    }
}

/// Full controller configuration.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalConfig {
    pub attributes: MarkupAttributes,
    pub classes: TransitionClasses,
    /// Honor prev/next triggers. Off gives the plain open/close variant.
    pub chaining: bool,
    pub scroll_lock: ScrollLock,
    /// Fallback completion for the leaving transition. `None` waits forever.
    pub transition_timeout_ms: Option<u32>,
    /// Focus the opening trigger again once the last dialog closes.
    pub restore_focus: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            attributes: MarkupAttributes::default(),
            classes: TransitionClasses::default(),
            chaining: true,
            scroll_lock: ScrollLock::FixedBody,
            transition_timeout_ms: Some(DEFAULT_TRANSITION_TIMEOUT_MS),
            restore_focus: true,
        }
    }
}

impl ModalConfig {
    /// The reduced variant: no prev/next chaining, overflow-based lock.
    pub fn simple() -> Self {
        Self {
            chaining: false,
            scroll_lock: ScrollLock::Overflow,
            ..Self::default()
        }
    }
}
