//! Page-wide state shared by every dialog: captured scroll offset, the
//! scroll lock and the inert barrier.
//!
//! The controller owns one [`PageContext`] and is its only mutator. The
//! mutators return whether they changed anything so the controller only
//! touches the page on real transitions.

use serde::{Deserialize, Serialize};

/// Captured vertical offset and lock flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PageScrollState {
    captured: Option<f64>,
    locked: bool,
}

impl PageScrollState {
    pub fn captured(&self) -> Option<f64> {
        self.captured
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Records `offset`, replacing any earlier capture.
    pub fn capture(&mut self, offset: f64) {
        self.captured = Some(offset);
    }

    /// Removes and returns the capture.
    pub fn take_capture(&mut self) -> Option<f64> {
        self.captured.take()
    }

    /// Returns true if the page was unlocked before.
    pub fn lock(&mut self) -> bool {
        !std::mem::replace(&mut self.locked, true)
    }

    /// Returns true if the page was locked before.
    pub fn unlock(&mut self) -> bool {
        std::mem::replace(&mut self.locked, false)
    }
}

/// Whether the page outside the active dialog is non-interactive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InertBarrier {
    active: bool,
    activations: u32,
    deactivations: u32,
}

impl InertBarrier {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true on an inactive → active edge.
    pub fn activate(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.activations += 1;
        true
    }

    /// Returns true on an active → inactive edge.
    pub fn deactivate(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.deactivations += 1;
        true
    }

    /// Number of inactive → active edges so far.
    pub fn activations(&self) -> u32 {
        self.activations
    }

    /// Number of active → inactive edges so far.
    pub fn deactivations(&self) -> u32 {
        self.deactivations
    }
}

/// Everything page-global the controller tracks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PageContext {
    pub scroll: PageScrollState,
    pub inert: InertBarrier,
}

impl PageContext {
    pub fn new() -> Self {
        Self::default()
    }
}
