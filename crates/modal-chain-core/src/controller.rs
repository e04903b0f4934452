//! Modal lifecycle state machine.
//!
//! Each dialog moves `Closed → Opening → Open → Closing → Closed`. A switch
//! takes `Open → Closing` on the current dialog and then `Opening → Open` on
//! the next one without ever releasing the page in between.
//!
//! # Invariants
//!
//! - At most one dialog is not `Closed` at any time.
//! - The scroll lock and the inert barrier are taken before a dialog is
//!   shown and released only by the final close of a chain.
//! - Focus inside a dialog is blurred before the dialog is marked
//!   `aria-hidden`.
//! - A leaving transition completes at most once, whichever of
//!   `TransitionEnd` / `TransitionTimeout` arrives first.
//!
//! Calls made in the wrong phase are rejected with a [`ModalError`] and
//! touch nothing.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::ModalConfig;
use crate::dialog::{Continuation, DialogId, DialogPhase, DialogState};
use crate::error::ModalError;
use crate::event::{Dispatch, ModalEvent};
use crate::host::ModalHost;
use crate::page::PageContext;

/// Drives a fixed set of dialogs against a [`ModalHost`].
#[derive(Debug, Clone)]
pub struct ModalController {
    config: ModalConfig,
    dialogs: BTreeMap<DialogId, DialogState>,
    page: PageContext,
}

impl ModalController {
    /// Creates a controller for the given dialogs, all `Closed`.
    pub fn new<I>(config: ModalConfig, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DialogId>,
    {
        let mut dialogs = BTreeMap::new();
        for id in ids {
            let id = id.into();
            if dialogs.insert(id.clone(), DialogState::default()).is_some() {
                warn!(dialog = %id, "Duplicate dialog id, keeping one entry");
            }
        }
        debug!(count = dialogs.len(), "Modal controller created");

        Self {
            config,
            dialogs,
            page: PageContext::new(),
        }
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn page(&self) -> &PageContext {
        &self.page
    }

    pub fn dialog_ids(&self) -> impl Iterator<Item = &DialogId> {
        self.dialogs.keys()
    }

    pub fn contains(&self, id: &DialogId) -> bool {
        self.dialogs.contains_key(id)
    }

    /// Phase of `id`, or `None` for an unknown dialog.
    pub fn phase(&self, id: &DialogId) -> Option<DialogPhase> {
        self.dialogs.get(id).map(|state| state.phase)
    }

    /// The dialog that is not `Closed`, if any.
    pub fn active_dialog(&self) -> Option<&DialogId> {
        self.dialogs
            .iter()
            .find(|(_, state)| state.phase != DialogPhase::Closed)
            .map(|(id, _)| id)
    }

    /// Shows `id`.
    ///
    /// With `preserve_scroll` the offset captured by an earlier open is
    /// reused instead of reading the page again. A lock that is still held
    /// always reuses its capture, since the page cannot have moved.
    pub fn open<H: ModalHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &DialogId,
        preserve_scroll: bool,
    ) -> Result<(), ModalError> {
        self.expect_phase(id, DialogPhase::Closed)?;
        if let Some(active) = self.active_dialog() {
            return Err(ModalError::AnotherDialogActive {
                requested: id.clone(),
                active: active.clone(),
            });
        }

        let offset = match self.page.scroll.captured() {
            Some(offset) if preserve_scroll || self.page.scroll.is_locked() => offset,
            _ => {
                let offset = host.scroll_offset();
                self.page.scroll.capture(offset);
                offset
            }
        };
        if self.page.scroll.lock() {
            host.lock_scroll(offset);
        }
        if self.page.inert.activate() {
            host.set_page_inert(true);
        }

        host.add_class(id, &self.config.classes.entering);
        host.set_aria_hidden(id, false);
        host.show_modal(id);
        host.set_dialog_inert(id, false);
        self.set_phase(id, DialogPhase::Opening);
        host.request_frame(id);

        debug!(dialog = %id, offset, preserve_scroll, "Dialog opening");
        Ok(())
    }

    /// Hides `id` once its leaving transition completes.
    ///
    /// With `keep_scroll` the scroll lock and inert barrier stay in place for
    /// a follow-up [`open`](Self::open) with `preserve_scroll`.
    pub fn close<H: ModalHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &DialogId,
        keep_scroll: bool,
    ) -> Result<(), ModalError> {
        self.expect_phase(id, DialogPhase::Open)?;

        let continuation = if keep_scroll {
            Continuation::KeepLocked
        } else {
            Continuation::Release
        };
        self.begin_leave(host, id, continuation);
        Ok(())
    }

    /// Closes `current` and opens `next` under one uninterrupted lock.
    pub fn switch_modal<H: ModalHost + ?Sized>(
        &mut self,
        host: &mut H,
        current: &DialogId,
        next: &DialogId,
    ) -> Result<(), ModalError> {
        if !self.contains(next) {
            return Err(ModalError::UnknownDialog(next.clone()));
        }
        self.expect_phase(current, DialogPhase::Open)?;
        if next != current {
            self.expect_phase(next, DialogPhase::Closed)?;
        }

        self.begin_leave(host, current, Continuation::OpenNext(next.clone()));
        Ok(())
    }

    /// Routes a host event to the matching operation.
    pub fn dispatch<H: ModalHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: ModalEvent,
    ) -> Result<Dispatch, ModalError> {
        match event {
            ModalEvent::OpenTrigger { target } => {
                self.open(host, &target, false).map(|()| Dispatch::HANDLED)
            }
            ModalEvent::CloseTrigger { dialog } => {
                self.close(host, &dialog, false).map(|()| Dispatch::HANDLED)
            }
            ModalEvent::ChainTrigger { dialog, target } => {
                if !self.config.chaining {
                    debug!(dialog = %dialog, target = %target, "Chaining disabled, trigger ignored");
                    return Ok(Dispatch::IGNORED);
                }
                self.switch_modal(host, &dialog, &target)
                    .map(|()| Dispatch::HANDLED)
            }
            ModalEvent::BackdropClick {
                dialog,
                inside_container,
            } => {
                if inside_container || self.phase(&dialog) != Some(DialogPhase::Open) {
                    return Ok(Dispatch::IGNORED);
                }
                self.close(host, &dialog, false).map(|()| Dispatch::HANDLED)
            }
            ModalEvent::Cancel { dialog } => {
                // The native cancel path would skip scroll/focus/inert cleanup
                let dispatch = if self.phase(&dialog) == Some(DialogPhase::Open) {
                    self.close(host, &dialog, false)?;
                    Dispatch::HANDLED
                } else {
                    Dispatch::IGNORED
                };
                Ok(dispatch.with_prevent_default())
            }
            ModalEvent::AnimationFrame { dialog } => Ok(self.finish_enter(host, &dialog)),
            ModalEvent::TransitionEnd { dialog } => Ok(self.finish_leave(host, &dialog, false)),
            ModalEvent::TransitionTimeout { dialog } => {
                Ok(self.finish_leave(host, &dialog, true))
            }
        }
    }

    fn expect_phase(&self, id: &DialogId, expected: DialogPhase) -> Result<(), ModalError> {
        let state = self
            .dialogs
            .get(id)
            .ok_or_else(|| ModalError::UnknownDialog(id.clone()))?;

        if state.phase == expected {
            Ok(())
        } else {
            Err(ModalError::InvalidPhase {
                id: id.clone(),
                expected,
                actual: state.phase,
            })
        }
    }

    fn set_phase(&mut self, id: &DialogId, phase: DialogPhase) {
        if let Some(state) = self.dialogs.get_mut(id) {
            state.phase = phase;
        }
    }

    /// Shared first half of close and switch.
    fn begin_leave<H: ModalHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &DialogId,
        continuation: Continuation,
    ) {
        // Must happen before aria-hidden: hidden subtrees may not hold focus
        if host.focus_within(id) {
            host.blur_focus();
        }
        host.add_class(id, &self.config.classes.leaving);
        host.set_aria_hidden(id, true);

        debug!(dialog = %id, ?continuation, "Dialog closing");
        if let Some(state) = self.dialogs.get_mut(id) {
            state.phase = DialogPhase::Closing;
            state.pending = Some(continuation);
        }
        host.await_transition(id, self.config.transition_timeout_ms);
    }

    fn finish_enter<H: ModalHost + ?Sized>(&mut self, host: &mut H, id: &DialogId) -> Dispatch {
        let Some(state) = self.dialogs.get_mut(id) else {
            return Dispatch::IGNORED;
        };
        if state.phase != DialogPhase::Opening {
            debug!(dialog = %id, phase = %state.phase, "Stray animation frame ignored");
            return Dispatch::IGNORED;
        }
        state.phase = DialogPhase::Open;

        host.remove_class(id, &self.config.classes.entering);
        debug!(dialog = %id, "Dialog open");
        Dispatch::HANDLED
    }

    fn finish_leave<H: ModalHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &DialogId,
        timed_out: bool,
    ) -> Dispatch {
        let Some(state) = self.dialogs.get_mut(id) else {
            return Dispatch::IGNORED;
        };
        if state.phase != DialogPhase::Closing {
            return Dispatch::IGNORED;
        }
        let Some(continuation) = state.pending.take() else {
            return Dispatch::IGNORED;
        };
        state.phase = DialogPhase::Closed;

        if timed_out {
            warn!(dialog = %id, "Leaving transition never completed, finishing on timeout");
        }
        host.cancel_transition(id);
        host.remove_class(id, &self.config.classes.leaving);
        host.hide_modal(id);
        debug!(dialog = %id, "Dialog closed");

        match continuation {
            Continuation::Release => self.release(host, id),
            Continuation::KeepLocked => {
                debug!(dialog = %id, "Page lock kept for next dialog");
            }
            Continuation::OpenNext(next) => {
                if let Err(err) = self.open(host, &next, true) {
                    warn!(%err, "Chained open rejected, releasing page");
                    self.release(host, id);
                }
            }
        }
        Dispatch::HANDLED
    }

    /// Closes every dialog at once and gives the page back without waiting
    /// for transitions. Focus is left alone.
    ///
    /// For teardown: after this the host can be dropped without leaving the
    /// page locked, inert or showing a dialog.
    pub fn reset<H: ModalHost + ?Sized>(&mut self, host: &mut H) {
        for (id, state) in &mut self.dialogs {
            if state.phase == DialogPhase::Closed {
                continue;
            }
            debug!(dialog = %id, phase = %state.phase, "Dialog reset");
            state.phase = DialogPhase::Closed;
            state.pending = None;
            host.cancel_transition(id);
            host.remove_class(id, &self.config.classes.entering);
            host.remove_class(id, &self.config.classes.leaving);
            host.set_aria_hidden(id, true);
            host.hide_modal(id);
        }

        if self.page.inert.deactivate() {
            host.set_page_inert(false);
        }
        let offset = self.page.scroll.take_capture();
        if self.page.scroll.unlock() {
            host.unlock_scroll();
            host.scroll_to(offset.unwrap_or(0.0));
        }
    }

    /// Final step of a close chain: gives the page back.
    fn release<H: ModalHost + ?Sized>(&mut self, host: &mut H, id: &DialogId) {
        if self.page.inert.deactivate() {
            host.set_page_inert(false);
        }
        if self.page.scroll.unlock() {
            host.unlock_scroll();
        }
        let offset = self.page.scroll.take_capture().unwrap_or(0.0);
        host.scroll_to(offset);

        if self.config.restore_focus && !host.focus_opener(id) {
            debug!(dialog = %id, "No open trigger, focus left in place");
        }
        debug!(dialog = %id, offset, "Page released");
    }
}
