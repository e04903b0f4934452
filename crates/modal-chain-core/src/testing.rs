//! Recording fake page for controller tests.
//!
//! `FakeHost` keeps a small model of the page (scroll, lock, inert, focus,
//! classes) and logs every host call in order, so tests can assert both the
//! final state and the sequence that produced it.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::controller::ModalController;
use crate::dialog::DialogId;
use crate::event::ModalEvent;
use crate::host::ModalHost;

/// One recorded host call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HostCall {
    LockScroll(f64),
    UnlockScroll,
    ScrollTo(f64),
    SetPageInert(bool),
    SetDialogInert(DialogId, bool),
    SetAriaHidden(DialogId, bool),
    AddClass(DialogId, String),
    RemoveClass(DialogId, String),
    ShowModal(DialogId),
    HideModal(DialogId),
    BlurFocus,
    FocusOpener(DialogId),
    RequestFrame(DialogId),
    AwaitTransition(DialogId, Option<u32>),
    CancelTransition(DialogId),
}

/// Where keyboard focus sits in the fake page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Focus {
    /// On the open trigger for a dialog.
    Opener(DialogId),
    /// On some element inside a dialog.
    Inside(DialogId),
    /// Anywhere else.
    Other(String),
}

#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    pub scroll: f64,
    pub locked_at: Option<f64>,
    pub page_inert: bool,
    pub dialog_inert: HashMap<DialogId, bool>,
    pub aria_hidden: HashMap<DialogId, bool>,
    pub classes: HashMap<DialogId, BTreeSet<String>>,
    pub shown: HashSet<DialogId>,
    pub focus: Option<Focus>,
    pub openers: HashSet<DialogId>,
    pub frames: Vec<DialogId>,
    pub awaiting: HashMap<DialogId, Option<u32>>,
    pub calls: Vec<HostCall>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an open trigger for each dialog id.
    pub fn with_openers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<DialogId>,
    {
        self.openers.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn position(&self, call: &HostCall) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    pub fn count(&self, call: &HostCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn has_class(&self, dialog: &str, class: &str) -> bool {
        self.classes
            .get(&DialogId::from(dialog))
            .is_some_and(|set| set.contains(class))
    }

    /// Delivers every requested animation frame.
    pub fn flush_frames(&mut self, controller: &mut ModalController) {
        for dialog in std::mem::take(&mut self.frames) {
            controller
                .dispatch(self, ModalEvent::AnimationFrame { dialog })
                .unwrap();
        }
    }

    /// Ends every leaving transition currently awaited.
    pub fn finish_transitions(&mut self, controller: &mut ModalController) {
        let waiting: Vec<DialogId> = self.awaiting.keys().cloned().collect();
        for dialog in waiting {
            controller
                .dispatch(self, ModalEvent::TransitionEnd { dialog })
                .unwrap();
        }
    }
}

impl ModalHost for FakeHost {
    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn lock_scroll(&mut self, offset: f64) {
        self.calls.push(HostCall::LockScroll(offset));
        // A fixed body reports a zero window offset
        self.locked_at = Some(offset);
        self.scroll = 0.0;
    }

    fn unlock_scroll(&mut self) {
        self.calls.push(HostCall::UnlockScroll);
        self.locked_at = None;
    }

    fn scroll_to(&mut self, offset: f64) {
        self.calls.push(HostCall::ScrollTo(offset));
        self.scroll = offset;
    }

    fn set_page_inert(&mut self, inert: bool) {
        self.calls.push(HostCall::SetPageInert(inert));
        self.page_inert = inert;
    }

    fn set_dialog_inert(&mut self, id: &DialogId, inert: bool) {
        self.calls.push(HostCall::SetDialogInert(id.clone(), inert));
        self.dialog_inert.insert(id.clone(), inert);
    }

    fn set_aria_hidden(&mut self, id: &DialogId, hidden: bool) {
        self.calls.push(HostCall::SetAriaHidden(id.clone(), hidden));
        self.aria_hidden.insert(id.clone(), hidden);
    }

    fn add_class(&mut self, id: &DialogId, class: &str) {
        self.calls
            .push(HostCall::AddClass(id.clone(), class.to_string()));
        self.classes
            .entry(id.clone())
            .or_default()
            .insert(class.to_string());
    }

    fn remove_class(&mut self, id: &DialogId, class: &str) {
        self.calls
            .push(HostCall::RemoveClass(id.clone(), class.to_string()));
        if let Some(set) = self.classes.get_mut(id) {
            set.remove(class);
        }
    }

    fn show_modal(&mut self, id: &DialogId) {
        self.calls.push(HostCall::ShowModal(id.clone()));
        self.shown.insert(id.clone());
    }

    fn hide_modal(&mut self, id: &DialogId) {
        self.calls.push(HostCall::HideModal(id.clone()));
        self.shown.remove(id);
    }

    fn focus_within(&self, id: &DialogId) -> bool {
        matches!(&self.focus, Some(Focus::Inside(inside)) if inside == id)
    }

    fn blur_focus(&mut self) {
        self.calls.push(HostCall::BlurFocus);
        self.focus = None;
    }

    fn focus_opener(&mut self, id: &DialogId) -> bool {
        self.calls.push(HostCall::FocusOpener(id.clone()));
        if self.openers.contains(id) {
            self.focus = Some(Focus::Opener(id.clone()));
            true
        } else {
            false
        }
    }

    fn request_frame(&mut self, id: &DialogId) {
        self.calls.push(HostCall::RequestFrame(id.clone()));
        self.frames.push(id.clone());
    }

    fn await_transition(&mut self, id: &DialogId, timeout_ms: Option<u32>) {
        self.calls
            .push(HostCall::AwaitTransition(id.clone(), timeout_ms));
        self.awaiting.insert(id.clone(), timeout_ms);
    }

    fn cancel_transition(&mut self, id: &DialogId) {
        self.calls.push(HostCall::CancelTransition(id.clone()));
        self.awaiting.remove(id);
    }
}
