//! Platform primitives the controller drives.

use crate::dialog::DialogId;

/// The page as seen by [`ModalController`](crate::ModalController).
///
/// Implementations apply side effects immediately and must never call back
/// into the controller synchronously. Work that completes later (animation
/// frames, transition ends, timers) is reported by dispatching
/// [`ModalEvent`](crate::ModalEvent)s once the current call has returned.
pub trait ModalHost {
    /// Current vertical scroll offset of the page.
    fn scroll_offset(&self) -> f64;
    /// Pins the page at `offset` so the background cannot scroll.
    fn lock_scroll(&mut self, offset: f64);
    fn unlock_scroll(&mut self);
    fn scroll_to(&mut self, offset: f64);

    /// Marks or unmarks everything outside dialogs as inert.
    fn set_page_inert(&mut self, inert: bool);
    /// Marks or unmarks a single dialog subtree as inert.
    fn set_dialog_inert(&mut self, id: &DialogId, inert: bool);
    fn set_aria_hidden(&mut self, id: &DialogId, hidden: bool);
    fn add_class(&mut self, id: &DialogId, class: &str);
    fn remove_class(&mut self, id: &DialogId, class: &str);

    /// Native modal show (top layer, backdrop).
    fn show_modal(&mut self, id: &DialogId);
    /// Native modal hide.
    fn hide_modal(&mut self, id: &DialogId);

    /// Whether keyboard focus is currently inside the dialog.
    fn focus_within(&self, id: &DialogId) -> bool;
    fn blur_focus(&mut self);
    /// Focuses the first open trigger targeting `id`. Returns false when
    /// there is none.
    fn focus_opener(&mut self, id: &DialogId) -> bool;

    /// Delivers [`ModalEvent::AnimationFrame`](crate::ModalEvent::AnimationFrame)
    /// for `id` on the next frame.
    fn request_frame(&mut self, id: &DialogId);
    /// Starts waiting for the leaving transition of `id`. Delivers
    /// `TransitionEnd` when it finishes, or `TransitionTimeout` after
    /// `timeout_ms` if given.
    fn await_transition(&mut self, id: &DialogId, timeout_ms: Option<u32>);
    /// Stops waiting for `id`. Pending fallback timers must not fire after
    /// this.
    fn cancel_transition(&mut self, id: &DialogId);
}
