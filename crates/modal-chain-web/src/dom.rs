//! `ModalHost` over the live DOM.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::future::TimeoutFuture;
use modal_chain_core::config::MarkupAttributes;
use modal_chain_core::{DialogId, ModalConfig, ModalEvent, ModalHost, ScrollLock};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlDialogElement, HtmlElement, Node, Window};

use crate::binding::{Shared, deliver};

/// Body style properties touched by each lock strategy.
const FIXED_BODY_PROPERTIES: [&str; 3] = ["position", "top", "width"];
const OVERFLOW_PROPERTIES: [&str; 1] = ["overflow"];

pub(crate) struct DomHost {
    window: Window,
    document: Document,
    body: HtmlElement,
    config: ModalConfig,
    dialogs: HashMap<DialogId, HtmlDialogElement>,
    /// Elements this host marked inert, restored when the barrier drops.
    inert_marked: Vec<Element>,
    /// Latest frame request per dialog. Dropping a handle cancels it.
    frames: HashMap<DialogId, AnimationFrame>,
    /// Bumped on every arm/cancel; a fallback timer only fires if the
    /// generation it captured is still current.
    timer_generations: HashMap<DialogId, Rc<Cell<u64>>>,
    shared: Weak<RefCell<Shared>>,
}

impl DomHost {
    pub(crate) fn new(
        window: Window,
        document: Document,
        body: HtmlElement,
        config: ModalConfig,
        dialogs: HashMap<DialogId, HtmlDialogElement>,
        shared: Weak<RefCell<Shared>>,
    ) -> Self {
        Self {
            window,
            document,
            body,
            config,
            dialogs,
            inert_marked: Vec::new(),
            frames: HashMap::new(),
            timer_generations: HashMap::new(),
            shared,
        }
    }

    fn dialog(&self, id: &DialogId) -> Option<&HtmlDialogElement> {
        let dialog = self.dialogs.get(id);
        if dialog.is_none() {
            warn!(dialog = %id, "No element bound for dialog");
        }
        dialog
    }

    fn bump_generation(&mut self, id: &DialogId) -> (Rc<Cell<u64>>, u64) {
        let generation = self.timer_generations.entry(id.clone()).or_default();
        generation.set(generation.get() + 1);
        (Rc::clone(generation), generation.get())
    }

    fn set_body_style(&self, property: &str, value: &str) {
        if let Err(err) = self.body.style().set_property(property, value) {
            warn!(?err, property, "Failed to set body style");
        }
    }

    fn clear_body_style(&self, property: &str) {
        if let Err(err) = self.body.style().remove_property(property) {
            warn!(?err, property, "Failed to clear body style");
        }
    }

    /// Collects the highest elements under `parent` that contain no bound
    /// dialog. Ancestors of a dialog are descended into instead.
    fn collect_outside_dialogs(&self, parent: &Element, out: &mut Vec<Element>) {
        let children = parent.children();
        for index in 0..children.length() {
            let Some(child) = children.item(index) else {
                continue;
            };
            let mut is_dialog = false;
            let mut holds_dialog = false;
            for dialog in self.dialogs.values() {
                let dialog: &Node = dialog;
                is_dialog |= child.is_same_node(Some(dialog));
                holds_dialog |= child.contains(Some(dialog));
            }

            if is_dialog {
                continue;
            }
            if holds_dialog {
                self.collect_outside_dialogs(&child, out);
            } else if !child.has_attribute("inert") {
                out.push(child);
            }
        }
    }

    fn toggle_attribute(element: &Element, name: &str, present: bool) {
        let result = if present {
            element.set_attribute(name, "")
        } else {
            element.remove_attribute(name)
        };
        log_failure(result, name);
    }
}

fn log_failure(result: Result<(), JsValue>, what: &str) {
    if let Err(err) = result {
        warn!(?err, what, "DOM call failed");
    }
}

impl ModalHost for DomHost {
    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn lock_scroll(&mut self, offset: f64) {
        match self.config.scroll_lock {
            ScrollLock::FixedBody => {
                self.set_body_style("position", "fixed");
                self.set_body_style("top", &format!("-{offset}px"));
                self.set_body_style("width", "100%");
            }
            ScrollLock::Overflow => self.set_body_style("overflow", "hidden"),
        }
    }

    fn unlock_scroll(&mut self) {
        let properties: &[&str] = match self.config.scroll_lock {
            ScrollLock::FixedBody => &FIXED_BODY_PROPERTIES,
            ScrollLock::Overflow => &OVERFLOW_PROPERTIES,
        };
        for property in properties {
            self.clear_body_style(property);
        }
    }

    fn scroll_to(&mut self, offset: f64) {
        self.window.scroll_to_with_x_and_y(0.0, offset);
    }

    fn set_page_inert(&mut self, inert: bool) {
        if inert {
            let mut outside = Vec::new();
            self.collect_outside_dialogs(&self.body, &mut outside);
            for element in &outside {
                Self::toggle_attribute(element, "inert", true);
            }
            self.inert_marked = outside;
        } else {
            for element in self.inert_marked.drain(..) {
                Self::toggle_attribute(&element, "inert", false);
            }
        }
    }

    fn set_dialog_inert(&mut self, id: &DialogId, inert: bool) {
        if let Some(dialog) = self.dialog(id) {
            Self::toggle_attribute(dialog, "inert", inert);
        }
    }

    fn set_aria_hidden(&mut self, id: &DialogId, hidden: bool) {
        if let Some(dialog) = self.dialog(id) {
            let value = if hidden { "true" } else { "false" };
            log_failure(dialog.set_attribute("aria-hidden", value), "aria-hidden");
        }
    }

    fn add_class(&mut self, id: &DialogId, class: &str) {
        if let Some(dialog) = self.dialog(id) {
            log_failure(dialog.class_list().add_1(class), class);
        }
    }

    fn remove_class(&mut self, id: &DialogId, class: &str) {
        if let Some(dialog) = self.dialog(id) {
            log_failure(dialog.class_list().remove_1(class), class);
        }
    }

    fn show_modal(&mut self, id: &DialogId) {
        if let Some(dialog) = self.dialog(id) {
            log_failure(dialog.show_modal(), "showModal");
        }
    }

    fn hide_modal(&mut self, id: &DialogId) {
        if let Some(dialog) = self.dialog(id) {
            dialog.close();
        }
    }

    fn focus_within(&self, id: &DialogId) -> bool {
        let Some(dialog) = self.dialogs.get(id) else {
            return false;
        };
        self.document
            .active_element()
            .is_some_and(|active| dialog.contains(Some(&Node::from(active))))
    }

    fn blur_focus(&mut self) {
        let active = self
            .document
            .active_element()
            .and_then(|active| active.dyn_into::<HtmlElement>().ok());
        if let Some(active) = active {
            log_failure(active.blur(), "blur");
        }
    }

    fn focus_opener(&mut self, id: &DialogId) -> bool {
        let attribute = &self.config.attributes.open;
        let selector = MarkupAttributes::selector(attribute);
        let Ok(triggers) = self.document.query_selector_all(&selector) else {
            return false;
        };

        for index in 0..triggers.length() {
            let Some(trigger) = triggers
                .item(index)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            if trigger.get_attribute(attribute).as_deref() == Some(id.as_str()) {
                return trigger.focus().is_ok();
            }
        }
        false
    }

    fn request_frame(&mut self, id: &DialogId) {
        let shared = self.shared.clone();
        let dialog = id.clone();
        let handle = request_animation_frame(move |_timestamp| {
            deliver(&shared, ModalEvent::AnimationFrame { dialog });
        });
        self.frames.insert(id.clone(), handle);
    }

    fn await_transition(&mut self, id: &DialogId, timeout_ms: Option<u32>) {
        let (generation, armed) = self.bump_generation(id);
        let Some(timeout_ms) = timeout_ms else {
            return;
        };

        let shared = self.shared.clone();
        let dialog = id.clone();
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(timeout_ms).await;
            if generation.get() == armed {
                deliver(&shared, ModalEvent::TransitionTimeout { dialog });
            }
        });
    }

    fn cancel_transition(&mut self, id: &DialogId) {
        self.bump_generation(id);
    }
}
