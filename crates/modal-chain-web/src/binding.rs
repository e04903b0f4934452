//! Discovers dialogs and triggers in the document and wires their events
//! into a shared controller.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use modal_chain_core::config::MarkupAttributes;
use modal_chain_core::{
    DialogId, DialogPhase, Dispatch, ModalConfig, ModalController, ModalError, ModalEvent,
};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlDialogElement, KeyboardEvent};

use crate::config::{CONFIG_ATTRIBUTE, parse_config};
use crate::dom::DomHost;
use crate::error::WebError;

/// Controller and page, borrowed together for every dispatch.
pub(crate) struct Shared {
    pub controller: ModalController,
    pub host: DomHost,
}

/// Runs `event` through the controller if it is still alive and idle.
pub(crate) fn deliver(shared: &Weak<RefCell<Shared>>, event: ModalEvent) -> Dispatch {
    let Some(shared) = shared.upgrade() else {
        return Dispatch::IGNORED;
    };
    let Ok(mut guard) = shared.try_borrow_mut() else {
        warn!(?event, "Controller busy, event dropped");
        return Dispatch::IGNORED;
    };

    let Shared { controller, host } = &mut *guard;
    match controller.dispatch(host, event) {
        Ok(dispatch) => dispatch,
        Err(err) => {
            warn!(%err, "Modal request rejected");
            Dispatch::IGNORED
        }
    }
}

/// Live binding between the document and a controller.
///
/// Dropping the handle removes every listener it registered and gives the
/// page back if a dialog is still up.
pub struct ModalHandle {
    shared: Rc<RefCell<Shared>>,
    _listeners: Vec<EventListener>,
}

impl ModalHandle {
    pub fn open(&self, id: &str) -> Result<(), WebError> {
        self.with(|controller, host| controller.open(host, &DialogId::from(id), false))
    }

    pub fn close(&self, id: &str) -> Result<(), WebError> {
        self.with(|controller, host| controller.close(host, &DialogId::from(id), false))
    }

    pub fn switch_modal(&self, current: &str, next: &str) -> Result<(), WebError> {
        self.with(|controller, host| {
            controller.switch_modal(host, &DialogId::from(current), &DialogId::from(next))
        })
    }

    /// Phase of `id`. `None` for an unknown dialog, or while the controller
    /// is mid-dispatch (a focus listener reacting to `showModal`).
    pub fn phase(&self, id: &str) -> Option<DialogPhase> {
        let Ok(shared) = self.shared.try_borrow() else {
            debug!(dialog = id, "Controller busy, phase unavailable");
            return None;
        };
        shared.controller.phase(&DialogId::from(id))
    }

    pub fn dialog_ids(&self) -> Vec<String> {
        let Ok(shared) = self.shared.try_borrow() else {
            return Vec::new();
        };
        shared
            .controller
            .dialog_ids()
            .map(|id| id.as_str().to_string())
            .collect()
    }

    fn with(
        &self,
        f: impl FnOnce(&mut ModalController, &mut DomHost) -> Result<(), ModalError>,
    ) -> Result<(), WebError> {
        let mut guard = self.shared.try_borrow_mut().map_err(|_| WebError::Busy)?;
        let Shared { controller, host } = &mut *guard;
        Ok(f(controller, host)?)
    }
}

impl Drop for ModalHandle {
    fn drop(&mut self) {
        let Ok(mut guard) = self.shared.try_borrow_mut() else {
            warn!("Controller busy while unbinding, page left as is");
            return;
        };
        let Shared { controller, host } = &mut *guard;
        if let Some(active) = controller.active_dialog() {
            info!(dialog = %active, "Unbinding with a dialog up, releasing page");
        }
        controller.reset(host);
    }
}

/// Reads the config from the body's `data-modal-config` attribute.
pub fn read_document_config() -> Result<ModalConfig, WebError> {
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;
    let body = document.body().ok_or(WebError::NoBody)?;
    parse_config(body.get_attribute(CONFIG_ATTRIBUTE).as_deref())
}

fn query_all(document: &Document, attribute: &str) -> Vec<Element> {
    let selector = MarkupAttributes::selector(attribute);
    let Ok(nodes) = document.query_selector_all(&selector) else {
        warn!(%selector, "Invalid selector");
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Id of the dialog containing `element`.
fn enclosing_dialog(element: &Element, dialog_attribute: &str) -> Option<DialogId> {
    let selector = MarkupAttributes::selector(dialog_attribute);
    let dialog = element.closest(&selector).ok()??;
    Some(DialogId::from(dialog.id()))
}

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Binds every `[data-modal]` dialog and trigger currently in the document.
pub fn bind_document(config: ModalConfig) -> Result<ModalHandle, WebError> {
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;
    let body = document.body().ok_or(WebError::NoBody)?;
    let attributes = config.attributes.clone();

    let mut dialogs = HashMap::new();
    for element in query_all(&document, &attributes.dialog) {
        let id = element.id();
        if id.is_empty() {
            warn!("Dialog without id skipped");
            continue;
        }
        match element.dyn_into::<HtmlDialogElement>() {
            Ok(dialog) => {
                dialogs.insert(DialogId::from(id), dialog);
            }
            Err(_) => warn!(dialog = %id, "Not a <dialog> element, skipped"),
        }
    }

    let controller = ModalController::new(config.clone(), dialogs.keys().cloned());
    let shared = Rc::new_cyclic(|weak| {
        RefCell::new(Shared {
            controller,
            host: DomHost::new(
                window,
                document.clone(),
                body,
                config,
                dialogs.clone(),
                weak.clone(),
            ),
        })
    });
    let weak = Rc::downgrade(&shared);
    let mut listeners = Vec::new();

    for trigger in query_all(&document, &attributes.open) {
        let shared = weak.clone();
        let attribute = attributes.open.clone();
        let element = trigger.clone();
        listeners.push(EventListener::new(&trigger, "click", move |_| {
            // Read on click so markup edits after binding are honored
            if let Some(target) = element.get_attribute(&attribute) {
                deliver(&shared, ModalEvent::OpenTrigger {
                    target: DialogId::from(target),
                });
            }
        }));
    }

    for trigger in query_all(&document, &attributes.close) {
        let shared = weak.clone();
        let dialog_attribute = attributes.dialog.clone();
        let element = trigger.clone();
        listeners.push(EventListener::new(&trigger, "click", move |_| {
            if let Some(dialog) = enclosing_dialog(&element, &dialog_attribute) {
                deliver(&shared, ModalEvent::CloseTrigger { dialog });
            }
        }));
    }

    for chain_attribute in [&attributes.prev, &attributes.next] {
        for trigger in query_all(&document, chain_attribute) {
            let shared = weak.clone();
            let dialog_attribute = attributes.dialog.clone();
            let chain_attribute = chain_attribute.clone();
            let element = trigger.clone();
            listeners.push(EventListener::new(&trigger, "click", move |_| {
                let Some(dialog) = enclosing_dialog(&element, &dialog_attribute) else {
                    return;
                };
                if let Some(target) = element.get_attribute(&chain_attribute) {
                    deliver(&shared, ModalEvent::ChainTrigger {
                        dialog,
                        target: DialogId::from(target),
                    });
                }
            }));
        }
    }

    for (id, dialog) in &dialogs {
        listeners.extend(bind_dialog(&weak, id, dialog, &attributes.container));
    }

    info!(
        dialogs = dialogs.len(),
        listeners = listeners.len(),
        "Modals bound to document"
    );
    Ok(ModalHandle {
        shared,
        _listeners: listeners,
    })
}

/// Backdrop click, Escape/cancel and transition-end listeners for one dialog.
fn bind_dialog(
    weak: &Weak<RefCell<Shared>>,
    id: &DialogId,
    dialog: &HtmlDialogElement,
    container_attribute: &str,
) -> [EventListener; 4] {
    let click = {
        let shared = weak.clone();
        let dialog_id = id.clone();
        let container = MarkupAttributes::selector(container_attribute);
        EventListener::new(dialog, "click", move |event| {
            let inside_container = target_element(event)
                .and_then(|target| target.closest(&container).ok().flatten())
                .is_some();
            deliver(&shared, ModalEvent::BackdropClick {
                dialog: dialog_id.clone(),
                inside_container,
            });
        })
    };

    let keydown = {
        let shared = weak.clone();
        let dialog_id = id.clone();
        EventListener::new_with_options(
            dialog,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let is_escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|event| event.key() == "Escape");
                if !is_escape {
                    return;
                }
                let dispatch = deliver(&shared, ModalEvent::Cancel {
                    dialog: dialog_id.clone(),
                });
                if dispatch.prevent_default {
                    event.prevent_default();
                }
            },
        )
    };

    // Native cancel (e.g. a platform back gesture) would close the dialog
    // without our cleanup, so it is always suppressed.
    let cancel = {
        let shared = weak.clone();
        let dialog_id = id.clone();
        EventListener::new_with_options(
            dialog,
            "cancel",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                deliver(&shared, ModalEvent::Cancel {
                    dialog: dialog_id.clone(),
                });
            },
        )
    };

    let transition_end = {
        let shared = weak.clone();
        let dialog_id = id.clone();
        EventListener::new(dialog, "transitionend", move |_| {
            let dispatch = deliver(&shared, ModalEvent::TransitionEnd {
                dialog: dialog_id.clone(),
            });
            if !dispatch.handled {
                debug!(dialog = %dialog_id, "transitionend outside a close");
            }
        })
    };

    [click, keydown, cancel, transition_end]
}
