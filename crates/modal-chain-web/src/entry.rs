//! JavaScript entry points.
//!
//! `start` runs on module load and binds the document with the config found
//! on `<body data-modal-config>`. Pages that prefer to configure from script
//! call `initModals(config)` instead, which replaces any earlier binding.

use std::cell::RefCell;

use modal_chain_core::ModalConfig;
use tracing::{error, info};
use wasm_bindgen::prelude::*;

use crate::binding::{ModalHandle, bind_document, read_document_config};
use crate::error::WebError;
use crate::logging::init_logging;

/// Body attribute holding an optional `tracing` filter directive.
const LOG_ATTRIBUTE: &str = "data-modal-log";

thread_local! {
    static HANDLE: RefCell<Option<ModalHandle>> = const { RefCell::new(None) };
}

fn log_directive() -> Option<String> {
    web_sys::window()?
        .document()?
        .body()?
        .get_attribute(LOG_ATTRIBUTE)
}

fn install(config: ModalConfig) -> Result<(), WebError> {
    let handle = bind_document(config)?;
    let previous = HANDLE.with(|slot| {
        // Held for reading while a script call is being handled
        let mut slot = slot.try_borrow_mut().map_err(|_| WebError::Busy)?;
        Ok::<_, WebError>(slot.replace(handle))
    })?;
    // Released outside the slot borrow: unbinding closes dialogs and scrolls,
    // and page listeners may call back into these entry points.
    drop(previous);
    Ok(())
}

fn with_handle<R>(f: impl FnOnce(&ModalHandle) -> Result<R, WebError>) -> Result<R, WebError> {
    HANDLE.with(|slot| match slot.borrow().as_ref() {
        Some(handle) => f(handle),
        None => Err(WebError::NotBound),
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_logging(log_directive().as_deref());

    let result = read_document_config().and_then(install);
    if let Err(err) = &result {
        error!(%err, "Failed to bind modals");
    }
    result.map_err(JsValue::from)
}

/// Rebinds the document with an explicit config object. `undefined` or
/// `null` uses the defaults.
#[wasm_bindgen(js_name = initModals)]
pub fn init_modals(config: JsValue) -> Result<(), JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        ModalConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    install(config)?;
    info!("Modals rebound from script");
    Ok(())
}

#[wasm_bindgen(js_name = openModal)]
pub fn open_modal(id: &str) -> Result<(), JsValue> {
    with_handle(|handle| handle.open(id)).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal(id: &str) -> Result<(), JsValue> {
    with_handle(|handle| handle.close(id)).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = switchModal)]
pub fn switch_modal(current: &str, next: &str) -> Result<(), JsValue> {
    with_handle(|handle| handle.switch_modal(current, next)).map_err(JsValue::from)
}

/// Current phase name of `id` (`"closed"`, `"opening"`, `"open"`,
/// `"closing"`), or `undefined` for an unknown dialog.
#[wasm_bindgen(js_name = modalPhase)]
pub fn modal_phase(id: &str) -> Option<String> {
    with_handle(|handle| Ok(handle.phase(id).map(|phase| phase.to_string())))
        .ok()
        .flatten()
}
