//! Errors surfaced at the JavaScript boundary.

use modal_chain_core::ModalError;

/// Setup and request failures of the browser binding.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("No global window")]
    NoWindow,
    #[error("Window has no document")]
    NoDocument,
    #[error("Document has no body")]
    NoBody,
    #[error("Invalid modal config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error("Modals are not bound to the document yet")]
    NotBound,
    #[error("Modal controller is busy handling another event")]
    Busy,
    #[error(transparent)]
    Rejected(#[from] ModalError),
}

#[cfg(target_arch = "wasm32")]
impl From<WebError> for wasm_bindgen::JsValue {
    fn from(err: WebError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
