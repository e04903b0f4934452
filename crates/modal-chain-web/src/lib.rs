//! Modal-Chain Web
//!
//! Binds [`modal_chain_core::ModalController`] to `<dialog>` elements in the
//! current document: discovers dialogs and triggers from `data-modal*`
//! attributes, forwards clicks, Escape and transition events, and applies
//! the controller's side effects through `web-sys`.
//!
//! The DOM binding and the JavaScript entry points only exist on wasm32;
//! native builds carry just the config parsing and error types. Build the
//! module with `cargo build -p modal-chain-web --target wasm32-unknown-unknown`.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod error;

#[cfg(target_arch = "wasm32")]
mod binding;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod entry;
#[cfg(target_arch = "wasm32")]
mod logging;

pub use config::{CONFIG_ATTRIBUTE, parse_config};
pub use error::WebError;

#[cfg(target_arch = "wasm32")]
pub use binding::{ModalHandle, bind_document, read_document_config};
#[cfg(target_arch = "wasm32")]
pub use logging::init_logging;
