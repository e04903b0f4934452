//! Modal-Chain Core Library
//!
//! Host-agnostic lifecycle state machine for modal dialogs: opening, closing
//! and chaining dialogs while keeping page scroll, focus and the inert
//! background in step.
//!
//! The browser binding lives in `modal-chain-web`; everything here talks to
//! the page only through the [`ModalHost`] trait, so it runs (and is tested)
//! without a DOM.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod event;
pub mod host;
pub mod page;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ModalConfig, ScrollLock};
pub use controller::ModalController;
pub use dialog::{DialogId, DialogPhase};
pub use error::ModalError;
pub use event::{Dispatch, ModalEvent};
pub use host::ModalHost;
pub use page::{InertBarrier, PageContext, PageScrollState};
