//! Embedded mobile wallet connect dialog.
//!
//! This module re-exports the core components for testing and embedding.

pub mod app;
pub mod backend;
pub mod config;
pub mod dialog;
pub mod dom;
pub mod markup;
pub mod protocol;
pub mod status;
pub mod ui;


pub use dialog::EmbeddedModalDialog;
pub use status::ConnectionStatus;
