//! egui projection of the embedded dialog.
//!
//! - `modal`: walks the dialog's document subtree and draws it
//! - `theme`: colors for the modal surface, text and buttons

pub mod modal;
pub mod theme;

pub use modal::render_modal;
pub use theme::ModalTheme;
