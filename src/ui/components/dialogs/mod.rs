//! Rendering helpers for the modal dialogs

pub mod common;
pub mod form_dialogs;
pub mod scroll_behavior;
pub mod system_dialogs;
