//! Core UI functionality for Pitwall.
//!
//! # Module Components
//!
//! - [`actions`] - Action definitions and UI state transitions
//! - [`component`] - Base component trait
//! - [`event_handler`] - Terminal event polling
//! - [`task_manager`] - Background HTTP calls reported back as actions
//!
//! # Architecture
//!
//! 1. **Components** implement the [`Component`] trait and turn keys into actions
//! 2. **Actions** describe every state transition, local or remote
//! 3. **Events** are polled through the [`EventHandler`]
//! 4. **Requests** run on tokio tasks owned by the [`TaskManager`], whose
//!    results come back as actions on a channel

pub mod actions;
pub mod component;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, DialogType, EditTarget, FormToken, TablePage};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager};
