//! Pitwall - A Terminal User Interface (TUI) for a racing administration server
//!
//! This library provides a terminal-based interface for managing pilots,
//! cars and races over the server's REST API. It includes paginated tables,
//! validated form dialogs and a rich interactive UI built with Ratatui.
//!
//! # Modules
//!
//! * [`api`] - REST client and its error type
//! * [`config`] - Application configuration management
//! * [`forms`] - Form state and client-side validation
//! * [`models`] - Pilots, cars, races and page envelopes
//! * [`ui`] - Terminal user interface components

/// REST client for the race server
pub mod api;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Form buffers, validation and payload building
pub mod forms;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Domain records and wire payloads
pub mod models;

/// Terminal user interface components and rendering
pub mod ui;

pub use models::{Car, EntityKind, Pilot, Race};
