//! Status line under the tables

use crate::constants::STATUS_MAX_WIDTH;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    fn color(&self) -> Color {
        match self {
            Severity::Info => Color::Cyan,
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

/// Last success or error message, shown until replaced or expired.
pub struct StatusBar {
    message: Option<StatusMessage>,
    timeout: Option<Duration>,
}

impl StatusBar {
    /// `timeout_secs == 0` keeps messages until the next one
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            message: None,
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        }
    }

    pub fn show(&mut self, text: impl Into<String>, severity: Severity) {
        let mut text: String = text.into();
        if text.chars().count() > STATUS_MAX_WIDTH {
            text = text.chars().take(STATUS_MAX_WIDTH - 1).collect::<String>() + "…";
        }
        self.message = Some(StatusMessage {
            text,
            severity,
            shown_at: Instant::now(),
        });
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Drop the message once it is older than the timeout
    pub fn expire(&mut self, now: Instant) {
        if let (Some(message), Some(timeout)) = (&self.message, self.timeout) {
            if now.duration_since(message.shown_at) >= timeout {
                self.message = None;
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, busy: bool, hints: &str) {
        let line = match &self.message {
            Some(message) => Line::from(Span::styled(
                message.text.clone(),
                Style::default().fg(message.severity.color()),
            )),
            None if busy => Line::from(Span::styled("⟳ Working…", Style::default().fg(Color::Yellow))),
            None => Line::from(Span::styled(hints.to_string(), Style::default().fg(Color::Gray))),
        };

        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}
