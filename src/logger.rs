use crate::constants::LOG_BUFFER_CAPACITY;
use anyhow::{Context, Result};
use chrono::Local;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Shared logger that can be used across the application.
///
/// Entries are always kept in memory for the logs dialog. When file logging
/// is enabled they are also forwarded through the `log` facade to a file.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    file_enabled: bool,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::new())),
            file_enabled: false,
        }
    }

    /// Create a logger, installing the file dispatch when `enabled`
    pub fn from_config(enabled: bool) -> Result<Self> {
        let mut logger = Self::new();
        if enabled {
            let path = Self::get_log_file_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }

            let dispatch = fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{} {} {}] {}",
                        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                        record.level(),
                        record.target(),
                        message
                    ))
                })
                .level(log::LevelFilter::Info)
                .chain(
                    fern::log_file(&path)
                        .with_context(|| format!("Failed to open log file: {}", path.display()))?,
                );

            // A global logger may already be installed (tests create several loggers)
            if dispatch.apply().is_err() {
                log::debug!("global logger already installed, reusing it");
            }
            logger.file_enabled = true;
        }
        Ok(logger)
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if self.file_enabled {
            log::info!(target: "pitwall", "{}", message);
        }

        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() >= LOG_BUFFER_CAPACITY {
                logs.pop_front();
            }
            logs.push_back(formatted_message);
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Whether entries are also written to the log file
    pub fn is_enabled(&self) -> bool {
        self.file_enabled
    }

    /// Location of the log file
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .or_else(dirs::cache_dir)
            .map(|dir| dir.join("pitwall").join("pitwall.log"))
            .ok_or_else(|| anyhow::anyhow!("Could not determine log directory"))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
