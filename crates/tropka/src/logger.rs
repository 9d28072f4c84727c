// File: src/logger.rs
// Purpose: Per-build logger threaded through the registration pipeline

use std::sync::{Arc, Mutex};

/// Severity of a [`LogRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// A single log line captured during a router build.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Logger constructed fresh for every [`create_router`](crate::create_router)
/// call and passed down to each pipeline stage.
///
/// Lines are emitted through `tracing` and captured into an inspectable
/// buffer, so callers can assert on the exact output of a build. A quiet
/// logger drops lines entirely. Cloning shares the buffer.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    quiet: bool,
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl Logger {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message.into());
    }

    /// All lines captured so far, in emission order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn log(&self, level: LogLevel, message: String) {
        if self.quiet {
            return;
        }

        match level {
            LogLevel::Info => tracing::info!(target: "tropka", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "tropka", "{message}"),
            LogLevel::Error => tracing::error!(target: "tropka", "{message}"),
        }

        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(LogRecord { level, message });
    }
}
