use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Sink for warn-mode validation summaries.
pub trait ValidationLogger: fmt::Debug + Send + Sync {
    /// `context` is the subject tag, e.g. `server:atlas`.
    fn warn(&self, message: &str, context: Option<&str>);
}

pub type SharedLogger = Arc<dyn ValidationLogger>;

/// Forwards to the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLogger;

impl ValidationLogger for LogLogger {
    fn warn(&self, message: &str, context: Option<&str>) {
        match context {
            Some(context) => log::warn!("[{context}] {message}"),
            None => log::warn!("{message}"),
        }
    }
}

pub(crate) fn default_logger() -> SharedLogger {
    Arc::new(LogLogger)
}

/// Keeps every warning in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(String, Option<String>)>>,
}

impl MemoryLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Recorded `(message, context)` pairs, oldest first.
    pub fn entries(&self) -> Vec<(String, Option<String>)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|(m, _)| m).collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ValidationLogger for MemoryLogger {
    fn warn(&self, message: &str, context: Option<&str>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((message.to_string(), context.map(str::to_string)));
    }
}
