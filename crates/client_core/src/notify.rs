//! Transient operator feedback (toasts).
//!
//! Views register a single [`ToastSink`]; until then every message is
//! dropped with a warning so early startup code can notify unconditionally.

use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// Displays toasts. Implemented by whatever front end is running.
pub trait ToastSink: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);
}

#[derive(Clone, Default)]
pub struct Notifier {
    sink: Arc<RwLock<Option<Arc<dyn ToastSink>>>>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("registered", &self.is_registered())
            .finish()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `sink`, replacing any previous one.
    pub fn set_sink(&self, sink: Arc<dyn ToastSink>) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = Some(sink);
    }

    pub fn is_registered(&self) -> bool {
        self.current().is_some()
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.notify(Severity::Success, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.notify(Severity::Error, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.notify(Severity::Warning, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.notify(Severity::Info, message);
    }

    pub fn notify(&self, severity: Severity, message: impl AsRef<str>) {
        let Some(sink) = self.current() else {
            warn!(?severity, "toast sink not initialized");
            return;
        };
        let message = message.as_ref();
        match severity {
            Severity::Success => sink.success(message),
            Severity::Error => sink.error(message),
            Severity::Warning => sink.warning(message),
            Severity::Info => sink.info(message),
        }
    }

    /// Shows `err` as an error toast.
    pub fn report(&self, err: &dyn std::error::Error) {
        self.error(err.to_string());
    }

    fn current(&self) -> Option<Arc<dyn ToastSink>> {
        self.sink
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
#[path = "tests/notify_tests.rs"]
mod tests;
