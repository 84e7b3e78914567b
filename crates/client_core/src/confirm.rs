//! Ask-the-operator confirmation flow.
//!
//! [`ConfirmWorkflow::confirm`] fills in the dialog and hands back a future
//! that settles when the view calls [`ConfirmWorkflow::handle_confirm`] or
//! [`ConfirmWorkflow::handle_cancel`]. At most one request is pending; a new
//! request replaces the dialog and the replaced future settles with
//! [`ConfirmError::Superseded`].

use std::{
    fmt,
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    task::{Context, Poll},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;

pub const DEFAULT_TITLE: &str = "Confirm action";
pub const DEFAULT_MESSAGE: &str = "Are you sure you want to perform this action?";
pub const DEFAULT_CONFIRM_TEXT: &str = "Confirm";
pub const DEFAULT_CANCEL_TEXT: &str = "Cancel";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    #[default]
    Warning,
    Danger,
    Info,
}

/// Text for one confirmation. Unset or empty fields fall back to the
/// `DEFAULT_*` constants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmOptions {
    pub title: Option<String>,
    pub message: Option<String>,
    pub kind: Option<DialogKind>,
    pub confirm_text: Option<String>,
    pub cancel_text: Option<String>,
}

impl ConfirmOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn kind(mut self, kind: DialogKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = Some(text.into());
        self
    }

    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = Some(text.into());
        self
    }
}

/// What a view needs to render the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmDialog {
    pub visible: bool,
    pub title: String,
    pub message: String,
    pub kind: DialogKind,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self {
            visible: false,
            title: DEFAULT_TITLE.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            kind: DialogKind::default(),
            confirm_text: DEFAULT_CONFIRM_TEXT.to_string(),
            cancel_text: DEFAULT_CANCEL_TEXT.to_string(),
        }
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl ConfirmDialog {
    fn shown(options: ConfirmOptions) -> Self {
        Self {
            visible: true,
            title: or_default(options.title, DEFAULT_TITLE),
            message: or_default(options.message, DEFAULT_MESSAGE),
            kind: options.kind.unwrap_or_default(),
            confirm_text: or_default(options.confirm_text, DEFAULT_CONFIRM_TEXT),
            cancel_text: or_default(options.cancel_text, DEFAULT_CANCEL_TEXT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfirmError {
    #[error("confirmation was replaced by a newer request")]
    Superseded,
    #[error("confirmation closed before an answer was given")]
    Closed,
}

#[derive(Debug)]
enum Answer {
    Decided(bool),
    Superseded,
}

#[derive(Debug, Default)]
struct ConfirmState {
    dialog: ConfirmDialog,
    resolver: Option<oneshot::Sender<Answer>>,
}

/// Shared confirmation state. Clones observe and drive the same dialog.
#[derive(Clone, Default)]
pub struct ConfirmWorkflow {
    state: Arc<Mutex<ConfirmState>>,
}

impl fmt::Debug for ConfirmWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("ConfirmWorkflow")
            .field("dialog", &state.dialog)
            .field("pending", &state.resolver.is_some())
            .finish()
    }
}

impl ConfirmWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm(&self, options: ConfirmOptions) -> PendingConfirmation {
        let (tx, rx) = oneshot::channel();
        let mut state = self.lock();
        if let Some(previous) = state.resolver.replace(tx) {
            debug!("superseding pending confirmation");
            let _ = previous.send(Answer::Superseded);
        }
        state.dialog = ConfirmDialog::shown(options);
        debug!(title = %state.dialog.title, "confirmation requested");
        PendingConfirmation { rx }
    }

    pub fn handle_confirm(&self) {
        self.resolve(true);
    }

    pub fn handle_cancel(&self) {
        self.resolve(false);
    }

    pub fn state(&self) -> ConfirmDialog {
        self.lock().dialog.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().resolver.is_some()
    }

    fn resolve(&self, answer: bool) {
        let mut state = self.lock();
        if let Some(resolver) = state.resolver.take() {
            debug!(answer, "confirmation answered");
            let _ = resolver.send(Answer::Decided(answer));
        }
        state.dialog.visible = false;
    }

    fn lock(&self) -> MutexGuard<'_, ConfirmState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Settles with the operator's answer, or an error if the request was
/// replaced or the workflow went away.
#[derive(Debug)]
#[must_use = "the answer is only observed by awaiting the confirmation"]
pub struct PendingConfirmation {
    rx: oneshot::Receiver<Answer>,
}

impl Future for PendingConfirmation {
    type Output = Result<bool, ConfirmError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|answer| match answer {
            Ok(Answer::Decided(answer)) => Ok(answer),
            Ok(Answer::Superseded) => Err(ConfirmError::Superseded),
            Err(_) => Err(ConfirmError::Closed),
        })
    }
}

#[cfg(test)]
#[path = "tests/confirm_tests.rs"]
mod tests;
