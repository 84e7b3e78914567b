//! Terminal front end for toasts and confirmation dialogs.

use std::{
    io::{self, BufRead, Write},
    sync::{Mutex, PoisonError},
};

use client_core::{ConfirmDialog, ConfirmWorkflow, DialogKind, ToastSink};
use tracing::debug;

/// Writes one prefixed line per toast.
pub struct TerminalToast<W> {
    out: Mutex<W>,
}

impl TerminalToast<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> TerminalToast<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn line(&self, prefix: &str, message: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        // A closed stderr leaves nowhere to report to.
        let _ = writeln!(out, "{prefix}: {message}");
        let _ = out.flush();
    }
}

impl<W: Write + Send> ToastSink for TerminalToast<W> {
    fn success(&self, message: &str) {
        self.line("ok", message);
    }

    fn error(&self, message: &str) {
        self.line("error", message);
    }

    fn warning(&self, message: &str) {
        self.line("warning", message);
    }

    fn info(&self, message: &str) {
        self.line("info", message);
    }
}

/// Renders `dialog` to `output` and reads one answer from `input`.
///
/// `y`, `yes` and the dialog's confirm text (any case) accept. Anything
/// else, end of input included, declines.
pub fn prompt<R: BufRead, W: Write>(
    dialog: &ConfirmDialog,
    mut input: R,
    mut output: W,
) -> io::Result<bool> {
    let marker = match dialog.kind {
        DialogKind::Danger => "!!",
        DialogKind::Warning => "!",
        DialogKind::Info => "?",
    };
    writeln!(output, "{marker} {}", dialog.title)?;
    writeln!(output, "  {}", dialog.message)?;
    write!(
        output,
        "  [y/{}] to {}, anything else to {}: ",
        dialog.confirm_text.to_lowercase(),
        dialog.confirm_text,
        dialog.cancel_text
    )?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    let answer = line.trim();
    Ok(answer.eq_ignore_ascii_case("y")
        || answer.eq_ignore_ascii_case("yes")
        || answer.eq_ignore_ascii_case(dialog.confirm_text.trim()))
}

/// Shows the pending dialog on stderr and answers it from stdin.
pub async fn ask(workflow: &ConfirmWorkflow) -> io::Result<()> {
    answer_with(workflow, |dialog| prompt(&dialog, io::stdin().lock(), io::stderr())).await
}

/// Answers the pending dialog with `read`, run off the async threads.
/// A failed read cancels the request before the error is returned.
async fn answer_with<F>(workflow: &ConfirmWorkflow, read: F) -> io::Result<()>
where
    F: FnOnce(ConfirmDialog) -> io::Result<bool> + Send + 'static,
{
    let dialog = workflow.state();
    let answer = tokio::task::spawn_blocking(move || read(dialog))
        .await
        .map_err(io::Error::other)
        .and_then(|answer| answer);

    match answer {
        Ok(true) => {
            debug!("operator confirmed");
            workflow.handle_confirm();
            Ok(())
        }
        Ok(false) => {
            debug!("operator cancelled");
            workflow.handle_cancel();
            Ok(())
        }
        Err(err) => {
            workflow.handle_cancel();
            Err(err)
        }
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
