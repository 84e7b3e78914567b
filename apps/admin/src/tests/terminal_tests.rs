use std::io::Cursor;

use client_core::{ConfirmOptions, ConfirmWorkflow, DialogKind};

use super::*;

fn dialog(confirm_text: &str) -> ConfirmDialog {
    let workflow = ConfirmWorkflow::new();
    let _pending = workflow.confirm(
        ConfirmOptions::new()
            .title("Delete task")
            .message("Task 7 will be removed.")
            .kind(DialogKind::Danger)
            .confirm_text(confirm_text),
    );
    workflow.state()
}

fn answer(confirm_text: &str, input: &str) -> (bool, String) {
    let mut output = Vec::new();
    let accepted = prompt(&dialog(confirm_text), Cursor::new(input), &mut output).expect("prompt");
    (accepted, String::from_utf8(output).expect("utf8"))
}

#[test]
fn prompt_renders_dialog_text() {
    let (_, output) = answer("Delete", "n\n");
    assert!(output.starts_with("!! Delete task\n"));
    assert!(output.contains("Task 7 will be removed."));
    assert!(output.contains("Delete"));
    assert!(output.contains("Cancel"));
}

#[test]
fn prompt_accepts_yes_and_confirm_text() {
    assert!(answer("Delete", "y\n").0);
    assert!(answer("Delete", "YES\n").0);
    assert!(answer("Delete", "  delete \n").0);
}

#[test]
fn prompt_declines_other_input_and_eof() {
    assert!(!answer("Delete", "n\n").0);
    assert!(!answer("Delete", "\n").0);
    assert!(!answer("Delete", "").0);
}

#[tokio::test]
async fn failed_read_cancels_the_request() {
    let workflow = ConfirmWorkflow::new();
    let pending = workflow.confirm(ConfirmOptions::new().title("Delete task"));

    let err = answer_with(&workflow, |_| {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"))
    })
    .await
    .expect_err("read failure");

    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert!(!workflow.is_pending());
    assert!(!workflow.state().visible);
    assert_eq!(pending.await, Ok(false));
}

#[tokio::test]
async fn answer_is_applied_to_the_workflow() {
    let workflow = ConfirmWorkflow::new();
    let pending = workflow.confirm(ConfirmOptions::new());

    answer_with(&workflow, |dialog| {
        assert!(dialog.visible);
        Ok(true)
    })
    .await
    .expect("answer");

    assert_eq!(pending.await, Ok(true));
}

#[test]
fn toast_lines_are_prefixed_by_severity() {
    let toast = TerminalToast::new(Vec::new());
    toast.success("Server created");
    toast.error("HTTP 500");
    toast.warning("scheduler offline");
    toast.info("nothing to do");

    let written = String::from_utf8(toast.into_inner()).expect("utf8");
    assert_eq!(
        written,
        "ok: Server created\nerror: HTTP 500\nwarning: scheduler offline\ninfo: nothing to do\n"
    );
}
