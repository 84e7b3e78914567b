use super::*;
use crate::domain::{BackupLog, LogEntry, RunStatus, Server, Task, TaskId};
use serde_json::json;

fn server_json(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "name": "vault",
        "server_url": "https://vault.example.com",
        "client_id": "user.abcd",
        "is_official": false,
        "enabled": true,
        "created_at": "2024-05-01T10:00:00+08:00",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

fn task_json() -> serde_json::Value {
    json!({
        "id": 3,
        "name": "nightly",
        "source_server_id": 1,
        "cron_expression": "0 2 * * *",
        "enabled": true,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z",
        "source_server": server_json(1),
        "destinations": [{
            "id": 9,
            "name": "nas",
            "type": "webdav",
            "webdav_url": "https://nas.local/dav",
            "enabled": true,
            "encrypted": false,
            "max_backup_count": 7,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z",
            "display_path": "https://nas.local/dav",
            "type_label": "WebDAV"
        }]
    })
}

#[test]
fn decodes_paginated_servers() {
    let page: Page<Server> = serde_json::from_value(json!({
        "data": [server_json(1), server_json(2)],
        "pagination": {"page": 1, "page_size": 10, "total": 12, "total_page": 2}
    }))
    .expect("page");

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[1].id.0, 2);
    assert_eq!(page.pagination.total, 12);
    assert!(page.has_next());
}

#[test]
fn unset_page_counts_as_first_page() {
    let page: Page<Server> = serde_json::from_value(json!({
        "data": [server_json(1)],
        "pagination": {"page": 0, "page_size": 10, "total": 11, "total_page": 2}
    }))
    .expect("page");
    assert_eq!(page.pagination.current_page(), 1);
    assert!(page.has_next());

    let single: Page<Server> = serde_json::from_value(json!({
        "data": [],
        "pagination": {"page": 0, "page_size": 10, "total": 0, "total_page": 1}
    }))
    .expect("page");
    assert!(!single.has_next());
}

#[test]
fn default_task_request_is_constructible() {
    let request = TaskRequest {
        name: "nightly".into(),
        ..TaskRequest::default()
    };
    assert_eq!(request.source_server_id, ServerId(0));
    let body = serde_json::to_value(&request).expect("body");
    assert_eq!(body["source_server_id"], json!(0));
    assert!(body.get("enabled").is_none());
}

#[test]
fn saved_accepts_bare_record() {
    let saved: Saved<Task> = serde_json::from_value(task_json()).expect("task");
    assert_eq!(saved.record.id, TaskId(3));
    assert!(saved.warning.is_none());
    assert!(saved.record.is_scheduled());
    assert_eq!(saved.record.destinations[0].kind, DestinationKind::WebDav);
}

#[test]
fn saved_unwraps_scheduler_warning_envelope() {
    let saved: Saved<Task> = serde_json::from_value(json!({
        "data": task_json(),
        "warning": "task saved but scheduler sync failed"
    }))
    .expect("warned task");
    assert_eq!(saved.record.name, "nightly");
    assert_eq!(
        saved.warning.as_deref(),
        Some("task saved but scheduler sync failed")
    );
}

#[test]
fn unknown_destination_kind_is_retained() {
    let kind: DestinationKind = serde_json::from_value(json!("ftp")).expect("kind");
    assert_eq!(kind, DestinationKind::Other("ftp".into()));
    assert_eq!(serde_json::to_value(&kind).expect("encode"), json!("ftp"));
}

#[test]
fn server_request_omits_empty_secrets() {
    let request = ServerRequest {
        name: "vault".into(),
        server_url: "https://vault.example.com".into(),
        ..ServerRequest::default()
    };
    let body = serde_json::to_value(&request).expect("encode");
    assert!(body.get("client_secret").is_none());
    assert!(body.get("master_password").is_none());
    assert!(body.get("enabled").is_none());
}

#[test]
fn destination_request_defaults_to_enabled() {
    let request: DestinationRequest = serde_json::from_value(json!({
        "name": "disk",
        "type": "local",
        "local_path": "/srv/backup"
    }))
    .expect("request");
    assert!(request.enabled);
    assert_eq!(request.kind, DestinationKind::Local);
}

#[test]
fn enabled_patch_carries_only_enabled() {
    let body = serde_json::to_value(EnabledPatch { enabled: false }).expect("encode");
    assert_eq!(body, json!({"enabled": false}));
}

#[test]
fn backup_log_decodes_execution_entries() {
    let log: BackupLog = serde_json::from_value(json!({
        "id": 5,
        "task_id": 3,
        "status": "success",
        "message": "done",
        "backup_file": "vault-20240501.json",
        "execution_logs": "[{\"time\":\"10:00:01\",\"message\":\"export started\"}]",
        "start_time": "2024-05-01T10:00:00Z",
        "end_time": null,
        "created_at": "2024-05-01T10:00:00Z"
    }))
    .expect("log");

    assert_eq!(log.status, RunStatus::Success);
    assert!(!log.is_finished());
    assert_eq!(
        log.entries().expect("entries"),
        vec![LogEntry {
            time: "10:00:01".into(),
            message: "export started".into()
        }]
    );
}

#[test]
fn unknown_run_status_does_not_fail_decoding() {
    let status: RunStatus = serde_json::from_value(json!("queued")).expect("status");
    assert_eq!(status, RunStatus::Unknown);
}

#[test]
fn ack_tolerates_missing_message() {
    let ack: Ack = serde_json::from_value(json!({})).expect("ack");
    assert_eq!(ack, Ack::default());
}
