use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(ServerId);
id_newtype!(DestinationId);
id_newtype!(TaskId);
id_newtype!(LogId);

/// Storage backend a destination writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DestinationKind {
    Local,
    WebDav,
    S3,
    Server,
    Other(String),
}

impl DestinationKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::WebDav => "webdav",
            Self::S3 => "s3",
            Self::Server => "server",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for DestinationKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "local" => Self::Local,
            "webdav" => Self::WebDav,
            "s3" => Self::S3,
            "server" => Self::Server,
            _ => Self::Other(value),
        }
    }
}

impl From<DestinationKind> for String {
    fn from(value: DestinationKind) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Success,
    Failed,
    #[serde(other)]
    Unknown,
}

/// A Bitwarden server the backend pulls vault exports from.
///
/// Secrets (`client_secret`, `master_password`) are write-only and never
/// come back from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: ServerId,
    pub name: String,
    pub server_url: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub is_official: bool,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DestinationKind,
    #[serde(default)]
    pub local_path: String,
    #[serde(default)]
    pub webdav_url: String,
    #[serde(default)]
    pub webdav_username: String,
    #[serde(default)]
    pub webdav_path: String,
    #[serde(default)]
    pub s3_endpoint: String,
    #[serde(default)]
    pub s3_region: String,
    #[serde(default)]
    pub s3_bucket: String,
    /// Masked by the backend (first and last four characters only).
    #[serde(default)]
    pub s3_access_key: String,
    #[serde(default)]
    pub s3_path: String,
    #[serde(default)]
    pub target_server_id: Option<ServerId>,
    #[serde(default)]
    pub encrypted: bool,
    /// Zero keeps every backup.
    #[serde(default)]
    pub max_backup_count: u32,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub display_path: String,
    #[serde(default)]
    pub type_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub source_server_id: ServerId,
    #[serde(default)]
    pub cron_expression: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub source_server: Server,
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

impl Task {
    pub fn is_scheduled(&self) -> bool {
        self.enabled && !self.cron_expression.trim().is_empty()
    }
}

/// One line of a backup run's execution trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: String,
    pub message: String,
}

/// History record of a single backup run. Read-only from the client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupLog {
    pub id: LogId,
    pub task_id: TaskId,
    pub status: RunStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub backup_file: String,
    /// JSON array of [`LogEntry`] encoded as a string.
    #[serde(default)]
    pub execution_logs: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl BackupLog {
    pub fn entries(&self) -> Result<Vec<LogEntry>, serde_json::Error> {
        if self.execution_logs.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&self.execution_logs)
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}
