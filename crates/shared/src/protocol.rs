use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{DestinationKind, DestinationId, ServerId};

fn enabled_by_default() -> bool {
    true
}

/// Create/update body for `/servers`.
///
/// On update, empty secrets leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRequest {
    pub name: String,
    pub server_url: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_secret: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub master_password: String,
    #[serde(default)]
    pub is_official: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Create/update body for `/destinations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DestinationKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub local_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub webdav_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub webdav_username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub webdav_password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub webdav_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub s3_endpoint: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub s3_region: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub s3_bucket: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub s3_access_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub s3_secret_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub s3_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_server_id: Option<ServerId>,
    #[serde(default)]
    pub encrypted: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub encryption_password: String,
    #[serde(default)]
    pub max_backup_count: u32,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

/// Create/update body for `/tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub name: String,
    pub source_server_id: ServerId,
    #[serde(default)]
    pub cron_expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub destination_ids: Vec<DestinationId>,
}

/// Body carrying only `enabled`; the backend treats it as an on/off switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledPatch {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_page: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl Pagination {
    /// Page the response describes. The backend echoes `page=0` (or an
    /// absent page) back unchanged while serving page 1.
    pub fn current_page(&self) -> u32 {
        self.page.max(1)
    }
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.pagination.current_page() < self.pagination.total_page
    }
}

/// `{"message": ...}` acknowledgement of delete, execute and toggle calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of a create or update.
///
/// Tasks may come back wrapped as `{"data": ..., "warning": ...}` when the
/// record was stored but the backend scheduler could not pick it up.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved<T> {
    pub record: T,
    pub warning: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SaveEnvelope<T> {
    Warned { data: T, warning: String },
    Bare(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Saved<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match SaveEnvelope::deserialize(deserializer)? {
            SaveEnvelope::Warned { data, warning } => Saved {
                record: data,
                warning: Some(warning),
            },
            SaveEnvelope::Bare(record) => Saved {
                record,
                warning: None,
            },
        })
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
