use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Coarse classification of a failed backend response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
    Other,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::Validation,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            500..=599 => Self::Internal,
            _ => Self::Other,
        }
    }
}

/// Error payload the backend attaches to non-2xx responses.
///
/// Numbers and booleans in `error` are kept as their text; `0`, `false` and
/// `""` read as no message. Objects, arrays and `null` do not decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error}")]
pub struct ErrorBody {
    #[serde(deserialize_with = "message_text")]
    pub error: String,
}

fn message_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Flag(bool),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Raw::Number(n) => n.to_string(),
        Raw::Flag(true) => "true".to_string(),
        Raw::Flag(false) => String::new(),
    })
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
