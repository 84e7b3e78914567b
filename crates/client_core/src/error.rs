use reqwest::StatusCode;
use shared::error::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx response. `message` is the backend's `error` field, or
    /// `HTTP <status>` when the body did not carry one.
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    /// The request never produced a response. Passed through untouched.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid api base url: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("api base url cannot carry a path: {0}")]
    UnusableBase(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { status, .. } => Some(ErrorCode::from_status(status.as_u16())),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == Some(ErrorCode::NotFound)
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
