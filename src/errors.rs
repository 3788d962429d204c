use axum::http::StatusCode;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode storage contents: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage quota exceeded writing '{key}' ({needed} of {quota} bytes)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
}

#[derive(Debug, Error)]
pub enum HydrateError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("stored team is not valid JSON: {0}")]
    CorruptTeam(#[source] serde_json::Error),

    #[error("stored late limit '{value}' is not an integer")]
    InvalidLimit {
        value: String,
        #[source]
        source: ParseIntError,
    },
}
