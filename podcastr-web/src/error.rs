//! Error types for podcastr-web
//!
//! Defines the service error type and its HTTP mapping.

use crate::player::PlayerError;
use crate::source::SourceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Main error type for podcastr-web
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration, formatting and other shared errors
    #[error(transparent)]
    Common(#[from] podcastr_common::Error),

    /// Episode source failures
    #[error("Episode source error: {0}")]
    Source(#[from] SourceError),

    /// Rejected player commands
    #[error("Player error: {0}")]
    Player(#[from] PlayerError),
}

/// Convenience Result type using podcastr-web Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Source(SourceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Error::Source(_) => StatusCode::BAD_GATEWAY,
            // Malformed records come from upstream
            Error::Common(podcastr_common::Error::InvalidInput(_)) => StatusCode::BAD_GATEWAY,
            Error::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Player(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (
            status,
            Json(json!({
                "status": "error",
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::from(SourceError::NotFound("x".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::from(SourceError::Network("refused".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            Error::from(PlayerError::InvalidIndex { index: 1, len: 0 }).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::from(podcastr_common::Error::InvalidInput("date".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
