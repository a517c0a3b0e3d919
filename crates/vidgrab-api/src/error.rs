//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use vidgrab_media::MediaError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the API endpoints.
///
/// Each maps to one status class and a small `{error}` JSON body; no
/// internal paths or stack traces ever reach the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Unsupported platform. Supported: YouTube, TikTok, Instagram, Facebook, Twitter/X, Reddit, DailyMotion")]
    UnsupportedPlatform,

    #[error("This video is private or requires authentication")]
    AuthRequired,

    #[error("Video is unavailable or has been removed")]
    Unavailable,

    #[error("{0}")]
    ToolUnavailable(String),

    #[error("Request timed out while contacting the video source")]
    Timeout,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::UnsupportedPlatform => StatusCode::BAD_REQUEST,
            ApiError::AuthRequired => StatusCode::FORBIDDEN,
            ApiError::Unavailable => StatusCode::NOT_FOUND,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::ToolUnavailable(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::ToolNotFound => Self::ToolUnavailable(err.to_string()),
            MediaError::AuthRequired => Self::AuthRequired,
            MediaError::Unavailable => Self::Unavailable,
            MediaError::Timeout(_) => Self::Timeout,
            MediaError::JsonParse(_) => {
                Self::Internal("Failed to parse video information".to_string())
            }
            MediaError::ExtractionFailed { ref message, .. } => {
                Self::Internal(format!("Failed to fetch video info: {message}"))
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnsupportedPlatform.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::AuthRequired.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::Unavailable.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_media_error_conversion() {
        assert!(matches!(
            ApiError::from(MediaError::ToolNotFound),
            ApiError::ToolUnavailable(_)
        ));
        assert!(matches!(
            ApiError::from(MediaError::AuthRequired),
            ApiError::AuthRequired
        ));
        assert!(matches!(
            ApiError::from(MediaError::Unavailable),
            ApiError::Unavailable
        ));
        assert!(matches!(
            ApiError::from(MediaError::Timeout(20)),
            ApiError::Timeout
        ));
        assert!(matches!(
            ApiError::from(MediaError::OutputOverflow(1024)),
            ApiError::Internal(_)
        ));
    }
}
