//! Error types for media extraction.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while driving the extraction tool.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("yt-dlp not found. Install yt-dlp and ensure it is in your PATH or working directory")]
    ToolNotFound,

    #[error("Extraction timed out after {0} seconds")]
    Timeout(u64),

    #[error("Tool output exceeded the {0} byte limit")]
    OutputOverflow(usize),

    #[error("This video is private or requires authentication")]
    AuthRequired,

    #[error("Video is unavailable or has been removed")]
    Unavailable,

    #[error("Extraction failed: {message}")]
    ExtractionFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("Failed to parse video information: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Download cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create an extraction failure with no captured diagnostics.
    pub fn extraction_failed(message: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            message: message.into(),
            stderr: None,
            exit_code: None,
        }
    }

    /// Classify a failed tool run from its captured stderr.
    ///
    /// Best-effort substring matching against the tool's known error
    /// phrases; unrecognized text falls through to `ExtractionFailed`
    /// with the last diagnostic line as the message.
    pub fn from_tool_failure(stderr: &str, exit_code: Option<i32>) -> Self {
        if stderr.contains("Private video") || stderr.contains("Sign in") {
            return Self::AuthRequired;
        }
        if stderr.contains("Video unavailable") {
            return Self::Unavailable;
        }

        let message = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("Unknown error")
            .trim()
            .to_string();

        Self::ExtractionFailed {
            message,
            stderr: Some(stderr.to_string()),
            exit_code,
        }
    }
}
