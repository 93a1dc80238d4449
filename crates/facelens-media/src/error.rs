//! Error types for image operations.

use thiserror::Error;

/// Result type for image operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while decoding, encoding or drawing images.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Empty image data")]
    Empty,
}

impl MediaError {
    /// Create a decode failure error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create an encode failure error.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode(message.into())
    }
}
