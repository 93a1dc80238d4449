//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::pipeline::PipelineError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Hide internal error details when running in production.
    pub fn for_config(self, config: &ApiConfig) -> Self {
        match self {
            ApiError::Internal(_) if config.is_production() => {
                ApiError::internal("An internal error occurred")
            }
            other => other,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        use facelens_media::MediaError;

        match e {
            PipelineError::Media(MediaError::UnsupportedFormat(msg)) => {
                ApiError::UnsupportedMedia(msg)
            }
            PipelineError::Media(MediaError::Empty) => ApiError::bad_request("Empty image upload"),
            PipelineError::Media(MediaError::Decode(msg)) => {
                ApiError::bad_request(format!("Could not read image: {}", msg))
            }
            PipelineError::Media(MediaError::Encode(msg)) => ApiError::internal(msg),
            PipelineError::Task(msg) => ApiError::internal(msg),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: &str) -> ApiConfig {
        ApiConfig {
            environment: environment.to_string(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn test_internal_details_hidden_in_production() {
        let err = ApiError::from(PipelineError::Task("worker panicked".to_string()))
            .for_config(&config("production"));
        assert_eq!(err.to_string(), "Internal error: An internal error occurred");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_details_kept_in_development() {
        let err = ApiError::from(PipelineError::Task("worker panicked".to_string()))
            .for_config(&config("development"));
        assert_eq!(err.to_string(), "Internal error: worker panicked");
    }

    #[test]
    fn test_client_errors_not_redacted() {
        let err = ApiError::bad_request("Missing image field").for_config(&config("production"));
        assert_eq!(err.to_string(), "Bad request: Missing image field");
    }
}
