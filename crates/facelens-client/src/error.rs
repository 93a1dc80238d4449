//! Detection client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Detection service returned {status_code}: {message}")]
    Service { status_code: u16, message: String },

    #[error("Invalid detection response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn service(status_code: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status_code,
            message: message.into(),
        }
    }

    /// Service-side failures: non-200 answers and undecodable bodies.
    pub fn is_service_error(&self) -> bool {
        matches!(self, ClientError::Service { .. } | ClientError::Decode(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// HTTP status of a service error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Service { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}
