//! Face-analysis service HTTP client.

use std::fmt;
use std::time::{Duration, Instant};

use facelens_models::{DetectionResponse, RETURN_ATTRIBUTES};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// Default detection endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api-us.faceplusplus.com/facepp/v3/detect";

pub const API_KEY_VAR: &str = "FACEPP_API_KEY";
pub const API_SECRET_VAR: &str = "FACEPP_API_SECRET";
pub const API_URL_VAR: &str = "FACEPP_API_URL";
pub const TIMEOUT_VAR: &str = "FACEPP_TIMEOUT_SECS";

/// Configuration for the detection client.
#[derive(Clone)]
pub struct DetectionClientConfig {
    /// Detection endpoint URL
    pub endpoint: String,
    pub api_key: String,
    pub api_secret: String,
    /// Whole-request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl fmt::Debug for DetectionClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectionClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DetectionClientConfig {
    /// Create a config for the default endpoint.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            timeout: None,
        }
    }

    /// Override the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set a whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create config from environment variables.
    ///
    /// `FACEPP_API_KEY` and `FACEPP_API_SECRET` are required.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ClientError::MissingCredential(name))
        };

        let api_key = required(API_KEY_VAR)?;
        let api_secret = required(API_SECRET_VAR)?;
        let endpoint = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let timeout = lookup(TIMEOUT_VAR)
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);

        Ok(Self {
            endpoint,
            api_key,
            api_secret,
            timeout,
        })
    }
}

/// Client for the remote face-analysis service.
///
/// Holds no per-request state; each [`detect`](Self::detect) call is a
/// single POST with no retry.
#[derive(Debug, Clone)]
pub struct DetectionClient {
    http: Client,
    config: DetectionClientConfig,
}

impl DetectionClient {
    /// Create a new detection client.
    pub fn new(config: DetectionClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Build)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(DetectionClientConfig::from_env()?)
    }

    pub fn config(&self) -> &DetectionClientConfig {
        &self.config
    }

    /// Submit an encoded image and parse the detected faces.
    pub async fn detect(&self, image_bytes: Vec<u8>) -> ClientResult<DetectionResponse> {
        let size = image_bytes.len();
        let form = self.build_form(image_bytes)?;

        debug!(endpoint = %self.config.endpoint, bytes = size, "Sending detection request");
        let start = Instant::now();

        let response = self
            .http
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ClientError::Transport)?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Detection service returned an error");
            return Err(ClientError::service(status.as_u16(), body));
        }

        let detection = DetectionResponse::from_json(&body)?;
        info!(
            faces = detection.face_count(),
            time_used_ms = ?detection.time_used,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Detection completed"
        );
        Ok(detection)
    }

    fn build_form(&self, image_bytes: Vec<u8>) -> ClientResult<Form> {
        let image = Part::bytes(image_bytes)
            .file_name("image.jpg")
            .mime_str("image/jpeg")
            .map_err(ClientError::Build)?;

        Ok(Form::new()
            .part("image_file", image)
            .text("api_key", self.config.api_key.clone())
            .text("api_secret", self.config.api_secret.clone())
            .text("return_attributes", RETURN_ATTRIBUTES))
    }
}
