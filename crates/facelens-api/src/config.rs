//! API configuration.

use facelens_media::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Per-client requests per second on `/api`
    pub rate_limit_rps: u32,
    /// Max request body size
    pub max_body_size: usize,
    /// Bounding box applied to uploads before detection
    pub max_image_width: u32,
    pub max_image_height: u32,
    /// Expose `/metrics`
    pub metrics_enabled: bool,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 5,
            max_body_size: 10 * 1024 * 1024, // 10MB
            max_image_width: DEFAULT_MAX_WIDTH,
            max_image_height: DEFAULT_MAX_HEIGHT,
            metrics_enabled: true,
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: parse_var("API_PORT").unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: parse_var("RATE_LIMIT_RPS").unwrap_or(defaults.rate_limit_rps),
            max_body_size: parse_var("MAX_BODY_SIZE").unwrap_or(defaults.max_body_size),
            max_image_width: parse_bound(std::env::var("MAX_IMAGE_WIDTH").ok())
                .unwrap_or(defaults.max_image_width),
            max_image_height: parse_bound(std::env::var("MAX_IMAGE_HEIGHT").ok())
                .unwrap_or(defaults.max_image_height),
            metrics_enabled: std::env::var("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.metrics_enabled),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

// A zero-pixel bound cannot hold any image; fall back to the default.
fn parse_bound(raw: Option<String>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse().ok()).filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!((config.max_image_width, config.max_image_height), (1024, 1024));
        assert!(!config.is_production());
    }

    #[test]
    fn test_zero_image_bound_rejected() {
        assert_eq!(parse_bound(Some("0".to_string())), None);
        assert_eq!(parse_bound(Some(" 640 ".to_string())), Some(640));
        assert_eq!(parse_bound(Some("wide".to_string())), None);
        assert_eq!(parse_bound(None), None);
    }
}
