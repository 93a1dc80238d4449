//! Axum HTTP service for FaceLens.
//!
//! This crate provides:
//! - The per-upload pipeline (normalize, detect, render, report)
//! - Multipart upload and label endpoints
//! - Rate limiting, security headers and Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod pipeline;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use pipeline::{analyze, AnalysisOutcome, ImageLimits, PipelineError};
pub use routes::create_router;
pub use state::AppState;
