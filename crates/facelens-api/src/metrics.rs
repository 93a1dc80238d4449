//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return its render handle.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "facelens_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "facelens_http_request_duration_seconds";

    pub const DETECTIONS_TOTAL: &str = "facelens_detections_total";
    pub const DETECTION_DURATION_SECONDS: &str = "facelens_detection_duration_seconds";
    pub const FACES_DETECTED_TOTAL: &str = "facelens_faces_detected_total";
    pub const IMAGES_RESIZED_TOTAL: &str = "facelens_images_resized_total";

    pub const RATE_LIMIT_HITS_TOTAL: &str = "facelens_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record one detection round trip; `outcome` is `faces`, `no_faces` or an error kind.
pub fn record_detection(outcome: &'static str, faces: usize, duration_secs: f64) {
    counter!(names::DETECTIONS_TOTAL, "outcome" => outcome).increment(1);
    histogram!(names::DETECTION_DURATION_SECONDS).record(duration_secs);
    counter!(names::FACES_DETECTED_TOTAL).increment(faces as u64);
}

/// Record an upload that had to be scaled down.
pub fn record_image_resized() {
    counter!(names::IMAGES_RESIZED_TOTAL).increment(1);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Metrics middleware recording method, route, status and latency.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    // Route templates keep label cardinality bounded.
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}
