//! Per-upload analysis pipeline.
//!
//! decode → normalize → encode → detect → render + report. A detection
//! failure or an empty result stops the pipeline before rendering, so an
//! outcome carries either a full annotation and report or none at all.

use std::time::Instant;

use facelens_client::{ClientError, DetectionClient};
use facelens_media::{DynamicImage, MediaError, DEFAULT_JPEG_QUALITY};
use facelens_models::{FaceReport, LabelKey, LabelSet};
use thiserror::Error;
use tracing::{info, warn};

use crate::metrics;

/// Failures that are the upload's fault or ours, not the detection service's.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("Image task failed: {0}")]
    Task(String),
}

/// Bounding box applied before detection.
#[derive(Debug, Clone, Copy)]
pub struct ImageLimits {
    pub max_width: u32,
    pub max_height: u32,
}

/// Annotated image and report for at least one face.
#[derive(Debug, Clone)]
pub struct Annotated {
    pub notices: Vec<String>,
    /// Localized "Number of faces detected: n"
    pub faces_detected: String,
    pub face_count: usize,
    pub annotated_png: Vec<u8>,
    pub reports: Vec<FaceReport>,
}

/// Why detection failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Service,
}

/// Result of one upload.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Annotated(Annotated),
    NoFaces {
        notices: Vec<String>,
    },
    Failed {
        notices: Vec<String>,
        kind: FailureKind,
        message: String,
    },
}

struct Prepared {
    image: DynamicImage,
    jpeg: Vec<u8>,
    resized: bool,
}

/// Run the full pipeline for one uploaded image.
pub async fn analyze(
    client: &DetectionClient,
    upload: Vec<u8>,
    labels: &'static LabelSet,
    limits: ImageLimits,
) -> Result<AnalysisOutcome, PipelineError> {
    let prepared = run_blocking(move || prepare(&upload, limits)).await??;

    let mut notices = Vec::new();
    if prepared.resized {
        metrics::record_image_resized();
        notices.push(labels.get(LabelKey::ErrorLargeImage).to_string());
    }

    let start = Instant::now();
    let detection = client.detect(prepared.jpeg).await;
    let elapsed = start.elapsed().as_secs_f64();

    let response = match detection {
        Ok(response) => response,
        Err(e) => {
            let (kind, message) = failure_message(&e, labels);
            warn!(error = %e, "Face detection failed");
            metrics::record_detection(
                match kind {
                    FailureKind::Transport => "transport_error",
                    FailureKind::Service => "service_error",
                },
                0,
                elapsed,
            );
            return Ok(AnalysisOutcome::Failed {
                notices,
                kind,
                message,
            });
        }
    };

    if response.is_empty() {
        metrics::record_detection("no_faces", 0, elapsed);
        info!("No faces detected");
        return Ok(AnalysisOutcome::NoFaces { notices });
    }
    metrics::record_detection("faces", response.face_count(), elapsed);

    let face_count = response.face_count();
    let reports = facelens_models::report(&response, labels);
    let image = prepared.image;
    let annotated_png = run_blocking(move || {
        facelens_media::encode_png(&facelens_media::render(&image, &response, labels))
    })
    .await??;

    Ok(AnalysisOutcome::Annotated(Annotated {
        notices,
        faces_detected: labels.faces_detected(face_count),
        face_count,
        annotated_png,
        reports,
    }))
}

/// Localized user-facing message for a detection failure.
pub fn failure_message(error: &ClientError, labels: &LabelSet) -> (FailureKind, String) {
    match error {
        ClientError::Service {
            status_code,
            message,
        } => (FailureKind::Service, labels.api_error(*status_code, message)),
        ClientError::Decode(message) => (FailureKind::Service, labels.api_error(200, message)),
        _ => (FailureKind::Transport, labels.get(LabelKey::ErrorApi).to_string()),
    }
}

fn prepare(upload: &[u8], limits: ImageLimits) -> Result<Prepared, MediaError> {
    let original = facelens_media::decode(upload)?;
    let normalized = facelens_media::normalize(&original, limits.max_width, limits.max_height);
    let jpeg = facelens_media::encode_jpeg(&normalized.image, DEFAULT_JPEG_QUALITY)?;
    Ok(Prepared {
        image: normalized.image,
        jpeg,
        resized: normalized.resized,
    })
}

async fn run_blocking<F, T>(task: F) -> Result<T, PipelineError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| PipelineError::Task(e.to_string()))
}
