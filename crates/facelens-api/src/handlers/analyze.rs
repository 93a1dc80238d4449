//! Upload analysis handler.

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use facelens_models::{report_text, FaceReport, LabelKey, Language};
use serde::Serialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::handlers::labels::{parse_language, LanguageQuery};
use crate::pipeline::{self, AnalysisOutcome, ImageLimits};
use crate::state::AppState;

/// Multipart field names accepted for the image.
const IMAGE_FIELDS: [&str; 3] = ["image", "image_file", "file"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzeStatus {
    Ok,
    NoFaces,
    Error,
}

/// Analysis response.
#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub status: AnalyzeStatus,
    pub language: Language,
    /// Warnings such as the auto-resize notice
    pub notices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faces_detected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Base64-encoded PNG
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotated_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faces: Option<Vec<FaceReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_text: Option<String>,
}

impl AnalyzeResponse {
    fn bare(status: AnalyzeStatus, language: Language, notices: Vec<String>) -> Self {
        Self {
            status,
            language,
            notices,
            message: None,
            faces_detected: None,
            face_count: None,
            caption: None,
            annotated_image: None,
            faces: None,
            report_text: None,
        }
    }
}

struct Upload {
    image: Vec<u8>,
    language: Option<Language>,
}

async fn read_upload(multipart: &mut Multipart) -> ApiResult<Upload> {
    let mut image = None;
    let mut language = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if IMAGE_FIELDS.contains(&name.as_str()) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(e.to_string()))?;
            image = Some(bytes.to_vec());
        } else if name == "language" {
            let text = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(e.to_string()))?;
            language = Some(parse_language(Some(&text))?);
        }
    }

    Ok(Upload {
        image: image.ok_or_else(|| ApiError::bad_request("Missing image field"))?,
        language,
    })
}

/// Analyze an uploaded photo.
///
/// The language comes from the `language` form field, then `?language=`,
/// then defaults to English.
pub async fn analyze_image(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<AnalyzeResponse>)> {
    let upload = read_upload(&mut multipart).await?;
    let language = match upload.language {
        Some(language) => language,
        None => parse_language(query.language.as_deref())?,
    };
    let labels = language.labels();
    let limits = ImageLimits {
        max_width: state.config.max_image_width,
        max_height: state.config.max_image_height,
    };

    info!(language = %language, bytes = upload.image.len(), "Analyzing upload");
    let outcome = pipeline::analyze(&state.client, upload.image, labels, limits)
        .await
        .map_err(|e| ApiError::from(e).for_config(&state.config))?;

    let (status, body) = match outcome {
        AnalysisOutcome::Annotated(result) => {
            let mut response = AnalyzeResponse::bare(AnalyzeStatus::Ok, language, result.notices);
            response.faces_detected = Some(result.faces_detected);
            response.face_count = Some(result.face_count);
            response.caption = Some(labels.get(LabelKey::UploadedImageCaption).to_string());
            response.annotated_image = Some(BASE64.encode(&result.annotated_png));
            response.report_text = Some(report_text(&result.reports));
            response.faces = Some(result.reports);
            (StatusCode::OK, response)
        }
        AnalysisOutcome::NoFaces { notices } => {
            let mut response = AnalyzeResponse::bare(AnalyzeStatus::NoFaces, language, notices);
            response.message = Some(labels.get(LabelKey::ErrorNoFaces).to_string());
            (StatusCode::OK, response)
        }
        AnalysisOutcome::Failed {
            notices, message, ..
        } => {
            let mut response = AnalyzeResponse::bare(AnalyzeStatus::Error, language, notices);
            response.message = Some(message);
            (StatusCode::BAD_GATEWAY, response)
        }
    };

    Ok((status, Json(body)))
}
