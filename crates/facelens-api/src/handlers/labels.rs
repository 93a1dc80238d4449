//! Localized page strings.

use std::collections::BTreeMap;

use axum::extract::Query;
use axum::Json;
use facelens_models::Language;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LanguageQuery {
    pub language: Option<String>,
}

/// Available languages and the selected label set.
#[derive(Serialize)]
pub struct LabelsResponse {
    pub language: Language,
    pub languages: Vec<LanguageOption>,
    pub labels: BTreeMap<&'static str, &'static str>,
}

#[derive(Serialize)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
}

/// Parse an optional language parameter, defaulting to English.
pub fn parse_language(raw: Option<&str>) -> ApiResult<Language> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse().map_err(|e| ApiError::bad_request(format!("{}", e))),
        None => Ok(Language::default()),
    }
}

/// Get the label set for the requested language.
pub async fn get_labels(Query(query): Query<LanguageQuery>) -> ApiResult<Json<LabelsResponse>> {
    let language = parse_language(query.language.as_deref())?;

    Ok(Json(LabelsResponse {
        language,
        languages: Language::ALL
            .iter()
            .map(|l| LanguageOption {
                code: l.code(),
                name: l.display_name(),
            })
            .collect(),
        labels: language
            .labels()
            .entries()
            .map(|(key, text)| (key.as_str(), text))
            .collect(),
    }))
}
