//! Localized display strings.
//!
//! Every label is reachable through an exhaustive `match`, so a missing
//! translation fails to compile rather than at render time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    French,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::French];

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
        }
    }

    /// Name shown in the language selector.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "Français",
        }
    }

    /// Label set for this language.
    pub fn labels(&self) -> &'static LabelSet {
        labels(*self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "fr" | "french" | "français" | "francais" => Ok(Language::French),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// Keys of every display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKey {
    Title,
    Description,
    UploadLabel,
    UploadedImageCaption,
    FacesDetected,
    ErrorNoFaces,
    ErrorApi,
    ErrorLargeImage,
    ApiErrorMessage,
    Face,
    Age,
    Gender,
    Smile,
    Confidence,
    Emotions,
    HeadPose,
    Pitch,
    Roll,
    Yaw,
    BeautyFemale,
    BeautyMale,
    Ethnicity,
}

impl LabelKey {
    pub const ALL: [LabelKey; 22] = [
        LabelKey::Title,
        LabelKey::Description,
        LabelKey::UploadLabel,
        LabelKey::UploadedImageCaption,
        LabelKey::FacesDetected,
        LabelKey::ErrorNoFaces,
        LabelKey::ErrorApi,
        LabelKey::ErrorLargeImage,
        LabelKey::ApiErrorMessage,
        LabelKey::Face,
        LabelKey::Age,
        LabelKey::Gender,
        LabelKey::Smile,
        LabelKey::Confidence,
        LabelKey::Emotions,
        LabelKey::HeadPose,
        LabelKey::Pitch,
        LabelKey::Roll,
        LabelKey::Yaw,
        LabelKey::BeautyFemale,
        LabelKey::BeautyMale,
        LabelKey::Ethnicity,
    ];

    /// Stable key name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelKey::Title => "title",
            LabelKey::Description => "description",
            LabelKey::UploadLabel => "upload_label",
            LabelKey::UploadedImageCaption => "uploaded_image_caption",
            LabelKey::FacesDetected => "faces_detected",
            LabelKey::ErrorNoFaces => "error_no_faces",
            LabelKey::ErrorApi => "error_api",
            LabelKey::ErrorLargeImage => "error_large_image",
            LabelKey::ApiErrorMessage => "api_error_message",
            LabelKey::Face => "face",
            LabelKey::Age => "age",
            LabelKey::Gender => "gender",
            LabelKey::Smile => "smile",
            LabelKey::Confidence => "confidence",
            LabelKey::Emotions => "emotions",
            LabelKey::HeadPose => "head_pose",
            LabelKey::Pitch => "pitch",
            LabelKey::Roll => "roll",
            LabelKey::Yaw => "yaw",
            LabelKey::BeautyFemale => "beauty_female",
            LabelKey::BeautyMale => "beauty_male",
            LabelKey::Ethnicity => "ethnicity",
        }
    }
}

/// Read-only label lookup for one language.
#[derive(Debug)]
pub struct LabelSet {
    language: Language,
    lookup: fn(LabelKey) -> &'static str,
}

static ENGLISH: LabelSet = LabelSet {
    language: Language::English,
    lookup: english,
};

static FRENCH: LabelSet = LabelSet {
    language: Language::French,
    lookup: french,
};

/// Label set for a language.
pub fn labels(language: Language) -> &'static LabelSet {
    match language {
        Language::English => &ENGLISH,
        Language::French => &FRENCH,
    }
}

impl LabelSet {
    pub fn language(&self) -> Language {
        self.language
    }

    /// Display string for a key.
    pub fn get(&self, key: LabelKey) -> &'static str {
        (self.lookup)(key)
    }

    /// `"API Error: {status_code} - {error_message}"` in this language.
    pub fn api_error(&self, status_code: u16, error_message: &str) -> String {
        self.get(LabelKey::ApiErrorMessage)
            .replace("{status_code}", &status_code.to_string())
            .replace("{error_message}", error_message)
    }

    /// `"Number of faces detected: n"` in this language.
    pub fn faces_detected(&self, count: usize) -> String {
        format!("{}: {}", self.get(LabelKey::FacesDetected), count)
    }

    /// All `(key, text)` pairs, in `LabelKey::ALL` order.
    pub fn entries(&self) -> impl Iterator<Item = (LabelKey, &'static str)> + '_ {
        LabelKey::ALL.iter().map(move |key| (*key, self.get(*key)))
    }
}

fn english(key: LabelKey) -> &'static str {
    match key {
        LabelKey::Title => "Facial Recognition Awareness Tool",
        LabelKey::Description => {
            "Upload an image, and we'll show you how facial recognition systems can identify faces."
        }
        LabelKey::UploadLabel => "Choose an image...",
        LabelKey::UploadedImageCaption => "Uploaded Image",
        LabelKey::FacesDetected => "Number of faces detected",
        LabelKey::ErrorNoFaces => "No faces detected.",
        LabelKey::ErrorApi => "Could not detect faces. Please try again.",
        LabelKey::ErrorLargeImage => "Image is too large. Automatically resized for processing.",
        LabelKey::ApiErrorMessage => "API Error: {status_code} - {error_message}",
        LabelKey::Face => "Face",
        LabelKey::Age => "Age",
        LabelKey::Gender => "Gender",
        LabelKey::Smile => "Smile",
        LabelKey::Confidence => "confidence",
        LabelKey::Emotions => "Emotions",
        LabelKey::HeadPose => "Head Pose",
        LabelKey::Pitch => "Pitch",
        LabelKey::Roll => "Roll",
        LabelKey::Yaw => "Yaw",
        LabelKey::BeautyFemale => "Beauty Score (Female)",
        LabelKey::BeautyMale => "Beauty Score (Male)",
        LabelKey::Ethnicity => "Ethnicity",
    }
}

fn french(key: LabelKey) -> &'static str {
    match key {
        LabelKey::Title => "Outil de Sensibilisation à la Reconnaissance Faciale",
        LabelKey::Description => {
            "Téléchargez une image et nous vous montrerons comment les systèmes de reconnaissance faciale peuvent identifier des visages."
        }
        LabelKey::UploadLabel => "Choisissez une image...",
        LabelKey::UploadedImageCaption => "Image téléchargée",
        LabelKey::FacesDetected => "Nombre de visages détectés",
        LabelKey::ErrorNoFaces => "Aucun visage détecté.",
        LabelKey::ErrorApi => "Impossible de détecter des visages. Veuillez réessayer.",
        LabelKey::ErrorLargeImage => {
            "L'image est trop grande. Redimensionnée automatiquement pour le traitement."
        }
        LabelKey::ApiErrorMessage => "Erreur de l'API: {status_code} - {error_message}",
        LabelKey::Face => "Visage",
        LabelKey::Age => "Âge",
        LabelKey::Gender => "Genre",
        LabelKey::Smile => "Sourire",
        LabelKey::Confidence => "confiance",
        LabelKey::Emotions => "Émotions",
        LabelKey::HeadPose => "Orientation de la tête",
        LabelKey::Pitch => "Inclinaison",
        LabelKey::Roll => "Roulement",
        LabelKey::Yaw => "Lacet",
        LabelKey::BeautyFemale => "Score de beauté (Femmes)",
        LabelKey::BeautyMale => "Score de beauté (Hommes)",
        LabelKey::Ethnicity => "Ethnicité",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert_eq!("fr".parse::<Language>().unwrap(), Language::French);
        assert_eq!("Français".parse::<Language>().unwrap(), Language::French);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn test_every_key_translated() {
        for language in Language::ALL {
            for (key, text) in labels(language).entries() {
                assert!(!text.is_empty(), "{:?} missing for {}", key, language);
            }
        }
    }

    #[test]
    fn test_languages_differ() {
        assert_eq!(labels(Language::English).get(LabelKey::Smile), "Smile");
        assert_eq!(labels(Language::French).get(LabelKey::Smile), "Sourire");
    }

    #[test]
    fn test_api_error_template() {
        assert_eq!(
            labels(Language::English).api_error(403, "AUTHENTICATION_ERROR"),
            "API Error: 403 - AUTHENTICATION_ERROR"
        );
        assert_eq!(
            labels(Language::French).api_error(500, "boom"),
            "Erreur de l'API: 500 - boom"
        );
    }

    #[test]
    fn test_faces_detected() {
        assert_eq!(
            labels(Language::English).faces_detected(2),
            "Number of faces detected: 2"
        );
        assert_eq!(
            labels(Language::French).faces_detected(1),
            "Nombre de visages détectés: 1"
        );
    }
}
