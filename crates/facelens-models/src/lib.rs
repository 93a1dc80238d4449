//! Shared data models for FaceLens.
//!
//! This crate provides:
//! - Serde types for the face-analysis service response
//! - Localized label sets (English / French)
//! - Per-face attribute reports

pub mod detection;
pub mod labels;
pub mod report;

// Re-export common types
pub use detection::{
    AttributeSet, Beauty, DetectionResponse, EmotionScores, FaceRecord, FaceRectangle, HeadPose,
    Smile, Valued, RETURN_ATTRIBUTES,
};
pub use labels::{labels, LabelKey, LabelSet, Language, UnknownLanguage};
pub use report::{report, report_text, FaceReport};
