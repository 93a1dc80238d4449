//! Image processing for FaceLens.
//!
//! This crate provides:
//! - Upload decoding and JPEG/PNG encoding
//! - Bounding-box normalization before upload to the detection service
//! - Face rectangle and smile label rendering

pub mod codec;
pub mod error;
pub mod font;
pub mod normalize;
pub mod render;

pub use codec::{decode, encode_jpeg, encode_png, DEFAULT_JPEG_QUALITY};
pub use error::{MediaError, MediaResult};
pub use normalize::{normalize, Normalized, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};
pub use render::{label_text, render, render_with_style, AnnotationStyle};

pub use image::DynamicImage;
