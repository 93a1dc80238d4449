//! Bounding-box normalization of uploaded images.

use image::imageops::FilterType;
use image::DynamicImage;
use tracing::warn;

/// Largest image sent to the detection service.
pub const DEFAULT_MAX_WIDTH: u32 = 1024;
pub const DEFAULT_MAX_HEIGHT: u32 = 1024;

/// Output of [`normalize`].
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Image fitting the bounding box
    pub image: DynamicImage,
    /// Whether the image had to be scaled down
    pub resized: bool,
}

/// Fit an image within `max_width` x `max_height`, preserving aspect ratio.
///
/// Images already inside the box are returned unchanged; images are never
/// upscaled. The input is left untouched.
pub fn normalize(image: &DynamicImage, max_width: u32, max_height: u32) -> Normalized {
    let (width, height) = (image.width(), image.height());
    if width <= max_width && height <= max_height {
        return Normalized {
            image: image.clone(),
            resized: false,
        };
    }

    let (new_width, new_height) = fit_within(width, height, max_width, max_height);
    warn!(
        width,
        height,
        new_width,
        new_height,
        "Image exceeds {}x{}, resizing",
        max_width,
        max_height
    );

    Normalized {
        image: image.resize_exact(new_width, new_height, FilterType::Lanczos3),
        resized: true,
    }
}

/// Largest `(w, h)` with the same aspect ratio that fits the box.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    )
    .min(1.0);

    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width.max(1));
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height.max(1));
    (new_width, new_height)
}
