//! Face annotation rendering.

use facelens_models::{DetectionResponse, FaceRecord, FaceRectangle, LabelKey, LabelSet};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use crate::font;

/// Colours and geometry of the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationStyle {
    pub box_color: Rgb<u8>,
    /// Outline thickness in pixels, drawn inward from the face rectangle
    pub stroke_width: u32,
    pub text_color: Rgb<u8>,
    /// Bitmap font scale factor
    pub text_scale: u32,
    /// Gap between the label baseline and the rectangle top
    pub label_offset: u32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            box_color: Rgb([255, 0, 0]),
            stroke_width: 2,
            text_color: Rgb([255, 255, 255]),
            text_scale: 2,
            label_offset: 10,
        }
    }
}

/// Label drawn above a face: `"Smile: 87.50%"`.
pub fn label_text(smile_label: &str, smile_score: f64) -> String {
    format!("{}: {:.2}%", smile_label, smile_score)
}

/// Draw every face of `response` onto a copy of `image`.
pub fn render(
    image: &DynamicImage,
    response: &DetectionResponse,
    labels: &LabelSet,
) -> DynamicImage {
    render_with_style(image, response, labels, &AnnotationStyle::default())
}

/// [`render`] with a custom style.
///
/// With no faces the input is returned as-is; otherwise the copy is RGB.
pub fn render_with_style(
    image: &DynamicImage,
    response: &DetectionResponse,
    labels: &LabelSet,
    style: &AnnotationStyle,
) -> DynamicImage {
    if response.is_empty() {
        return image.clone();
    }

    let mut canvas = image.to_rgb8();
    let smile_label = labels.get(LabelKey::Smile);
    for face in &response.faces {
        draw_face(&mut canvas, face, smile_label, style);
    }

    debug!(faces = response.face_count(), "Rendered face annotations");
    DynamicImage::ImageRgb8(canvas)
}

fn draw_face(canvas: &mut RgbImage, face: &FaceRecord, smile_label: &str, style: &AnnotationStyle) {
    let rect = face.face_rectangle;
    draw_outline(canvas, &rect, style);

    let text = label_text(smile_label, face.attributes.smile_score());
    let baseline = rect.top as i32 - style.label_offset as i32;
    let text_top = (baseline - font::text_height(style.text_scale) as i32).max(0);
    font::draw_text_mut(
        canvas,
        rect.left as i32,
        text_top,
        &text,
        style.text_scale,
        style.text_color,
    );
}

// Corners are inclusive: (left, top) to (left + width, top + height).
fn draw_outline(canvas: &mut RgbImage, rect: &FaceRectangle, style: &AnnotationStyle) {
    let inclusive = FaceRectangle::new(
        rect.left,
        rect.top,
        rect.width.saturating_add(1),
        rect.height.saturating_add(1),
    );
    let Some(bounds) = inclusive.clamp_to(canvas.width(), canvas.height()) else {
        debug!(?rect, "Face rectangle outside image, skipping outline");
        return;
    };

    for inset in 0..style.stroke_width {
        let (width, height) = (
            bounds.width.saturating_sub(2 * inset),
            bounds.height.saturating_sub(2 * inset),
        );
        if width == 0 || height == 0 {
            break;
        }
        let ring = Rect::at((bounds.left + inset) as i32, (bounds.top + inset) as i32)
            .of_size(width, height);
        draw_hollow_rect_mut(canvas, ring, style.box_color);
    }
}
