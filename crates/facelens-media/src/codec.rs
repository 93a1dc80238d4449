//! Upload decoding and transmission/display encoding.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageOutputFormat};
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// JPEG quality used when sending images to the detection service.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Decode an uploaded JPEG or PNG image.
pub fn decode(bytes: &[u8]) -> MediaResult<DynamicImage> {
    if bytes.is_empty() {
        return Err(MediaError::Empty);
    }

    let format = image::guess_format(bytes)
        .map_err(|e| MediaError::UnsupportedFormat(e.to_string()))?;
    if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
        return Err(MediaError::UnsupportedFormat(format!("{:?}", format)));
    }

    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| MediaError::decode(e.to_string()))?;
    debug!(
        format = ?format,
        width = image.width(),
        height = image.height(),
        "Decoded upload"
    );
    Ok(image)
}

/// Encode an image as RGB JPEG.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> MediaResult<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, ImageOutputFormat::Jpeg(quality))
        .map_err(|e| MediaError::encode(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Encode an image as PNG.
pub fn encode_png(image: &DynamicImage) -> MediaResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageOutputFormat::Png)
        .map_err(|e| MediaError::encode(e.to_string()))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([40, 80, 120])))
    }

    #[test]
    fn test_decode_png() {
        let png = encode_png(&solid(12, 7)).unwrap();
        let decoded = decode(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }

    #[test]
    fn test_jpeg_is_decodable() {
        let jpeg = encode_jpeg(&solid(32, 16), DEFAULT_JPEG_QUALITY).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        let decoded = decode(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode(&[]), Err(MediaError::Empty)));
        assert!(matches!(
            decode(b"definitely not an image"),
            Err(MediaError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_png() {
        let png = encode_png(&solid(12, 7)).unwrap();
        assert!(decode(&png[..png.len() / 2]).is_err());
    }
}
