//! Optional re-encoding of uploaded photos to keep storage small.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{ImageFormat, ImageReader};

use crate::error::CoreError;

/// Photos wider than this are scaled down to it.
pub const MAX_IMAGE_WIDTH: u32 = 1920;

/// Quality used when re-encoding JPEGs.
pub const JPEG_QUALITY: u8 = 85;

/// Dimensions after applying the [`MAX_IMAGE_WIDTH`] cap.
///
/// The aspect ratio is kept; the scaled height is truncated (never below 1).
pub fn target_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width <= MAX_IMAGE_WIDTH {
        return (width, height);
    }
    let scaled = (u64::from(height) * u64::from(MAX_IMAGE_WIDTH) / u64::from(width)) as u32;
    (MAX_IMAGE_WIDTH, scaled.max(1))
}

/// Re-encode the image at `path` in place.
///
/// The image is converted to RGB, downscaled with Lanczos3 if it is wider
/// than [`MAX_IMAGE_WIDTH`], and written back in its own format. Returns
/// `Ok(false)` for formats that are not re-encoded (GIF). On error the file
/// is left as it was.
///
/// This is blocking work; async callers should run it on a blocking thread.
pub fn compress_image(path: &Path) -> Result<bool, CoreError> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| CoreError::Internal(format!("Cannot open image: {e}")))?;

    let format = match reader.format() {
        Some(f @ (ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP)) => f,
        _ => return Ok(false),
    };

    let decoded = reader
        .decode()
        .map_err(|e| CoreError::Internal(format!("Cannot decode image: {e}")))?;
    let rgb = decoded.to_rgb8();

    let (width, height) = target_dimensions(rgb.width(), rgb.height());
    let rgb = if (width, height) == rgb.dimensions() {
        rgb
    } else {
        image::imageops::resize(&rgb, width, height, FilterType::Lanczos3)
    };

    let mut encoded = Vec::new();
    let result = match format {
        ImageFormat::Jpeg => {
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY))
        }
        ImageFormat::Png => rgb.write_with_encoder(PngEncoder::new(&mut encoded)),
        _ => rgb.write_with_encoder(WebPEncoder::new_lossless(&mut encoded)),
    };
    result.map_err(|e| CoreError::Internal(format!("Cannot encode image: {e}")))?;

    std::fs::write(path, encoded)
        .map_err(|e| CoreError::Internal(format!("Cannot write image: {e}")))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb};

    use super::*;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = ImageBuffer::from_pixel(width, height, Rgb([200u8, 120, 40]));
        img.save(path).expect("test image should save");
    }

    #[test]
    fn narrow_images_keep_their_size() {
        assert_eq!(target_dimensions(1920, 1080), (1920, 1080));
        assert_eq!(target_dimensions(640, 480), (640, 480));
    }

    #[test]
    fn wide_images_scale_to_max_width() {
        assert_eq!(target_dimensions(3840, 2160), (1920, 1080));
        assert_eq!(target_dimensions(4000, 3001), (1920, 1440));
        assert_eq!(target_dimensions(100_000, 10), (1920, 1));
    }

    #[test]
    fn compress_downscales_wide_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        write_png(&path, 2400, 1200);

        assert!(compress_image(&path).unwrap());

        let reopened = image::open(&path).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (1920, 960));
    }

    #[test]
    fn compress_rewrites_small_jpeg_without_resizing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.jpg");
        let img = ImageBuffer::from_pixel(120, 80, Rgb([10u8, 20, 30]));
        img.save(&path).unwrap();

        assert!(compress_image(&path).unwrap());

        let reopened = image::open(&path).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (120, 80));
    }

    #[test]
    fn gif_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.gif");
        let bytes = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";
        std::fs::write(&path, bytes).unwrap();

        assert!(!compress_image(&path).unwrap());
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn garbage_fails_and_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.jpg");
        std::fs::write(&path, b"\xFF\xD8\xFFnot really a jpeg").unwrap();

        assert!(compress_image(&path).is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"\xFF\xD8\xFFnot really a jpeg");
    }
}
