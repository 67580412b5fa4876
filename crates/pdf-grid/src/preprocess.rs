//! Image preprocessing: decode, downscale, re-encode
//!
//! Each call owns its decoded pixel buffer for the duration of the call only,
//! so a batch processed one image at a time never holds more than one decoded
//! image in memory.

use crate::types::*;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat};
use std::path::Path;

/// Read an image file from disk without decoding it
pub async fn load_image(path: impl AsRef<Path>) -> Result<ImageSource> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(ImageSource { name, bytes })
}

/// Preprocess an image on the blocking pool
pub async fn process_image(
    source: ImageSource,
    max_side: u32,
    quality: f32,
) -> Result<ProcessedImage> {
    tokio::task::spawn_blocking(move || process(&source, max_side, quality)).await?
}

/// Target size after downscaling so the longest side is at most `max_side`.
///
/// Never upscales, and never returns a zero dimension.
pub fn target_dimensions(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let longest = width.max(height).max(1) as f64;
    let ratio = (max_side as f64 / longest).min(1.0);

    let target_width = ((width as f64 * ratio).round() as u32).max(1);
    let target_height = ((height as f64 * ratio).round() as u32).max(1);
    (target_width, target_height)
}

/// Decode, downscale and re-encode one image.
///
/// PNG sources stay PNG; everything else becomes JPEG at `quality` (0.0-1.0).
pub fn process(source: &ImageSource, max_side: u32, quality: f32) -> Result<ProcessedImage> {
    // Unrecognized bytes are a decode failure, not a missing codec
    let format = image::guess_format(&source.bytes)
        .map_err(|e| GridError::Decode(format!("{}: {}", source.name, e)))?;
    let encoding = if format == ImageFormat::Png {
        ImageEncoding::Png
    } else {
        ImageEncoding::Jpeg
    };

    let decoded = image::load_from_memory_with_format(&source.bytes, format)
        .map_err(|e| decode_error(&source.name, e))?;

    let (width, height) = (decoded.width(), decoded.height());
    let (target_width, target_height) = target_dimensions(width, height, max_side);

    let resized = if (target_width, target_height) == (width, height) {
        decoded
    } else {
        let resized = decoded.resize_exact(target_width, target_height, FilterType::Lanczos3);
        drop(decoded);
        resized
    };

    let bytes = encode(resized, encoding, quality).map_err(|e| match &e {
        ImageError::Unsupported(_) => {
            GridError::UnsupportedEnvironment(format!("{}: {}", source.name, e))
        }
        _ => GridError::Encode(format!("{}: {}", source.name, e)),
    })?;

    if bytes.is_empty() {
        return Err(GridError::Encode(format!(
            "{}: encoder produced no data",
            source.name
        )));
    }

    log::debug!(
        "Processed {} {}x{} -> {}x{} ({}, {} bytes)",
        source.name,
        width,
        height,
        target_width,
        target_height,
        encoding.mime_type(),
        bytes.len()
    );

    Ok(ProcessedImage {
        name: source.name.clone(),
        bytes,
        width: target_width,
        height: target_height,
        encoding,
    })
}

/// Consumes the pixel buffer so it is released as soon as encoding finishes
fn encode(
    image: DynamicImage,
    encoding: ImageEncoding,
    quality: f32,
) -> std::result::Result<Vec<u8>, ImageError> {
    let mut bytes = Vec::new();
    match encoding {
        ImageEncoding::Png => {
            image.write_with_encoder(PngEncoder::new(&mut bytes))?;
        }
        ImageEncoding::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(image.into_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(
                &mut bytes,
                jpeg_quality(quality),
            ))?;
        }
    }
    Ok(bytes)
}

/// Map a 0.0-1.0 quality onto the encoder's 1-100 scale
fn jpeg_quality(quality: f32) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
}

fn decode_error(name: &str, error: ImageError) -> GridError {
    match &error {
        ImageError::Unsupported(_) => {
            GridError::UnsupportedEnvironment(format!("{}: {}", name, error))
        }
        _ => GridError::Decode(format!("{}: {}", name, error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_dimensions_downscale() {
        assert_eq!(target_dimensions(3200, 1600, 1600), (1600, 800));
        assert_eq!(target_dimensions(1600, 3200, 800), (400, 800));
    }

    #[test]
    fn test_target_dimensions_never_upscale() {
        assert_eq!(target_dimensions(640, 480, 1600), (640, 480));
        assert_eq!(target_dimensions(1600, 1600, 1600), (1600, 1600));
    }

    #[test]
    fn test_target_dimensions_floor_at_one() {
        assert_eq!(target_dimensions(10000, 10, 100), (100, 1));
        assert_eq!(target_dimensions(5, 5, 1), (1, 1));
    }

    #[test]
    fn test_target_dimensions_bounds() {
        for &(w, h) in &[(1, 1), (3, 7), (999, 1000), (4000, 3000), (123, 4567)] {
            for max_side in [1, 2, 50, 333, 1600, 5000] {
                let (tw, th) = target_dimensions(w, h, max_side);
                assert!(tw.max(th) <= max_side);
                assert!(tw >= 1 && th >= 1);
                if w.max(h) <= max_side {
                    assert_eq!((tw, th), (w, h));
                }
            }
        }
    }

    #[test]
    fn test_jpeg_quality_mapping() {
        assert_eq!(jpeg_quality(0.0), 1);
        assert_eq!(jpeg_quality(0.85), 85);
        assert_eq!(jpeg_quality(1.0), 100);
        assert_eq!(jpeg_quality(7.0), 100);
    }
}
