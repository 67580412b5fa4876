mod common;

use common::*;
use image::ImageFormat;
use pdf_grid::*;

#[test]
fn test_downscale_png_keeps_png() {
    let source = png_source("wide.png", 3200, 1600);
    let image = process(&source, 1600, 0.85).unwrap();

    assert_eq!((image.width, image.height), (1600, 800));
    assert_eq!(image.encoding, ImageEncoding::Png);
    assert_eq!(image.mime_type(), "image/png");
    assert_eq!(image::guess_format(&image.bytes).unwrap(), ImageFormat::Png);

    let decoded = image::load_from_memory(&image.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1600, 800));
}

#[test]
fn test_downscale_jpeg_stays_jpeg() {
    let source = jpeg_source("photo.jpg", 3200, 1600);
    let image = process(&source, 1600, 0.7).unwrap();

    assert_eq!((image.width, image.height), (1600, 800));
    assert_eq!(image.encoding, ImageEncoding::Jpeg);
    assert_eq!(image::guess_format(&image.bytes).unwrap(), ImageFormat::Jpeg);
}

#[test]
fn test_non_png_sources_become_jpeg() {
    let image = common::encode(
        image::DynamicImage::ImageRgb8(image::RgbImage::new(30, 20)),
        ImageFormat::Bmp,
    );
    let processed = process(&ImageSource::new("scan.bmp", image), 1600, 0.85).unwrap();

    assert_eq!(processed.encoding, ImageEncoding::Jpeg);
    assert_eq!((processed.width, processed.height), (30, 20));
}

#[test]
fn test_small_image_not_upscaled() {
    let image = process(&png_source("icon.png", 64, 48), 1600, 0.85).unwrap();
    assert_eq!((image.width, image.height), (64, 48));
}

#[test]
fn test_portrait_aspect_ratio_preserved() {
    let image = process(&jpeg_source("tall.jpg", 300, 1000), 100, 0.85).unwrap();
    assert_eq!((image.width, image.height), (30, 100));
}

#[test]
fn test_transparent_png_keeps_alpha() {
    let image = process(&transparent_png_source("overlay.png", 20, 20), 10, 0.85).unwrap();
    assert_eq!(image.encoding, ImageEncoding::Png);
    let decoded = image::load_from_memory(&image.bytes).unwrap();
    assert!(decoded.color().has_alpha());
}

#[test]
fn test_garbage_is_decode_error() {
    let source = ImageSource::new("notes.txt", b"definitely not an image".to_vec());
    match process(&source, 1600, 0.85) {
        Err(GridError::Decode(msg)) => assert!(msg.contains("notes.txt")),
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[test]
fn test_truncated_png_is_decode_error() {
    let mut bytes = png_source("broken.png", 50, 50).bytes;
    bytes.truncate(bytes.len() / 2);
    let result = process(&ImageSource::new("broken.png", bytes), 1600, 0.85);
    assert!(matches!(result, Err(GridError::Decode(_))));
}

#[tokio::test]
async fn test_load_and_process_file() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), png_source("x.png", 40, 20).bytes).unwrap();

    let source = load_image(temp.path()).await.unwrap();
    assert_eq!(
        source.name,
        temp.path().file_name().unwrap().to_string_lossy()
    );

    let image = process_image(source, 10, 0.85).await.unwrap();
    assert_eq!((image.width, image.height), (10, 5));
}

#[tokio::test]
async fn test_load_missing_file() {
    let result = load_image("/definitely/not/here.png").await;
    assert!(matches!(result, Err(GridError::Io(_))));
}
