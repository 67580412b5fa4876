use pdf_grid::*;
use std::path::PathBuf;

#[test]
fn test_default_options_are_valid() {
    assert!(ExportOptions::default().validate().is_ok());
}

#[test]
fn test_validation_negative_padding() {
    let options = ExportOptions {
        left_pad: -1.0,
        ..Default::default()
    };
    match options.validate() {
        Err(GridError::Config(msg)) => assert!(msg.contains("left padding")),
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_validation_non_finite_gutter() {
    let options = ExportOptions {
        gutter: f32::NAN,
        ..Default::default()
    };
    assert!(options.validate().is_err());
}

#[test]
fn test_validation_max_image_side() {
    let mut options = ExportOptions::default();
    options.max_image_side = 0;
    assert!(options.validate().is_err());

    options.max_image_side = 1;
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_jpeg_quality() {
    let mut options = ExportOptions::default();

    options.jpeg_quality = 0.0;
    assert!(options.validate().is_ok());

    options.jpeg_quality = 1.0;
    assert!(options.validate().is_ok());

    options.jpeg_quality = 1.5;
    assert!(options.validate().is_err());

    options.jpeg_quality = -0.1;
    assert!(options.validate().is_err());
}

#[test]
fn test_zero_columns_is_not_an_error() {
    let options = ExportOptions {
        columns: 0,
        ..Default::default()
    };
    assert!(options.validate().is_ok());
    assert_eq!(options.geometry().effective_columns(), 1);
}

#[test]
fn test_geometry_follows_preset_and_orientation() {
    let options = ExportOptions {
        page_size: PageSize::A4,
        orientation: Orientation::Landscape,
        columns: 4,
        gutter: 6.0,
        ..Default::default()
    };
    let geometry = options.geometry();

    assert!((geometry.page_width - 841.89).abs() < 0.01);
    assert!((geometry.page_height - 595.28).abs() < 0.01);
    assert_eq!(geometry.columns, 4);
    assert_eq!(geometry.gutter, 6.0);
}

#[test]
fn test_decoration_from_options() {
    let options = ExportOptions {
        header: "Header".to_string(),
        footer: "Footer".to_string(),
        starting_page_number: 3,
        captions: true,
        logo: Some(PathBuf::from("logo.png")),
        ..Default::default()
    };
    let decoration = options.decoration();

    assert_eq!(decoration.header, "Header");
    assert_eq!(decoration.footer, "Footer");
    assert_eq!(decoration.starting_page_number, 3);
    assert!(decoration.captions);
    // Loaded separately by the export pipeline
    assert!(decoration.logo.is_none());
}

#[test]
fn test_page_size_presets() {
    let (w, h) = PageSize::Letter.dimensions_pt(Orientation::Portrait);
    assert!((w - 612.0).abs() < 0.01);
    assert!((h - 792.0).abs() < 0.01);

    for size in PageSize::ALL {
        let (w, h) = size.dimensions_mm();
        assert!(w < h, "{} should be portrait", size.name());
    }
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = ExportOptions {
        page_size: PageSize::Legal,
        orientation: Orientation::Landscape,
        columns: 5,
        max_image_side: 800,
        jpeg_quality: 0.6,
        file_name: "trip".to_string(),
        header: "Trip".to_string(),
        logo: Some(PathBuf::from("logo.png")),
        starting_page_number: 10,
        captions: true,
        ..Default::default()
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = ExportOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_options_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "columns": 2, "page_size": "Letter" }"#).unwrap();

    let loaded = ExportOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.columns, 2);
    assert_eq!(loaded.page_size, PageSize::Letter);
    assert_eq!(loaded.max_image_side, DEFAULT_MAX_IMAGE_SIDE);
    assert_eq!(loaded.starting_page_number, 1);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_options() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "{ not json").unwrap();

    match ExportOptions::load(temp_file.path()).await {
        Err(GridError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        _ => panic!("Expected Config error"),
    }
}
