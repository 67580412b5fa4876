#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use lopdf::Document;
use pdf_grid::*;
use std::io::Cursor;

pub fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

pub fn png_source(name: &str, width: u32, height: u32) -> ImageSource {
    let image = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
    ImageSource::new(name, encode(DynamicImage::ImageRgb8(image), ImageFormat::Png))
}

pub fn transparent_png_source(name: &str, width: u32, height: u32) -> ImageSource {
    let image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 255, 128]));
    ImageSource::new(name, encode(DynamicImage::ImageRgba8(image), ImageFormat::Png))
}

pub fn jpeg_source(name: &str, width: u32, height: u32) -> ImageSource {
    let image = RgbImage::from_pixel(width, height, Rgb([40, 160, 40]));
    ImageSource::new(name, encode(DynamicImage::ImageRgb8(image), ImageFormat::Jpeg))
}

pub fn processed(name: &str, width: u32, height: u32) -> ProcessedImage {
    process(&png_source(name, width, height), 1600, 0.85).unwrap()
}

/// 3 columns, 2 rows per page
pub fn two_row_geometry() -> PageGeometry {
    PageGeometry {
        page_width: 612.0,
        page_height: 500.0,
        left_pad: 36.0,
        right_pad: 36.0,
        vertical_pad: 36.0,
        gutter: 12.0,
        columns: 3,
    }
}

/// Content stream of every page, in page order
pub fn page_contents(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| String::from_utf8(doc.get_page_content(page_id).unwrap()).unwrap())
        .collect()
}
