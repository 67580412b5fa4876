//! Image XObject creation
//!
//! JPEG data is embedded untouched with the DCT filter. PNG data is decoded
//! and stored as zlib-compressed RGB, with the alpha channel split into a
//! soft mask when the image has any transparency.

use crate::types::*;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::ImageFormat;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;

/// Add a processed image to the document and return its XObject id.
///
/// Consumes the image so its encoded bytes move into the PDF stream.
pub fn create_image_xobject(output: &mut Document, image: ProcessedImage) -> Result<ObjectId> {
    match image.encoding {
        ImageEncoding::Jpeg => {
            let dict = image_dictionary(image.width, image.height, "DeviceRGB", "DCTDecode");
            Ok(output.add_object(Stream::new(dict, image.bytes)))
        }
        ImageEncoding::Png => create_png_xobject(output, &image),
    }
}

fn create_png_xobject(output: &mut Document, image: &ProcessedImage) -> Result<ObjectId> {
    let decoded = image::load_from_memory_with_format(&image.bytes, ImageFormat::Png)
        .map_err(|e| GridError::Encode(format!("{}: {}", image.name, e)))?;
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();

    let pixel_count = (width as usize) * (height as usize);
    let mut rgb_data = Vec::with_capacity(pixel_count * 3);
    let mut alpha_data = Vec::with_capacity(pixel_count);
    for pixel in rgba.pixels() {
        rgb_data.extend_from_slice(&pixel.0[..3]);
        alpha_data.push(pixel.0[3]);
    }
    drop(rgba);

    let mut dict = image_dictionary(width, height, "DeviceRGB", "FlateDecode");

    if alpha_data.iter().any(|&alpha| alpha < u8::MAX) {
        let smask_dict = image_dictionary(width, height, "DeviceGray", "FlateDecode");
        let smask_id = output.add_object(Stream::new(smask_dict, zlib(&alpha_data)?));
        dict.set("SMask", Object::Reference(smask_id));
    }

    Ok(output.add_object(Stream::new(dict, zlib(&rgb_data)?)))
}

fn image_dictionary(width: u32, height: u32, color_space: &str, filter: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(color_space.as_bytes().to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
    dict
}

fn zlib(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| GridError::Encode(format!("Failed to compress image data: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| GridError::Encode(format!("Failed to finish compression: {}", e)))
}
