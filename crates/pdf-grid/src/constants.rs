//! Shared constants for grid layout and PDF output
//!
//! Every length here is in points (1/72 inch) unless the name says otherwise.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Grid
// =============================================================================

/// Smallest cell width the packer will produce, even if it overflows the margins
pub const MIN_CELL_WIDTH_PT: f32 = 40.0;

/// Vertical space reserved at the top of each page when a header is present
pub const HEADER_SPACE_PT: f32 = 40.0;

/// Padding between a caption baseline band and the image above it
pub const CAPTION_PADDING_PT: f32 = 4.0;

// =============================================================================
// Text
// =============================================================================

/// Resource name of the built-in font in every page's font dictionary
pub const FONT_RESOURCE_NAME: &str = "F1";

/// Built-in font used for all text
pub const BASE_FONT: &str = "Helvetica";

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

pub const HEADER_FONT_SIZE: f32 = 14.0;
pub const FOOTER_FONT_SIZE: f32 = 10.0;
pub const PAGE_NUMBER_FONT_SIZE: f32 = 9.0;
pub const CAPTION_FONT_SIZE: f32 = 8.0;

// =============================================================================
// Decoration
// =============================================================================

/// Baseline of the header text, measured down from the top edge
pub const HEADER_TOP_OFFSET: f32 = 28.0;

/// Baseline of the footer and page number, measured up from the bottom edge
pub const FOOTER_BOTTOM_OFFSET: f32 = 18.0;

/// Logo height as a multiple of the header font size
pub const LOGO_HEIGHT_FACTOR: f32 = 1.6;

/// Gap between the logo and the header text
pub const LOGO_GAP: f32 = 6.0;

// =============================================================================
// Defaults
// =============================================================================

pub const DEFAULT_COLUMNS: usize = 3;
pub const DEFAULT_PADDING_PT: f32 = 36.0;
pub const DEFAULT_GUTTER_PT: f32 = 12.0;
pub const DEFAULT_MAX_IMAGE_SIDE: u32 = 1600;
pub const DEFAULT_JPEG_QUALITY: f32 = 0.85;
pub const DEFAULT_FILE_NAME: &str = "images.pdf";

/// Longest side of a preprocessed logo, in pixels
pub const LOGO_MAX_SIDE: u32 = 512;
