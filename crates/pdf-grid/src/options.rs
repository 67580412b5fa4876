use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page dimensions and grid spacing, all in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub left_pad: f32,
    pub right_pad: f32,
    pub vertical_pad: f32,
    pub gutter: f32,
    /// Values below 1 are treated as 1
    pub columns: usize,
}

impl PageGeometry {
    pub fn from_preset(size: PageSize, orientation: Orientation) -> Self {
        let (page_width, page_height) = size.dimensions_pt(orientation);
        Self {
            page_width,
            page_height,
            ..Default::default()
        }
    }

    /// Column count with the lower bound applied
    pub fn effective_columns(&self) -> usize {
        self.columns.max(1)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        let (page_width, page_height) = PageSize::A4.dimensions_pt(Orientation::Portrait);
        Self {
            page_width,
            page_height,
            left_pad: DEFAULT_PADDING_PT,
            right_pad: DEFAULT_PADDING_PT,
            vertical_pad: DEFAULT_PADDING_PT,
            gutter: DEFAULT_GUTTER_PT,
            columns: DEFAULT_COLUMNS,
        }
    }
}

/// Per-page decoration applied after all images are placed
#[derive(Debug, Clone)]
pub struct Decoration {
    pub header: String,
    pub footer: String,
    pub logo: Option<ProcessedImage>,
    pub starting_page_number: usize,
    /// Draw each image's base file name beneath it
    pub captions: bool,
}

impl Default for Decoration {
    fn default() -> Self {
        Self {
            header: String::new(),
            footer: String::new(),
            logo: None,
            starting_page_number: 1,
            captions: false,
        }
    }
}

impl Decoration {
    pub fn has_header(&self) -> bool {
        !self.header.trim().is_empty()
    }

    pub fn has_footer(&self) -> bool {
        !self.footer.trim().is_empty()
    }
}

/// Everything a caller can configure for one export
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExportOptions {
    // Page
    pub page_size: PageSize,
    pub orientation: Orientation,

    // Grid
    pub columns: usize,
    pub vertical_pad: f32,
    pub left_pad: f32,
    pub right_pad: f32,
    pub gutter: f32,

    // Image preprocessing
    pub max_image_side: u32,
    pub jpeg_quality: f32,

    // Output
    pub file_name: String,

    // Decoration
    pub header: String,
    pub footer: String,
    pub logo: Option<PathBuf>,
    pub starting_page_number: usize,
    pub captions: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            columns: DEFAULT_COLUMNS,
            vertical_pad: DEFAULT_PADDING_PT,
            left_pad: DEFAULT_PADDING_PT,
            right_pad: DEFAULT_PADDING_PT,
            gutter: DEFAULT_GUTTER_PT,
            max_image_side: DEFAULT_MAX_IMAGE_SIDE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            file_name: String::new(),
            header: String::new(),
            footer: String::new(),
            logo: None,
            starting_page_number: 1,
            captions: false,
        }
    }
}

impl ExportOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| GridError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| GridError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("vertical padding", self.vertical_pad),
            ("left padding", self.left_pad),
            ("right padding", self.right_pad),
            ("gutter", self.gutter),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(GridError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.max_image_side == 0 {
            return Err(GridError::Config(
                "Maximum image side must be at least 1 pixel".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.jpeg_quality) {
            return Err(GridError::Config(format!(
                "JPEG quality must be between 0.0 and 1.0, got {}",
                self.jpeg_quality
            )));
        }

        Ok(())
    }

    pub fn geometry(&self) -> PageGeometry {
        let (page_width, page_height) = self.page_size.dimensions_pt(self.orientation);
        PageGeometry {
            page_width,
            page_height,
            left_pad: self.left_pad,
            right_pad: self.right_pad,
            vertical_pad: self.vertical_pad,
            gutter: self.gutter,
            columns: self.columns,
        }
    }

    /// Decoration without the logo, which has to be loaded and processed first
    pub fn decoration(&self) -> Decoration {
        Decoration {
            header: self.header.clone(),
            footer: self.footer.clone(),
            logo: None,
            starting_page_number: self.starting_page_number,
            captions: self.captions,
        }
    }
}
