//! End-to-end export: preprocess every image, pack, serialize
//!
//! Images are preprocessed strictly one at a time so at most one decoded
//! image is alive at any point. Progress is reported through a callback at
//! every phase transition.

use crate::constants::{DEFAULT_FILE_NAME, LOGO_MAX_SIDE};
use crate::options::ExportOptions;
use crate::pack::Packer;
use crate::preprocess::{load_image, process_image};
use crate::types::*;
use std::fmt;
use std::path::PathBuf;

/// Message shown to the user for any failed export
pub const FAILURE_HINT: &str =
    "Failed to generate PDF. Try a lower maximum image size or fewer columns.";

/// Where one image comes from
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// Read from disk right before it is processed
    File(PathBuf),
    /// Already in memory
    Memory(ImageSource),
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        ImageInput::File(path)
    }
}

impl From<ImageSource> for ImageInput {
    fn from(source: ImageSource) -> Self {
        ImageInput::Memory(source)
    }
}

impl ImageInput {
    async fn load(self) -> Result<ImageSource> {
        match self {
            ImageInput::File(path) => load_image(path).await,
            ImageInput::Memory(source) => Ok(source),
        }
    }
}

/// Phases of one export
#[derive(Debug, Clone, PartialEq)]
pub enum ExportPhase {
    Idle,
    Preparing,
    /// `index` is zero-based
    ProcessingImage { index: usize, total: usize },
    Decorating,
    Serializing,
    Done { page_count: usize, byte_len: usize },
    Failed { message: String },
}

impl ExportPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportPhase::Done { .. } | ExportPhase::Failed { .. })
    }
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportPhase::Idle => write!(f, "Ready"),
            ExportPhase::Preparing => write!(f, "Preparing images..."),
            ExportPhase::ProcessingImage { index, total } => {
                write!(f, "Processing image {} of {}", index + 1, total)
            }
            ExportPhase::Decorating => write!(f, "Building PDF..."),
            ExportPhase::Serializing => write!(f, "Saving PDF..."),
            ExportPhase::Done {
                page_count,
                byte_len,
            } => {
                let noun = if *page_count == 1 { "page" } else { "pages" };
                write!(f, "Done: {} {}, {}", page_count, noun, format_size(*byte_len))
            }
            ExportPhase::Failed { message } => write!(f, "{}", message),
        }
    }
}

/// A finished PDF
#[derive(Debug, Clone)]
pub struct ExportOutput {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Clean up a caller-supplied output name.
///
/// Trims whitespace, falls back to a default for empty names and appends
/// `.pdf` unless the name already ends with it (any case).
pub fn normalize_file_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_FILE_NAME.to_string();
    }
    if trimmed.to_ascii_lowercase().ends_with(".pdf") {
        trimmed.to_string()
    } else {
        format!("{}.pdf", trimmed)
    }
}

/// Run a complete export.
///
/// # Arguments
/// * `inputs` - Images in output order
/// * `options` - Page, grid, preprocessing and decoration settings
/// * `progress` - Called at each phase transition, ending with `Done` or `Failed`
pub async fn export_pdf<I, F>(inputs: I, options: &ExportOptions, mut progress: F) -> Result<ExportOutput>
where
    I: IntoIterator<Item = ImageInput>,
    F: FnMut(&ExportPhase),
{
    let inputs: Vec<ImageInput> = inputs.into_iter().collect();
    let result = run_export(inputs, options, &mut progress).await;

    match &result {
        Ok(output) => progress(&ExportPhase::Done {
            page_count: output.page_count,
            byte_len: output.bytes.len(),
        }),
        Err(e) => progress(&ExportPhase::Failed {
            message: e.to_string(),
        }),
    }
    result
}

async fn run_export<F>(
    inputs: Vec<ImageInput>,
    options: &ExportOptions,
    progress: &mut F,
) -> Result<ExportOutput>
where
    F: FnMut(&ExportPhase),
{
    progress(&ExportPhase::Preparing);
    options.validate()?;

    let file_name = normalize_file_name(&options.file_name);
    let geometry = options.geometry();
    let mut decoration = options.decoration();

    if let Some(path) = &options.logo {
        let source = load_image(path).await?;
        decoration.logo = Some(process_image(source, LOGO_MAX_SIDE, options.jpeg_quality).await?);
    }

    let total = inputs.len();
    log::info!("Exporting {} images to {}", total, file_name);

    let mut processed = Vec::with_capacity(total);
    for (index, input) in inputs.into_iter().enumerate() {
        progress(&ExportPhase::ProcessingImage { index, total });
        let source = input.load().await?;
        let image = process_image(source, options.max_image_side, options.jpeg_quality).await?;
        processed.push(image);
    }

    progress(&ExportPhase::Decorating);
    let packer = tokio::task::spawn_blocking(move || {
        let mut packer = Packer::new(&geometry, decoration);
        packer.place_images(processed)?;
        packer.decorate()?;
        Ok::<_, GridError>(packer)
    })
    .await??;
    let page_count = packer.page_count();

    progress(&ExportPhase::Serializing);
    let bytes = tokio::task::spawn_blocking(move || packer.finish()).await??;

    log::info!(
        "Exported {} ({} pages, {} bytes)",
        file_name,
        page_count,
        bytes.len()
    );

    Ok(ExportOutput {
        file_name,
        bytes,
        page_count,
    })
}

fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let bytes = bytes as f64;
    if bytes >= MB {
        format!("{:.1} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{} B", bytes)
    }
}
