pub mod export;
pub mod layout;
mod constants;
mod options;
mod pack;
mod preprocess;
mod render;
mod stats;
mod types;

pub use constants::*;
pub use export::{
    ExportOutput, ExportPhase, FAILURE_HINT, ImageInput, export_pdf, normalize_file_name,
};
pub use options::*;
pub use pack::{Packer, layout};
pub use preprocess::{load_image, process, process_image, target_dimensions};
pub use stats::calculate_statistics;
pub use types::*;
