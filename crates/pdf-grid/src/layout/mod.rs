//! Grid geometry for image pages
//!
//! This module handles every calculation that does not touch the PDF:
//! - Cell size and rows per page derived from the page geometry
//! - Cursor advancement and pagination
//! - Fitting and centering an image inside its cell

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
