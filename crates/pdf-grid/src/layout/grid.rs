//! Grid layout calculation
//!
//! Derives the square cell size and the number of rows that fit on a page
//! from the page geometry.

use crate::constants::{HEADER_SPACE_PT, MIN_CELL_WIDTH_PT};
use crate::options::PageGeometry;

use super::{GridPosition, Rect};

/// Grid derived from a page geometry
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows_per_page: usize,
    /// Width of each cell in points, never below `MIN_CELL_WIDTH_PT`
    pub cell_width: f32,
    /// Always equal to `cell_width`
    pub cell_height: f32,
    /// Space reserved above the grid for the header
    pub header_space: f32,
    pub page_width: f32,
    pub page_height: f32,
    pub left_pad: f32,
    pub vertical_pad: f32,
    pub gutter: f32,
}

impl GridLayout {
    /// Number of images that fit on one page
    pub fn capacity(&self) -> usize {
        self.columns * self.rows_per_page
    }

    /// Pages needed for `image_count` images; an empty batch still gets one page
    pub fn page_count(&self, image_count: usize) -> usize {
        image_count.div_ceil(self.capacity()).max(1)
    }
}

// =============================================================================
// Grid Creation
// =============================================================================

/// Create the grid for a page geometry.
///
/// # Arguments
/// * `geometry` - Page size, paddings, gutter and column count
/// * `has_header` - Whether header space must be reserved at the top
pub fn create_grid_layout(geometry: &PageGeometry, has_header: bool) -> GridLayout {
    let columns = geometry.effective_columns();
    let cell_width = cell_width(geometry);
    let cell_height = cell_width;
    let header_space = if has_header { HEADER_SPACE_PT } else { 0.0 };

    let usable = geometry.page_height - header_space - 2.0 * geometry.vertical_pad + geometry.gutter;
    let rows = (usable / (cell_height + geometry.gutter)).floor();
    let rows_per_page = if rows.is_finite() && rows >= 1.0 {
        rows as usize
    } else {
        1
    };

    GridLayout {
        columns,
        rows_per_page,
        cell_width,
        cell_height,
        header_space,
        page_width: geometry.page_width,
        page_height: geometry.page_height,
        left_pad: geometry.left_pad,
        vertical_pad: geometry.vertical_pad,
        gutter: geometry.gutter,
    }
}

/// Width of a square cell, clamped to the minimum.
///
/// The clamp may push cells past the right margin; that is accepted.
pub fn cell_width(geometry: &PageGeometry) -> f32 {
    let columns = geometry.effective_columns() as f32;
    let available = geometry.page_width
        - geometry.left_pad
        - geometry.right_pad
        - geometry.gutter * (columns - 1.0);
    (available / columns).max(MIN_CELL_WIDTH_PT)
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Bounds of the cell at a grid position, in PDF (bottom-up) coordinates.
///
/// Row 0 is the top row, just under the header space.
pub fn cell_bounds(grid: &GridLayout, pos: GridPosition) -> Rect {
    let x = grid.left_pad + pos.col as f32 * (grid.cell_width + grid.gutter);
    let y = (grid.page_height - grid.header_space)
        - grid.vertical_pad
        - grid.cell_height
        - pos.row as f32 * (grid.cell_height + grid.gutter);

    Rect::new(x, y, grid.cell_width, grid.cell_height)
}

// =============================================================================
// Tests
// =============================================================================
