use crate::layout::create_grid_layout;
use crate::options::{Decoration, PageGeometry};
use crate::types::*;

/// Calculate pagination for `image_count` images without decoding any of them
pub fn calculate_statistics(
    image_count: usize,
    geometry: &PageGeometry,
    decoration: &Decoration,
) -> GridStatistics {
    let grid = create_grid_layout(geometry, decoration.has_header());

    GridStatistics {
        image_count,
        columns: grid.columns,
        rows_per_page: grid.rows_per_page,
        capacity_per_page: grid.capacity(),
        page_count: grid.page_count(image_count),
        cell_size_pt: grid.cell_width,
    }
}
