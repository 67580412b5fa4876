//! Image placement within cells
//!
//! Walks the images in input order with a `GridCursor`, starting a new page
//! whenever the cursor runs past the last row.

use crate::constants::{CAPTION_FONT_SIZE, CAPTION_PADDING_PT};

use super::{GridCursor, GridLayout, ImagePlacement, PagePlan, Rect, cell_bounds};

/// Scale `width` x `height` uniformly to fit inside `area` and center it.
///
/// Never crops; the aspect ratio is preserved.
pub fn fit_within(area: &Rect, width: f32, height: f32) -> Rect {
    if width <= 0.0 || height <= 0.0 {
        return Rect::new(area.center_x(), area.center_y(), 0.0, 0.0);
    }

    let scale = (area.width / width).min(area.height / height);
    let scaled_width = width * scale;
    let scaled_height = height * scale;

    Rect::new(
        area.x + (area.width - scaled_width) / 2.0,
        area.y + (area.height - scaled_height) / 2.0,
        scaled_width,
        scaled_height,
    )
}

/// Split a cell into the image area and the caption band at its bottom
fn split_caption(cell: &Rect) -> (Rect, Rect) {
    let band_height = (CAPTION_FONT_SIZE + CAPTION_PADDING_PT).min(cell.height / 2.0);
    let band = Rect::new(cell.x, cell.y, cell.width, band_height);
    let image_area = Rect::new(
        cell.x,
        cell.y + band_height,
        cell.width,
        cell.height - band_height,
    );
    (image_area, band)
}

/// Paginate images into cells.
///
/// # Arguments
/// * `dimensions` - Pixel size of each image, in input order
/// * `grid` - The grid layout
/// * `captions` - Reserve a caption band in every cell
///
/// # Returns
/// One `PagePlan` per output page. An empty input yields a single empty page.
pub fn plan_pages(dimensions: &[(u32, u32)], grid: &GridLayout, captions: bool) -> Vec<PagePlan> {
    let mut pages = vec![PagePlan::default()];
    let mut cursor = GridCursor::new(grid.columns);

    for (image_index, &(width, height)) in dimensions.iter().enumerate() {
        if cursor.is_past(grid.rows_per_page) {
            pages.push(PagePlan::default());
            cursor.reset();
        }

        let cell = cell_bounds(grid, cursor.position);
        let (image_area, caption) = if captions {
            let (area, band) = split_caption(&cell);
            (area, Some(band))
        } else {
            (cell, None)
        };
        let image_rect = fit_within(&image_area, width as f32, height as f32);

        if let Some(page) = pages.last_mut() {
            page.placements.push(ImagePlacement {
                image_index,
                position: cursor.position,
                cell,
                image_rect,
                caption,
            });
        }

        cursor.advance();
    }

    pages
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GridPosition, create_grid_layout};
    use crate::options::PageGeometry;

    /// Grid with 3 columns and 2 rows per page
    fn two_row_grid() -> GridLayout {
        let geometry = PageGeometry {
            page_width: 612.0,
            page_height: 500.0,
            left_pad: 36.0,
            right_pad: 36.0,
            vertical_pad: 36.0,
            gutter: 12.0,
            columns: 3,
        };
        let grid = create_grid_layout(&geometry, false);
        assert_eq!(grid.rows_per_page, 2);
        grid
    }

    #[test]
    fn test_fit_landscape_image() {
        let cell = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rect = fit_within(&cell, 200.0, 100.0);

        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.height, 50.0);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 25.0);
    }

    #[test]
    fn test_fit_portrait_image_is_centered() {
        let cell = Rect::new(10.0, 20.0, 100.0, 100.0);
        let rect = fit_within(&cell, 50.0, 200.0);

        assert_eq!(rect.height, 100.0);
        assert_eq!(rect.width, 25.0);
        assert_eq!(rect.center_x(), cell.center_x());
        assert_eq!(rect.y, 20.0);
    }

    #[test]
    fn test_fit_upscales_small_images() {
        let cell = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rect = fit_within(&cell, 10.0, 10.0);
        assert_eq!(rect, cell);
    }

    #[test]
    fn test_seven_images_three_columns() {
        let grid = two_row_grid();
        let pages = plan_pages(&[(100, 100); 7], &grid, false);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].placements.len(), 6);
        assert_eq!(pages[1].placements.len(), 1);

        let last = &pages[1].placements[0];
        assert_eq!(last.image_index, 6);
        assert_eq!(last.position, GridPosition::new(0, 0));

        let positions: Vec<_> = pages[0].placements.iter().map(|p| p.position).collect();
        assert_eq!(
            positions,
            vec![
                GridPosition::new(0, 0),
                GridPosition::new(0, 1),
                GridPosition::new(0, 2),
                GridPosition::new(1, 0),
                GridPosition::new(1, 1),
                GridPosition::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_page_count_matches_capacity() {
        let grid = two_row_grid();
        for count in 0..20 {
            let pages = plan_pages(&vec![(40, 30); count], &grid, false);
            assert_eq!(pages.len(), grid.page_count(count), "count = {}", count);
        }
    }

    #[test]
    fn test_empty_input_yields_one_page() {
        let pages = plan_pages(&[], &two_row_grid(), false);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].placements.is_empty());
    }

    #[test]
    fn test_caption_band_reserved() {
        let grid = two_row_grid();
        let pages = plan_pages(&[(100, 100)], &grid, true);
        let placement = &pages[0].placements[0];

        let band = placement.caption.expect("caption band");
        assert_eq!(band.y, placement.cell.y);
        assert_eq!(band.height, CAPTION_FONT_SIZE + CAPTION_PADDING_PT);
        assert!(placement.image_rect.y >= band.top());
        assert!(placement.image_rect.top() <= placement.cell.top());
    }
}
