//! Layout data types
//!
//! These types sit between the grid calculation and PDF rendering.

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Mutable placement state for the packer
///
/// Moves left to right, then top to bottom. The caller decides when a page
/// is full by comparing `position.row` against the rows per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    pub position: GridPosition,
    columns: usize,
}

impl GridCursor {
    pub fn new(columns: usize) -> Self {
        Self {
            position: GridPosition::default(),
            columns: columns.max(1),
        }
    }

    /// Move to the next cell, wrapping to the next row after the last column
    pub fn advance(&mut self) {
        self.position.col += 1;
        if self.position.col >= self.columns {
            self.position.col = 0;
            self.position.row += 1;
        }
    }

    pub fn reset(&mut self) {
        self.position = GridPosition::default();
    }

    pub fn is_past(&self, rows_per_page: usize) -> bool {
        self.position.row >= rows_per_page
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Final position of one image on a page
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    /// Index into the input image sequence
    pub image_index: usize,
    pub position: GridPosition,
    /// The whole cell, including any caption band
    pub cell: Rect,
    /// Where the scaled image is drawn
    pub image_rect: Rect,
    /// Caption band below the image, when captions are enabled
    pub caption: Option<Rect>,
}

/// All placements on one output page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PagePlan {
    pub placements: Vec<ImagePlacement>,
}
