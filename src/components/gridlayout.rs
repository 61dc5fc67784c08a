//! Grid layout description.
//!
//! [`GridLayoutData`] describes the grid of cells: one string per row, one
//! glyph per cell, and a legend mapping each glyph to a fill colour. It can be
//! built from the `[grid]` config section ([`GridLayoutData::checkerboard`])
//! or read from a JSON file:
//!
//! ```json
//! {
//!   "cell_size": 56.0,
//!   "gap": 8.0,
//!   "grid": ["ABAB", "BABA", "ABAB", "BABA"],
//!   "legend": { "A": "#3b82f6", "B": "#1e3a8a" }
//! }
//! ```
//!
//! Every row must hold the same number of cells. The stagger of the
//! explosion animation treats the cells as a `rows × cols` matrix, so a
//! ragged layout is rejected by [`GridLayoutData::validate`] instead of being
//! silently mis-staggered.

use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::tint::Tint;

/// Dimensions of a validated grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    pub rows: usize,
    pub cols: usize,
}

impl GridDims {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major `(row, col)` of a cell index.
    pub fn coords(&self, index: usize) -> (usize, usize) {
        let cols = self.cols.max(1);
        (index / cols, index % cols)
    }
}

/// Reasons a layout cannot be used.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse layout JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("layout has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("glyph '{glyph}' at row {row}, column {col} is not in the legend")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("legend colour '{value}' for glyph '{glyph}' is not a hex colour")]
    BadColor { glyph: char, value: String },
    #[error("cell size must be positive, got {0}")]
    BadCellSize(f32),
}

/// Structure representing the grid layout data loaded from JSON.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GridLayoutData {
    pub cell_size: f32,
    #[serde(default)]
    pub gap: f32,
    pub grid: Vec<String>,
    pub legend: FxHashMap<char, String>,
}

impl GridLayoutData {
    /// A `rows × cols` grid with two alternating colours.
    pub fn checkerboard(rows: usize, cols: usize, cell_size: f32, gap: f32) -> Self {
        let grid = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| if (r + c) % 2 == 0 { 'A' } else { 'B' })
                    .collect()
            })
            .collect();
        let mut legend = FxHashMap::default();
        legend.insert('A', "#e2e8f0".to_string());
        legend.insert('B', "#94a3b8".to_string());
        Self {
            cell_size,
            gap,
            grid,
            legend,
        }
    }

    /// Loads grid layout data from a JSON file at the specified path.
    pub fn load_from_file(path: &str) -> Result<Self, LayoutError> {
        let file_content = std::fs::read_to_string(path)?;
        let layout_data: GridLayoutData = serde_json::from_str(&file_content)?;
        Ok(layout_data)
    }

    /// Check the layout and return its dimensions.
    pub fn validate(&self) -> Result<GridDims, LayoutError> {
        if !(self.cell_size > 0.0) {
            return Err(LayoutError::BadCellSize(self.cell_size));
        }
        let cols = self.grid.first().map(|r| r.chars().count()).unwrap_or(0);
        if cols == 0 {
            return Err(LayoutError::Empty);
        }
        for (row, line) in self.grid.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let Some(value) = self.legend.get(&glyph) else {
                    return Err(LayoutError::UnknownGlyph { glyph, row, col });
                };
                if Tint::from_hex(value).is_none() {
                    return Err(LayoutError::BadColor {
                        glyph,
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(GridDims::new(self.grid.len(), cols))
    }

    /// Fill colour of the cell at `(row, col)`. Falls back to white for
    /// positions a validated layout would not produce.
    pub fn tint_at(&self, row: usize, col: usize) -> Tint {
        self.grid
            .get(row)
            .and_then(|line| line.chars().nth(col))
            .and_then(|glyph| self.legend.get(&glyph))
            .and_then(|hex| Tint::from_hex(hex))
            .unwrap_or_default()
    }

    /// Resting centre of the cell at `(row, col)` with the whole grid centred
    /// in a window of size `window`.
    pub fn cell_center(&self, dims: GridDims, row: usize, col: usize, window: Vector2) -> Vector2 {
        let pitch = self.cell_size + self.gap;
        let span = |n: usize| n as f32 * self.cell_size + n.saturating_sub(1) as f32 * self.gap;
        let left = (window.x - span(dims.cols)) * 0.5;
        let top = (window.y - span(dims.rows)) * 0.5;
        Vector2 {
            x: left + col as f32 * pitch + self.cell_size * 0.5,
            y: top + row as f32 * pitch + self.cell_size * 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_checkerboard_validates() {
        let layout = GridLayoutData::checkerboard(4, 5, 40.0, 4.0);
        let dims = layout.validate().unwrap();
        assert_eq!(dims, GridDims::new(4, 5));
        assert_eq!(dims.len(), 20);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let mut layout = GridLayoutData::checkerboard(3, 3, 40.0, 4.0);
        layout.grid[1].push('A');
        match layout.validate() {
            Err(LayoutError::RaggedRow {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 1);
                assert_eq!(expected, 3);
                assert_eq!(found, 4);
            }
            other => panic!("expected RaggedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_glyph_rejected() {
        let mut layout = GridLayoutData::checkerboard(2, 2, 40.0, 4.0);
        layout.grid[1] = "AZ".to_string();
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::UnknownGlyph {
                glyph: 'Z',
                row: 1,
                col: 1
            })
        ));
    }

    #[test]
    fn test_empty_rejected() {
        let mut layout = GridLayoutData::checkerboard(1, 1, 40.0, 4.0);
        layout.grid.clear();
        assert!(matches!(layout.validate(), Err(LayoutError::Empty)));
    }

    #[test]
    fn test_bad_color_rejected() {
        let mut layout = GridLayoutData::checkerboard(1, 2, 40.0, 4.0);
        layout.legend.insert('B', "blue".to_string());
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::BadColor { glyph: 'B', .. })
        ));
    }

    #[test]
    fn test_parse_json_layout() {
        let json = r##"{
            "cell_size": 50.0,
            "grid": ["AB", "BA"],
            "legend": { "A": "#ffffff", "B": "#000000" }
        }"##;
        let layout: GridLayoutData = serde_json::from_str(json).unwrap();
        assert!(approx_eq(layout.gap, 0.0));
        assert_eq!(layout.validate().unwrap(), GridDims::new(2, 2));
        assert_eq!(layout.tint_at(0, 1).color.r, 0);
    }

    #[test]
    fn test_bundled_layout_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/layouts/rainbow.json");
        let layout = GridLayoutData::load_from_file(path).unwrap();
        assert_eq!(layout.validate().unwrap(), GridDims::new(6, 8));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            GridLayoutData::load_from_file("/nonexistent/layout.json"),
            Err(LayoutError::Io(_))
        ));
    }

    #[test]
    fn test_cell_center_is_centred_in_window() {
        // 2x2 cells of 10 with a gap of 2: span 22, window 100 -> left 39
        let layout = GridLayoutData::checkerboard(2, 2, 10.0, 2.0);
        let dims = layout.validate().unwrap();
        let window = Vector2 { x: 100.0, y: 50.0 };
        let c00 = layout.cell_center(dims, 0, 0, window);
        let c11 = layout.cell_center(dims, 1, 1, window);
        assert!(approx_eq(c00.x, 44.0));
        assert!(approx_eq(c00.y, 19.0));
        assert!(approx_eq(c11.x, 56.0));
        assert!(approx_eq(c11.y, 31.0));
    }

    #[test]
    fn test_coords_row_major() {
        let dims = GridDims::new(4, 4);
        assert_eq!(dims.coords(3), (0, 3));
        assert_eq!(dims.coords(4), (1, 0));
        assert_eq!(dims.coords(15), (3, 3));
    }
}
