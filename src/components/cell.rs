//! Grid cell components.
//!
//! Every grid element is one entity carrying:
//! - [`Cell`] – its row-major index and grid coordinates
//! - [`MapPosition`](super::mapposition::MapPosition) – the resting centre
//! - [`CellOffset`] – the animated displacement written by the tween systems
//! - [`CellShape`] – the drawn size
//!
//! Controller-side bookkeeping (measured centre, pulled flag) is *not* stored
//! here; see [`crate::resources::interaction::InteractionController`].

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Identity of a grid cell. `index == row * cols + col`.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub index: usize,
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(index: usize, row: usize, col: usize) -> Self {
        Self { index, row, col }
    }
}

/// Animation offset applied on top of the resting position.
#[derive(Component, Clone, Copy, Debug)]
pub struct CellOffset {
    pub offset: Vector2,
}

impl Default for CellOffset {
    fn default() -> Self {
        Self {
            offset: Vector2 { x: 0.0, y: 0.0 },
        }
    }
}

/// Drawn size of a cell in pixels. The rectangle is centred on the cell's
/// displayed centre.
#[derive(Component, Clone, Copy, Debug)]
pub struct CellShape {
    pub size: Vector2,
    /// Corner roundness passed to the rounded-rectangle draw call (0..1).
    pub roundness: f32,
}

impl CellShape {
    pub fn square(side: f32) -> Self {
        Self {
            size: Vector2 { x: side, y: side },
            roundness: 0.25,
        }
    }

    /// Whether `point` falls inside the rectangle centred on `center`.
    /// Edges are inclusive.
    pub fn contains(&self, center: Vector2, point: Vector2) -> bool {
        let half_w = self.size.x * 0.5;
        let half_h = self.size.y * 0.5;
        point.x >= center.x - half_w
            && point.x <= center.x + half_w
            && point.y >= center.y - half_h
            && point.y <= center.y + half_h
    }
}

/// Pick the cell under `point`.
///
/// `cells` yields `(index, displayed_centre, shape)`. When displaced cells
/// overlap, the one drawn last (highest index) wins.
pub fn pick_cell<I>(point: Vector2, cells: I) -> Option<usize>
where
    I: IntoIterator<Item = (usize, Vector2, CellShape)>,
{
    cells
        .into_iter()
        .filter(|(_, center, shape)| shape.contains(*center, point))
        .map(|(index, _, _)| index)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vector2 {
        Vector2 { x, y }
    }

    #[test]
    fn test_contains_inside_and_edges() {
        let shape = CellShape::square(10.0);
        let c = v(100.0, 100.0);
        assert!(shape.contains(c, v(100.0, 100.0)));
        assert!(shape.contains(c, v(95.0, 105.0)));
        assert!(!shape.contains(c, v(94.9, 100.0)));
        assert!(!shape.contains(c, v(100.0, 105.1)));
    }

    #[test]
    fn test_pick_cell_none_when_outside() {
        let shape = CellShape::square(10.0);
        let cells = vec![(0, v(0.0, 0.0), shape), (1, v(20.0, 0.0), shape)];
        assert_eq!(pick_cell(v(10.0, 0.0), cells), None);
    }

    #[test]
    fn test_pick_cell_prefers_highest_index_on_overlap() {
        let shape = CellShape::square(10.0);
        let cells = vec![
            (4, v(0.0, 0.0), shape),
            (7, v(3.0, 0.0), shape),
            (2, v(50.0, 0.0), shape),
        ];
        assert_eq!(pick_cell(v(1.0, 0.0), cells), Some(7));
    }

    #[test]
    fn test_offset_default_is_zero() {
        let off = CellOffset::default();
        assert_eq!(off.offset.x, 0.0);
        assert_eq!(off.offset.y, 0.0);
    }
}
