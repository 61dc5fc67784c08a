use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Resting centre of a cell in window coordinates, as laid out by the grid.
///
/// The animated displacement lives in [`CellOffset`](super::cell::CellOffset);
/// the drawn centre is `pos + offset`.
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }
}
