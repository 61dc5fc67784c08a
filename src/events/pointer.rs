//! Pointer and window events.
//!
//! [`update_input_state`](crate::systems::input::update_input_state) samples
//! raylib once per frame and triggers these events. Observers in
//! [`crate::systems::interaction`] react to them.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

/// The pointer moved, or left the window.
///
/// `position` is `None` when the pointer left the window; handlers treat that
/// as a pointer infinitely far from every cell.
#[derive(Event, Debug, Clone, Copy)]
pub struct PointerMovedEvent {
    pub position: Option<Vector2>,
}

/// The primary button was released over a cell.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellReleasedEvent {
    /// Row-major index of the cell under the pointer.
    pub index: usize,
}

/// The window was resized.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportResizedEvent {
    pub w: i32,
    pub h: i32,
}
