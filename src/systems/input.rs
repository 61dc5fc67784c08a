//! Input systems.
//!
//! [`update_input_state`] samples the pointer, the window and the keyboard
//! from Raylib each frame and triggers the matching events:
//!
//! - [`PointerMovedEvent`] when the pointer moves over the window, or with
//!   `None` on the frame it leaves it
//! - [`CellReleasedEvent`] when the left button is released over a cell
//! - [`ViewportResizedEvent`] when the window size changes
//! - [`SwitchDebugEvent`] when the debug key is pressed
use bevy_ecs::prelude::*;
use raylib::prelude::{MouseButton, Vector2};

use crate::components::cell::{Cell, CellOffset, CellShape, pick_cell};
use crate::components::mapposition::MapPosition;
use crate::events::pointer::{CellReleasedEvent, PointerMovedEvent, ViewportResizedEvent};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::pointer::{PointerChange, PointerState};

/// Poll Raylib for pointer, window and keyboard input.
pub fn update_input_state(
    mut pointer: ResMut<PointerState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    cells: Query<(&Cell, &MapPosition, &CellOffset, &CellShape)>,
    mut commands: Commands,
) {
    if rl.is_window_resized() {
        commands.trigger(ViewportResizedEvent {
            w: rl.get_screen_width(),
            h: rl.get_screen_height(),
        });
    }

    if rl.is_key_pressed(pointer.debug_key) {
        commands.trigger(SwitchDebugEvent {});
    }

    let position = rl.get_mouse_position();
    match pointer.sample(position, rl.is_cursor_on_screen()) {
        Some(PointerChange::Moved(p)) => commands.trigger(PointerMovedEvent { position: Some(p) }),
        Some(PointerChange::Left) => commands.trigger(PointerMovedEvent { position: None }),
        None => {}
    }

    if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
        let hit = pick_cell(
            position,
            cells.iter().map(|(cell, pos, off, shape)| {
                let center = Vector2 {
                    x: pos.pos.x + off.offset.x,
                    y: pos.pos.y + off.offset.y,
                };
                (cell.index, center, *shape)
            }),
        );
        if let Some(index) = hit {
            commands.trigger(CellReleasedEvent { index });
        }
    }
}
