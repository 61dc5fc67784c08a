//! Per-frame pointer resource.
//!
//! Remembers what the pointer did last frame so that
//! [`update_input_state`](crate::systems::input::update_input_state) can turn
//! raw raylib samples into discrete changes: moved, or left the window.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

/// A pointer change detected between two samples.
#[derive(Debug, Clone, Copy)]
pub enum PointerChange {
    /// The pointer is over the window at a new position.
    Moved(Vector2),
    /// The pointer was over the window last frame and is not anymore.
    Left,
}

/// Pointer state carried across frames.
#[derive(Resource, Debug, Clone)]
pub struct PointerState {
    /// Last position seen while the pointer was over the window. Cleared
    /// when the pointer leaves.
    pub position: Option<Vector2>,
    /// Whether the pointer was over the window at the last sample.
    pub on_screen: bool,
    /// Key that toggles the debug overlay.
    pub debug_key: KeyboardKey,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: None,
            on_screen: false,
            debug_key: KeyboardKey::KEY_F11,
        }
    }
}

impl PointerState {
    /// Record a sample and report what changed since the previous one.
    pub fn sample(&mut self, position: Vector2, on_screen: bool) -> Option<PointerChange> {
        let was_on_screen = self.on_screen;
        self.on_screen = on_screen;

        if !on_screen {
            if !was_on_screen {
                return None;
            }
            // Forget the last spot so coming back there still counts as a move.
            self.position = None;
            return Some(PointerChange::Left);
        }

        let moved = match self.position {
            Some(last) => last.x != position.x || last.y != position.y,
            None => true,
        };
        self.position = Some(position);
        moved.then_some(PointerChange::Moved(position))
    }
}
