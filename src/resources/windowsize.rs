//! Window size resource.
//!
//! Tracks the window dimensions in pixels. The grid is centred in this area;
//! it is refreshed when raylib reports a resize.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

/// Current window size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl WindowSize {
    pub fn as_vector(&self) -> Vector2 {
        Vector2 {
            x: self.w as f32,
            y: self.h as f32,
        }
    }
}
