//! ECS components for entities.
//!
//! Submodules overview:
//! - [`cell`] – grid cell identity, animated offset, drawn shape, hit testing
//! - [`gridlayout`] – grid description (rows of glyphs + colour legend) and validation
//! - [`mapposition`] – resting centre of a cell in window coordinates
//! - [`tint`] – fill colour
//! - [`tween`] – offset tweens, physics tracks and reversible timelines

pub mod cell;
pub mod gridlayout;
pub mod mapposition;
pub mod tint;
pub mod tween;
