//! Application systems.
//!
//! This module groups all ECS systems and observers that advance input,
//! interaction, animation, and rendering.
//!
//! Submodules overview
//! - [`gameconfig`] – apply window settings from [`crate::resources::gameconfig::GameConfig`]
//! - [`gridlayout`] – spawn cells from the grid layout and measure them
//! - [`input`] – sample pointer, window and keyboard; trigger input events
//! - [`interaction`] – observers feeding the interaction controller
//! - [`render`] – draw cells and the debug overlay using Raylib
//! - [`time`] – update simulation time and delta
//! - [`tween`] – offset tweens, physics tracks and timelines

pub mod gameconfig;
pub mod gridlayout;
pub mod input;
pub mod interaction;
pub mod render;
pub mod time;
pub mod tween;
