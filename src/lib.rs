//! Magnet grid library.
//!
//! A grid of cells that leans toward the pointer and bursts apart on click.
//! This module exposes the ECS components, resources, systems, and events
//! for the binary and for integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
