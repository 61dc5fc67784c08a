//! Debug overlay toggle.
//!
//! When this resource is present the render system also draws every cell's
//! measured centre and pull radius, plus the interaction state.

use bevy_ecs::prelude::Resource;

/// Marker resource: present while the debug overlay is on.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
