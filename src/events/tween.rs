//! Timeline callback events.
//!
//! When a [`Timeline`](crate::components::tween::Timeline) reaches one of its
//! ends, [`tween_timeline_system`](crate::systems::tween::tween_timeline_system)
//! triggers a [`TweenCallbackEvent`] carrying the continuation that was
//! registered with the request.
//!
//! # Related
//!
//! - [`crate::components::tween::TweenCallback`] – the continuation values
//! - [`crate::systems::interaction::tween_callback_observer`] – runs them

use bevy_ecs::prelude::*;

use crate::components::tween::TweenCallback;

/// Event emitted when a timeline reaches an edge.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TweenCallbackEvent {
    /// The entity holding the timeline.
    pub timeline: Entity,
    /// The continuation to run.
    pub callback: TweenCallback,
}
