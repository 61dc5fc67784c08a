//! Observers that connect input and timelines to the interaction controller.
//!
//! - [`pointer_move_observer`] – forwards pointer moves and leaves
//! - [`cell_release_observer`] – starts the explosion on a release
//! - [`viewport_resize_observer`] – relayouts the grid and re-measures it
//! - [`tween_callback_observer`] – runs timeline continuations
//!
//! Every observer writes the controller's [`TweenRequest`]s as messages;
//! [`apply_tween_requests`](crate::systems::tween::apply_tween_requests)
//! turns them into tweens later in the frame.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::cell::{Cell, CellOffset};
use crate::components::mapposition::MapPosition;
use crate::components::tween::{PhysicsTrack, Timeline, TweenCallback};
use crate::events::pointer::{CellReleasedEvent, PointerMovedEvent, ViewportResizedEvent};
use crate::events::tween::TweenCallbackEvent;
use crate::events::tweenrequest::TweenRequest;
use crate::resources::gridlayout::GridLayout;
use crate::resources::interaction::InteractionController;
use crate::resources::windowsize::WindowSize;
use crate::systems::gridlayout::{measure_centers, relayout_cells};

pub fn pointer_move_observer(
    trigger: On<PointerMovedEvent>,
    mut controller: ResMut<InteractionController>,
    mut requests: MessageWriter<TweenRequest>,
) {
    let event = trigger.event();
    requests.write_batch(controller.on_pointer_move(event.position));
}

pub fn cell_release_observer(
    trigger: On<CellReleasedEvent>,
    mut controller: ResMut<InteractionController>,
    mut requests: MessageWriter<TweenRequest>,
) {
    let event = trigger.event();
    if let Some(request) = controller.on_cell_release(event.index) {
        requests.write(request);
    }
}

/// Store the new window size, move resting centres to the new layout and
/// hand the re-measured centres to the controller.
pub fn viewport_resize_observer(
    trigger: On<ViewportResizedEvent>,
    mut window_size: ResMut<WindowSize>,
    layout: Res<GridLayout>,
    mut cells: ParamSet<(
        Query<(&Cell, &mut MapPosition)>,
        Query<(&Cell, &MapPosition, &CellOffset)>,
    )>,
    mut controller: ResMut<InteractionController>,
) {
    let event = trigger.event();
    window_size.w = event.w;
    window_size.h = event.h;
    debug!("Viewport resized to {}x{}", event.w, event.h);

    relayout_cells(&layout, window_size.as_vector(), cells.p0().iter_mut());
    let centers = measure_centers(layout.dims.len(), cells.p1().iter());
    controller.recompute_geometry(&centers);
}

/// Run the continuation a [`Timeline`] registered for the edge it reached.
pub fn tween_callback_observer(
    trigger: On<TweenCallbackEvent>,
    mut commands: Commands,
    mut timelines: Query<&mut Timeline>,
    mut tracks: Query<(Entity, &PhysicsTrack, &mut CellOffset)>,
    mut controller: ResMut<InteractionController>,
    mut requests: MessageWriter<TweenRequest>,
) {
    let event = trigger.event();
    match event.callback {
        TweenCallback::None => {}
        TweenCallback::SetTimeScale(scale) => match timelines.get_mut(event.timeline) {
            Ok(mut timeline) => {
                debug!("Timeline {:?} time scale -> {}", event.timeline, scale);
                timeline.set_time_scale(scale);
            }
            Err(_) => warn!("Time scale change for missing timeline {:?}", event.timeline),
        },
        TweenCallback::SettleExplosion => {
            // Land every cell at the start of its track before the reset
            // tweens capture their starting offsets.
            for (entity, track, mut off) in tracks.iter_mut() {
                if track.timeline == event.timeline {
                    off.offset = track.offset_at(0.0);
                    commands.entity(entity).remove::<PhysicsTrack>();
                }
            }
            match commands.get_entity(event.timeline) {
                Ok(mut timeline) => timeline.despawn(),
                Err(_) => warn!("Settling missing timeline {:?}", event.timeline),
            }
            requests.write_batch(controller.finish_explosion());
        }
    }
}
