//! Scene setup.
//!
//! [`initialize`] builds the whole interactive grid in a [`World`]: it spawns
//! the cells, measures them, inserts the [`InteractionController`] and
//! registers the observers that keep it fed for the rest of the run.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::cell::{Cell, CellOffset};
use crate::components::mapposition::MapPosition;
use crate::events::switchdebug::switch_debug_observer;
use crate::events::tweenrequest::TweenRequest;
use crate::resources::gridlayout::GridLayout;
use crate::resources::interaction::{InteractionController, InteractionTuning};
use crate::resources::pointer::PointerState;
use crate::resources::tweenrng::TweenRng;
use crate::resources::windowsize::WindowSize;
use crate::resources::worldtime::WorldTime;
use crate::systems::gridlayout::{measure_centers, spawn_grid_cells};
use crate::systems::interaction::{
    cell_release_observer, pointer_move_observer, tween_callback_observer,
    viewport_resize_observer,
};

/// Set up the grid described by `layout` and wire the interaction.
///
/// Expects a [`WindowSize`] resource; falls back to an empty window
/// otherwise. [`WorldTime`], [`TweenRng`] and [`PointerState`] are created
/// with defaults when missing, so callers only insert the ones they want to
/// customise (e.g. a seeded RNG).
pub fn initialize(world: &mut World, layout: GridLayout, tuning: InteractionTuning) {
    world.init_resource::<WorldTime>();
    world.init_resource::<TweenRng>();
    world.init_resource::<PointerState>();
    world.init_resource::<Messages<TweenRequest>>();
    if !world.contains_resource::<WindowSize>() {
        world.insert_resource(WindowSize { w: 0, h: 0 });
    }

    let dims = layout.dims;
    world.insert_resource(layout);
    spawn_grid_cells(world);

    let centers = {
        let mut q = world.query::<(&Cell, &MapPosition, &CellOffset)>();
        measure_centers(dims.len(), q.iter(world))
    };
    let mut controller = InteractionController::new(dims, tuning);
    controller.recompute_geometry(&centers);
    world.insert_resource(controller);

    world.spawn(Observer::new(viewport_resize_observer));
    world.spawn(Observer::new(pointer_move_observer));
    world.spawn(Observer::new(cell_release_observer));
    world.spawn(Observer::new(tween_callback_observer));
    world.spawn(Observer::new(switch_debug_observer));
    // Observers must exist before any system triggers an event.
    world.flush();

    info!("Interaction ready on a {}x{} grid", dims.rows, dims.cols);
}
