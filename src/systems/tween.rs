//! Tween animation systems.
//!
//! - [`apply_tween_requests`] – turns [`TweenRequest`] messages into tween
//!   components on the targeted cells
//! - [`tween_offset_system`] – eases [`TweenOffset`]s and removes them when done
//! - [`tween_timeline_system`] – advances [`Timeline`] clocks and triggers
//!   [`TweenCallbackEvent`] at their edges
//! - [`tween_physics_system`] – places cells on their [`PhysicsTrack`]
//! - [`update_tween_request_messages`] – advances the request message queue
//!
//! The systems read delta time from [`WorldTime`](crate::resources::worldtime::WorldTime).

use std::f32::consts::TAU;

use bevy_ecs::prelude::*;
use log::{debug, warn};
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

use crate::components::cell::{Cell, CellOffset};
use crate::components::tween::{Easing, PhysicsTrack, Timeline, TweenOffset};
use crate::events::tween::TweenCallbackEvent;
use crate::events::tweenrequest::{ExplosionTween, TweenRequest, TweenTargets};
use crate::resources::tweenrng::TweenRng;
use crate::resources::worldtime::WorldTime;

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve. Elastic curves overshoot 1.0 in between.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
        Easing::ElasticOut { amplitude, period } => {
            if t >= 1.0 {
                return 1.0;
            }
            let a = amplitude.max(1.0);
            let p = period / amplitude.min(1.0);
            let shift = p / TAU * (1.0 / a).asin();
            a * 2f32.powf(-10.0 * t) * ((t - shift) * TAU / p).sin() + 1.0
        }
    }
}

/// Linearly interpolate between two 2D vectors.
pub(crate) fn lerp_v2(a: Vector2, b: Vector2, t: f32) -> Vector2 {
    Vector2 {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    }
}

/// Resolve request targets to `(entity, index, current offset)`, sorted by index.
fn resolve_targets(
    targets: TweenTargets,
    cells: &FxHashMap<usize, (Entity, Vector2)>,
) -> Vec<(Entity, usize, Vector2)> {
    match targets {
        TweenTargets::Cell(index) => match cells.get(&index) {
            Some((entity, offset)) => vec![(*entity, index, *offset)],
            None => {
                warn!("Tween request for unknown cell {}", index);
                Vec::new()
            }
        },
        TweenTargets::AllCells => {
            let mut all: Vec<_> = cells
                .iter()
                .map(|(index, (entity, offset))| (*entity, *index, *offset))
                .collect();
            all.sort_by_key(|(_, index, _)| *index);
            all
        }
    }
}

fn spawn_explosion(
    commands: &mut Commands,
    rng: &mut TweenRng,
    explosion: &ExplosionTween,
    targets: &[(Entity, usize, Vector2)],
) {
    let Some(max_index) = targets.iter().map(|(_, index, _)| *index).max() else {
        return;
    };
    let delays = explosion.stagger.delays(max_index + 1);
    let longest_delay = targets
        .iter()
        .map(|(_, index, _)| delays[*index])
        .fold(0.0, f32::max);

    let timeline = commands
        .spawn(
            Timeline::new(explosion.duration + longest_delay)
                .with_callbacks(explosion.on_complete, explosion.on_reverse_complete),
        )
        .id();

    for (entity, index, offset) in targets {
        let speed = rng.in_range(explosion.physics.velocity);
        let angle = rng.in_range(explosion.physics.angle);
        commands
            .entity(*entity)
            .remove::<TweenOffset>()
            .insert(PhysicsTrack::from_polar(
                timeline,
                *offset,
                speed,
                angle,
                explosion.physics.gravity,
                delays[*index],
                explosion.duration,
            ));
    }
    debug!(
        "Explosion timeline {:?}: {} cells, {:.2}s",
        timeline,
        targets.len(),
        explosion.duration + longest_delay
    );
}

/// Turn pending [`TweenRequest`]s into tween components.
///
/// Offset tweens start from each cell's current offset and replace any
/// running offset tween. Explosions spawn one [`Timeline`] and give every
/// target a [`PhysicsTrack`] with its own random speed and angle, cancelling
/// running offset tweens.
pub fn apply_tween_requests(
    mut commands: Commands,
    mut reader: MessageReader<TweenRequest>,
    cells: Query<(Entity, &Cell, &CellOffset)>,
    mut rng: ResMut<TweenRng>,
) {
    if reader.is_empty() {
        return;
    }
    let by_index: FxHashMap<usize, (Entity, Vector2)> = cells
        .iter()
        .map(|(entity, cell, offset)| (cell.index, (entity, offset.offset)))
        .collect();

    for request in reader.read() {
        let targets = resolve_targets(request.targets(), &by_index);
        match request {
            TweenRequest::Offset(tween) => {
                let easing = tween.easing.unwrap_or_default();
                for (entity, _, offset) in targets {
                    commands.entity(entity).insert(
                        TweenOffset::new(offset, tween.to, tween.duration).with_easing(easing),
                    );
                }
            }
            TweenRequest::Explosion(explosion) => {
                spawn_explosion(&mut commands, &mut rng, explosion, &targets);
            }
        }
    }
}

/// Animate cell offsets based on [`TweenOffset`] components.
pub fn tween_offset_system(
    world_time: Res<WorldTime>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut CellOffset, &mut TweenOffset)>,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut off, mut tw) in query.iter_mut() {
        tw.time = (tw.time + dt).min(tw.duration);
        let t = if tw.duration > 0.0 {
            ease(tw.easing, tw.time / tw.duration)
        } else {
            1.0
        };
        off.offset = lerp_v2(tw.from, tw.to, t);
        if tw.finished() {
            commands.entity(entity).remove::<TweenOffset>();
        }
    }
}

/// Advance every [`Timeline`] and trigger its callback on reaching an edge.
pub fn tween_timeline_system(
    world_time: Res<WorldTime>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut Timeline)>,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut timeline) in query.iter_mut() {
        if let Some(edge) = timeline.advance(dt) {
            let callback = timeline.callback_for(edge);
            debug!("Timeline {:?} reached {:?}", entity, edge);
            commands.trigger(TweenCallbackEvent {
                timeline: entity,
                callback,
            });
        }
    }
}

/// Position cells along their [`PhysicsTrack`] at the owning timeline's time.
pub fn tween_physics_system(
    timelines: Query<&Timeline>,
    mut tracks: Query<(&PhysicsTrack, &mut CellOffset)>,
) {
    for (track, mut off) in tracks.iter_mut() {
        if let Ok(timeline) = timelines.get(track.timeline) {
            off.offset = track.offset_at(timeline.time);
        }
    }
}

/// Advance the ECS message queue for [`TweenRequest`]. Run once per frame.
pub fn update_tween_request_messages(mut msgs: ResMut<Messages<TweenRequest>>) {
    msgs.update();
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    const ELASTIC: Easing = Easing::ElasticOut {
        amplitude: 1.0,
        period: 0.3,
    };

    const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        ELASTIC,
    ];

    // ==================== EASING FUNCTION TESTS ====================

    #[test]
    fn test_ease_all_types_at_zero() {
        for easing in ALL {
            assert!(
                approx_eq(ease(easing, 0.0), 0.0),
                "{:?} at t=0.0 should be 0.0",
                easing
            );
        }
    }

    #[test]
    fn test_ease_all_types_at_one() {
        for easing in ALL {
            assert!(
                approx_eq(ease(easing, 1.0), 1.0),
                "{:?} at t=1.0 should be 1.0",
                easing
            );
        }
    }

    #[test]
    fn test_ease_clamps_out_of_range_input() {
        for easing in ALL {
            assert!(approx_eq(ease(easing, -0.5), 0.0), "{:?} below 0", easing);
            assert!(approx_eq(ease(easing, 1.5), 1.0), "{:?} above 1", easing);
        }
    }

    #[test]
    fn test_ease_quad_out() {
        assert!(approx_eq(ease(Easing::QuadOut, 0.5), 0.75));
        assert!(approx_eq(ease(Easing::QuadOut, 0.25), 0.4375));
    }

    #[test]
    fn test_ease_cubic_inout() {
        assert!(approx_eq(ease(Easing::CubicInOut, 0.25), 0.0625));
        assert!(approx_eq(ease(Easing::CubicInOut, 0.75), 0.9375));
    }

    #[test]
    fn test_elastic_overshoots_then_settles() {
        // First crest of the oscillation lands at t = period / 2 = 0.15.
        let crest = ease(ELASTIC, 0.15);
        assert!(crest > 1.0, "elastic should overshoot, got {}", crest);
        assert!(approx_eq(crest, 1.0 + 2f32.powf(-1.5)));
        // Late in the curve it stays within a few thousandths of 1.
        assert!((ease(ELASTIC, 0.9) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_elastic_small_amplitude_still_starts_at_zero() {
        let e = Easing::ElasticOut {
            amplitude: 0.5,
            period: 0.3,
        };
        assert!(approx_eq(ease(e, 0.0), 0.0));
    }

    #[test]
    fn test_lerp_v2_midpoint() {
        let m = lerp_v2(Vector2 { x: 0.0, y: 10.0 }, Vector2 { x: 4.0, y: 0.0 }, 0.5);
        assert!(approx_eq(m.x, 2.0));
        assert!(approx_eq(m.y, 5.0));
    }

    #[test]
    fn test_resolve_targets_all_sorted() {
        let mut world = World::new();
        let mut cells = FxHashMap::default();
        for i in [3usize, 0, 2, 1] {
            cells.insert(i, (world.spawn_empty().id(), Vector2 { x: 0.0, y: 0.0 }));
        }
        let resolved = resolve_targets(TweenTargets::AllCells, &cells);
        let order: Vec<usize> = resolved.iter().map(|(_, i, _)| *i).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_resolve_targets_unknown_cell_is_empty() {
        let cells = FxHashMap::default();
        assert!(resolve_targets(TweenTargets::Cell(9), &cells).is_empty());
    }
}
