//! Tween components for animated cell offsets.
//!
//! This module provides the data driven by [`crate::systems::tween`]:
//! - [`TweenOffset`] – ease a cell's [`CellOffset`](super::cell::CellOffset) toward a target
//! - [`PhysicsTrack`] – projectile motion of a cell, clocked by a [`Timeline`]
//! - [`Timeline`] – shared, reversible clock of a staggered animation
//!
//! Timelines carry [`TweenCallback`] continuations that were registered when
//! the animation was requested; they are delivered through
//! [`TweenCallbackEvent`](crate::events::tween::TweenCallbackEvent) when the
//! timeline reaches its end (forward) or its start (reversed).

use bevy_ecs::prelude::{Component, Entity};
use raylib::prelude::Vector2;

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic). Default for offset tweens.
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    /// Starts slow, accelerates (cubic).
    CubicIn,
    /// Starts fast, decelerates (cubic).
    CubicOut,
    /// Slow start and end (cubic).
    CubicInOut,
    /// Overshoots and oscillates around the target before settling.
    ///
    /// `amplitude` scales the overshoot (values below 1 behave as 1 but
    /// shorten the period), `period` is the oscillation length in normalized
    /// time.
    ElasticOut { amplitude: f32, period: f32 },
}

impl Default for Easing {
    fn default() -> Self {
        Easing::QuadOut
    }
}

/// Continuation registered with an animation request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TweenCallback {
    /// Do nothing.
    None,
    /// Change the playback rate of the timeline that fired. A negative value
    /// plays it backwards.
    SetTimeScale(f32),
    /// The explosion has played back to its start: tear it down and hand
    /// control back to the interaction controller.
    SettleExplosion,
}

/// Eases a cell's offset from where it was when the tween started to `to`.
///
/// Inserting a new `TweenOffset` on an entity replaces the running one, so
/// the latest request always wins.
#[derive(Component, Clone, Debug)]
pub struct TweenOffset {
    /// Offset at the moment the tween was applied.
    pub from: Vector2,
    /// Target offset.
    pub to: Vector2,
    /// Duration in seconds.
    pub duration: f32,
    /// Easing function to use.
    pub easing: Easing,
    /// Current time within the tween.
    pub time: f32,
}

impl TweenOffset {
    pub fn new(from: Vector2, to: Vector2, duration: f32) -> Self {
        TweenOffset {
            from,
            to,
            duration,
            easing: Easing::default(),
            time: 0.0,
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
    /// Whether the tween has played to its end.
    pub fn finished(&self) -> bool {
        self.time >= self.duration
    }
}

/// Projectile motion of one cell inside a staggered [`Timeline`].
///
/// At local time `t` the offset is `origin + velocity·t + ½·(0, gravity)·t²`,
/// with `t = clamp(timeline.time - delay, 0, duration)`. Because the position
/// is a pure function of the timeline clock, playing the timeline backwards
/// retraces the flight exactly.
#[derive(Component, Clone, Debug)]
pub struct PhysicsTrack {
    /// Entity holding the [`Timeline`] that clocks this track.
    pub timeline: Entity,
    /// Offset when the track was created.
    pub origin: Vector2,
    /// Launch velocity in pixels per second.
    pub velocity: Vector2,
    /// Downward acceleration in pixels per second squared.
    pub gravity: f32,
    /// Start offset within the timeline, in seconds.
    pub delay: f32,
    /// Flight duration in seconds.
    pub duration: f32,
}

impl PhysicsTrack {
    /// Build a track from a speed and a launch angle in degrees
    /// (0° points right, 90° down, 270° straight up).
    pub fn from_polar(
        timeline: Entity,
        origin: Vector2,
        speed: f32,
        angle_deg: f32,
        gravity: f32,
        delay: f32,
        duration: f32,
    ) -> Self {
        let rad = angle_deg.to_radians();
        Self {
            timeline,
            origin,
            velocity: Vector2 {
                x: speed * rad.cos(),
                y: speed * rad.sin(),
            },
            gravity,
            delay,
            duration,
        }
    }

    /// Offset of the cell when the owning timeline is at `timeline_time`.
    pub fn offset_at(&self, timeline_time: f32) -> Vector2 {
        let t = (timeline_time - self.delay).clamp(0.0, self.duration.max(0.0));
        Vector2 {
            x: self.origin.x + self.velocity.x * t,
            y: self.origin.y + self.velocity.y * t + 0.5 * self.gravity * t * t,
        }
    }
}

/// Which boundary a [`Timeline`] just reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimelineEdge {
    /// Reached `duration` while playing forward.
    Completed,
    /// Reached `0` while playing backward.
    ReverseCompleted,
}

/// Reversible clock shared by the tracks of one staggered animation.
#[derive(Component, Clone, Debug)]
pub struct Timeline {
    /// Current time in seconds, within `[0, duration]`.
    pub time: f32,
    /// Total length: track duration plus the largest stagger delay.
    pub duration: f32,
    /// Playback rate; negative plays backwards.
    pub time_scale: f32,
    /// Whether the clock is running.
    pub playing: bool,
    pub on_complete: TweenCallback,
    pub on_reverse_complete: TweenCallback,
}

impl Timeline {
    pub fn new(duration: f32) -> Self {
        Self {
            time: 0.0,
            duration,
            time_scale: 1.0,
            playing: true,
            on_complete: TweenCallback::None,
            on_reverse_complete: TweenCallback::None,
        }
    }
    pub fn with_callbacks(mut self, on_complete: TweenCallback, on_reverse: TweenCallback) -> Self {
        self.on_complete = on_complete;
        self.on_reverse_complete = on_reverse;
        self
    }

    /// Advance by `dt` unscaled seconds. Returns the edge reached on this
    /// step, if any; the clock stops there until the time scale changes.
    pub fn advance(&mut self, dt: f32) -> Option<TimelineEdge> {
        if !self.playing {
            return None;
        }
        self.time += dt * self.time_scale;
        if self.time_scale > 0.0 && self.time >= self.duration {
            self.time = self.duration;
            self.playing = false;
            return Some(TimelineEdge::Completed);
        }
        if self.time_scale < 0.0 && self.time <= 0.0 {
            self.time = 0.0;
            self.playing = false;
            return Some(TimelineEdge::ReverseCompleted);
        }
        None
    }

    /// Change the playback rate. A stopped timeline resumes when the new
    /// direction points away from the boundary it rests on.
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time_scale = time_scale;
        self.playing = (time_scale > 0.0 && self.time < self.duration)
            || (time_scale < 0.0 && self.time > 0.0);
    }

    /// Callback registered for `edge`.
    pub fn callback_for(&self, edge: TimelineEdge) -> TweenCallback {
        match edge {
            TimelineEdge::Completed => self.on_complete,
            TimelineEdge::ReverseCompleted => self.on_reverse_complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn dummy_entity() -> Entity {
        Entity::from_bits(42)
    }

    #[test]
    fn test_tween_offset_new() {
        let tw = TweenOffset::new(Vector2 { x: 3.0, y: 4.0 }, Vector2 { x: 0.0, y: 0.0 }, 1.0);
        assert!(approx_eq(tw.from.x, 3.0));
        assert!(approx_eq(tw.duration, 1.0));
        assert_eq!(tw.easing, Easing::QuadOut);
        assert!(!tw.finished());
    }

    #[test]
    fn test_tween_offset_with_easing() {
        let elastic = Easing::ElasticOut {
            amplitude: 1.0,
            period: 0.3,
        };
        let tw = TweenOffset::new(Vector2 { x: 0.0, y: 0.0 }, Vector2 { x: 1.0, y: 1.0 }, 1.0)
            .with_easing(elastic);
        assert_eq!(tw.easing, elastic);
    }

    #[test]
    fn test_physics_track_straight_up_with_gravity() {
        let track = PhysicsTrack::from_polar(
            dummy_entity(),
            Vector2 { x: 0.0, y: 0.0 },
            500.0,
            270.0,
            2000.0,
            0.0,
            1.6,
        );
        assert!(approx_eq(track.velocity.x, 0.0));
        assert!(approx_eq(track.velocity.y, -500.0));

        // y(t) = -500 t + 1000 t^2
        let p = track.offset_at(0.1);
        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.y, -50.0 + 10.0));
    }

    #[test]
    fn test_physics_track_respects_delay_and_duration() {
        let origin = Vector2 { x: 5.0, y: -3.0 };
        let track = PhysicsTrack::from_polar(dummy_entity(), origin, 100.0, 0.0, 0.0, 0.3, 1.0);

        let before = track.offset_at(0.2);
        assert!(approx_eq(before.x, 5.0));
        assert!(approx_eq(before.y, -3.0));

        let during = track.offset_at(0.8);
        assert!(approx_eq(during.x, 5.0 + 50.0));

        let after = track.offset_at(10.0);
        assert!(approx_eq(after.x, 5.0 + 100.0));
    }

    #[test]
    fn test_timeline_fires_completed_once() {
        let mut tl = Timeline::new(1.0);
        assert_eq!(tl.advance(0.6), None);
        assert_eq!(tl.advance(0.6), Some(TimelineEdge::Completed));
        assert!(approx_eq(tl.time, 1.0));
        assert!(!tl.playing);
        assert_eq!(tl.advance(0.6), None);
    }

    #[test]
    fn test_timeline_reverse_after_completion() {
        let mut tl = Timeline::new(1.0);
        tl.advance(2.0);
        tl.set_time_scale(-2.0);
        assert!(tl.playing);
        assert_eq!(tl.advance(0.25), None);
        assert!(approx_eq(tl.time, 0.5));
        assert_eq!(tl.advance(0.25), Some(TimelineEdge::ReverseCompleted));
        assert!(approx_eq(tl.time, 0.0));
        assert!(!tl.playing);
    }

    #[test]
    fn test_timeline_set_time_scale_toward_boundary_stays_stopped() {
        let mut tl = Timeline::new(1.0);
        tl.advance(1.0);
        tl.set_time_scale(1.0);
        assert!(!tl.playing);
    }

    #[test]
    fn test_timeline_callback_for_edges() {
        let tl = Timeline::new(1.0)
            .with_callbacks(TweenCallback::SetTimeScale(-1.3), TweenCallback::SettleExplosion);
        assert_eq!(
            tl.callback_for(TimelineEdge::Completed),
            TweenCallback::SetTimeScale(-1.3)
        );
        assert_eq!(
            tl.callback_for(TimelineEdge::ReverseCompleted),
            TweenCallback::SettleExplosion
        );
    }
}
