//! Animation requests sent from the interaction controller to the tween systems.
//!
//! The controller never touches cell components directly. It describes what
//! should animate as [`TweenRequest`] messages; [`apply_tween_requests`]
//! turns them into [`TweenOffset`], [`PhysicsTrack`] and [`Timeline`]
//! components.
//!
//! [`apply_tween_requests`]: crate::systems::tween::apply_tween_requests
//! [`TweenOffset`]: crate::components::tween::TweenOffset
//! [`PhysicsTrack`]: crate::components::tween::PhysicsTrack
//! [`Timeline`]: crate::components::tween::Timeline

use bevy_ecs::message::Message;
use raylib::prelude::Vector2;

use crate::components::tween::{Easing, TweenCallback};

/// Cells an animation applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TweenTargets {
    /// A single cell by row-major index.
    Cell(usize),
    /// Every cell in the grid.
    AllCells,
}

/// Ease the offset of the targets to `to`.
#[derive(Clone, Debug)]
pub struct OffsetTween {
    pub targets: TweenTargets,
    pub to: Vector2,
    /// Seconds.
    pub duration: f32,
    /// `None` uses [`Easing::default`].
    pub easing: Option<Easing>,
}

/// Projectile parameters. Each target draws its own speed and angle from the
/// ranges.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Physics2D {
    /// Speed range in pixels per second, `(min, max)`.
    pub velocity: (f32, f32),
    /// Launch angle range in degrees, `(min, max)`.
    pub angle: (f32, f32),
    /// Downward acceleration in pixels per second squared.
    pub gravity: f32,
}

/// Distributes start times over a `rows × cols` grid, rippling out from one cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stagger {
    /// `(rows, cols)`.
    pub grid: (usize, usize),
    /// Row-major index of the cell that starts first.
    pub from: usize,
    /// Total spread of start times in seconds; the farthest cell starts this late.
    pub amount: f32,
}

impl Stagger {
    /// Start delay for each of `count` targets in row-major order.
    ///
    /// Delays grow linearly with the grid distance from the origin cell and
    /// are normalized so the farthest cell waits exactly `amount`.
    pub fn delays(&self, count: usize) -> Vec<f32> {
        let cols = self.grid.1.max(1);
        let origin_x = (self.from % cols) as f32;
        let origin_y = (self.from / cols) as f32;
        let distances: Vec<f32> = (0..count)
            .map(|i| {
                let x = origin_x - (i % cols) as f32;
                let y = origin_y - (i / cols) as f32;
                (x * x + y * y).sqrt()
            })
            .collect();
        let max = distances.iter().copied().fold(f32::MIN, f32::max);
        let min = distances.iter().copied().fold(f32::MAX, f32::min);
        let span = max - min;
        distances
            .iter()
            .map(|d| {
                if span > 0.0 {
                    (d - min) / span * self.amount
                } else {
                    0.0
                }
            })
            .collect()
    }
}

/// Staggered projectile animation of every target, with continuations for
/// both ends of its timeline.
#[derive(Clone, Debug)]
pub struct ExplosionTween {
    pub targets: TweenTargets,
    /// Flight duration of each target in seconds (excluding stagger).
    pub duration: f32,
    pub physics: Physics2D,
    pub stagger: Stagger,
    /// Runs when the timeline reaches its end playing forward.
    pub on_complete: TweenCallback,
    /// Runs when the timeline reaches its start playing backward.
    pub on_reverse_complete: TweenCallback,
}

/// A single animation request.
#[derive(Message, Clone, Debug)]
pub enum TweenRequest {
    Offset(OffsetTween),
    Explosion(ExplosionTween),
}

impl TweenRequest {
    pub fn targets(&self) -> TweenTargets {
        match self {
            TweenRequest::Offset(o) => o.targets,
            TweenRequest::Explosion(e) => e.targets,
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

    #[test]
    fn test_stagger_origin_starts_first() {
        let stagger = Stagger {
            grid: (4, 4),
            from: 3,
            amount: 0.3,
        };
        let delays = stagger.delays(16);
        assert_eq!(delays.len(), 16);
        assert!(approx_eq(delays[3], 0.0));
        for d in &delays {
            assert!(*d >= 0.0 && *d <= 0.3 + EPSILON);
        }
    }

    #[test]
    fn test_stagger_farthest_cell_gets_full_amount() {
        let stagger = Stagger {
            grid: (4, 4),
            from: 3,
            amount: 0.3,
        };
        let delays = stagger.delays(16);
        // Index 12 is the bottom-left corner, opposite to the top-right origin.
        assert!(approx_eq(delays[12], 0.3));
        // Neighbour to the left is one unit away out of 3*sqrt(2).
        assert!(approx_eq(delays[2], 0.3 / (18.0f32).sqrt()));
        // Cells at equal distance start together.
        assert!(approx_eq(delays[2], delays[7]));
    }

    #[test]
    fn test_stagger_single_cell_has_no_delay() {
        let stagger = Stagger {
            grid: (1, 1),
            from: 0,
            amount: 0.3,
        };
        assert_eq!(stagger.delays(1), vec![0.0]);
    }

    #[test]
    fn test_stagger_zero_cols_does_not_panic() {
        let stagger = Stagger {
            grid: (0, 0),
            from: 0,
            amount: 0.3,
        };
        assert!(stagger.delays(0).is_empty());
    }
}
