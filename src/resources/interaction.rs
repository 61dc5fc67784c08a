//! Pointer/click interaction controller.
//!
//! [`InteractionController`] turns pointer input and measured cell geometry
//! into [`TweenRequest`]s. It owns the only interaction state in the
//! application:
//!
//! - [`InteractionState`] – `Idle`, or `Exploding` while the click animation
//!   (forward flight and its reversed playback) is in flight. All input is
//!   ignored while exploding.
//! - `pending_reset` – set once when an explosion has played back, consumed by
//!   the next pointer move to send every cell home.
//! - one [`CellState`] per cell, indexed like [`Cell::index`].
//!
//! The controller is a plain resource with no ECS access; the observers in
//! [`crate::systems::interaction`] feed it events and forward its requests.
//!
//! [`Cell::index`]: crate::components::cell::Cell::index

use bevy_ecs::prelude::Resource;
use log::{debug, info, warn};
use raylib::prelude::Vector2;

use crate::components::gridlayout::GridDims;
use crate::components::tween::{Easing, TweenCallback};
use crate::events::tweenrequest::{
    ExplosionTween, OffsetTween, Physics2D, Stagger, TweenRequest, TweenTargets,
};

const DEFAULT_PULL_DISTANCE: f32 = 70.0;
const DEFAULT_PULL_DURATION: f32 = 0.2;
const DEFAULT_RETURN_DURATION: f32 = 1.0;
const DEFAULT_ELASTIC_AMPLITUDE: f32 = 1.0;
const DEFAULT_ELASTIC_PERIOD: f32 = 0.3;
const DEFAULT_EXPLOSION_DURATION: f32 = 1.6;
const DEFAULT_VELOCITY_RANGE: (f32, f32) = (400.0, 1000.0);
const DEFAULT_ANGLE_RANGE: (f32, f32) = (250.0, 290.0);
const DEFAULT_GRAVITY: f32 = 2000.0;
const DEFAULT_STAGGER_AMOUNT: f32 = 0.3;
const DEFAULT_REVERSE_TIME_SCALE: f32 = 1.3;

/// Lifecycle of the click animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Exploding,
}

/// Controller-side view of one cell.
#[derive(Debug, Clone, Copy)]
pub struct CellState {
    /// Last measured centre, in window coordinates.
    pub center: Vector2,
    /// True while the cell is displaced toward the pointer.
    pub pulled: bool,
}

impl Default for CellState {
    fn default() -> Self {
        Self {
            center: Vector2 { x: 0.0, y: 0.0 },
            pulled: false,
        }
    }
}

/// Tunable constants of the effect. The defaults give the stock look;
/// the `[interaction]` section of the config file overrides them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionTuning {
    /// Pointer distance under which a cell is pulled.
    pub pull_distance: f32,
    pub pull_duration: f32,
    pub return_duration: f32,
    pub elastic_amplitude: f32,
    pub elastic_period: f32,
    pub explosion_duration: f32,
    pub velocity: (f32, f32),
    pub angle: (f32, f32),
    pub gravity: f32,
    pub stagger_amount: f32,
    /// Speed of the reversed playback relative to the forward one.
    pub reverse_time_scale: f32,
}

impl Default for InteractionTuning {
    fn default() -> Self {
        Self {
            pull_distance: DEFAULT_PULL_DISTANCE,
            pull_duration: DEFAULT_PULL_DURATION,
            return_duration: DEFAULT_RETURN_DURATION,
            elastic_amplitude: DEFAULT_ELASTIC_AMPLITUDE,
            elastic_period: DEFAULT_ELASTIC_PERIOD,
            explosion_duration: DEFAULT_EXPLOSION_DURATION,
            velocity: DEFAULT_VELOCITY_RANGE,
            angle: DEFAULT_ANGLE_RANGE,
            gravity: DEFAULT_GRAVITY,
            stagger_amount: DEFAULT_STAGGER_AMOUNT,
            reverse_time_scale: DEFAULT_REVERSE_TIME_SCALE,
        }
    }
}

impl InteractionTuning {
    /// Easing used to send cells back to rest.
    pub fn return_easing(&self) -> Easing {
        Easing::ElasticOut {
            amplitude: self.elastic_amplitude,
            period: self.elastic_period,
        }
    }
}

/// Offset a pulled cell moves to.
///
/// `delta` is `pointer - center`. The displacement is scaled by
/// `distance / threshold`, so the pull fades out as the pointer nears the
/// centre and is strongest at the edge of the radius.
pub fn pull_offset(delta: Vector2, distance: f32, threshold: f32) -> Vector2 {
    let percent = distance / threshold;
    Vector2 {
        x: delta.x * percent,
        y: delta.y * percent,
    }
}

/// Single owner of the interaction state.
#[derive(Resource, Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    pending_reset: bool,
    cells: Vec<CellState>,
    grid: GridDims,
    tuning: InteractionTuning,
}

impl InteractionController {
    /// A controller for `grid` with every cell at the origin and not pulled.
    /// Call [`recompute_geometry`](Self::recompute_geometry) before use.
    pub fn new(grid: GridDims, tuning: InteractionTuning) -> Self {
        Self {
            state: InteractionState::Idle,
            pending_reset: false,
            cells: vec![CellState::default(); grid.len()],
            grid,
            tuning,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn pending_reset(&self) -> bool {
        self.pending_reset
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn grid(&self) -> GridDims {
        self.grid
    }

    pub fn tuning(&self) -> &InteractionTuning {
        &self.tuning
    }

    /// Replace every cell's centre with a fresh measurement.
    ///
    /// `centers[i]` is the centre of cell `i`. Pulled flags are kept. A
    /// measurement for a different number of cells than the grid holds is
    /// logged and applied to the overlapping prefix only.
    pub fn recompute_geometry(&mut self, centers: &[Vector2]) {
        if centers.len() != self.cells.len() {
            warn!(
                "Geometry for {} cells, grid has {}",
                centers.len(),
                self.cells.len()
            );
        }
        for (cell, center) in self.cells.iter_mut().zip(centers) {
            cell.center = *center;
        }
    }

    /// Handle a pointer move. `None` is a pointer far away from every cell.
    ///
    /// Returns the requests to issue; empty while an explosion is in flight.
    pub fn on_pointer_move(&mut self, pointer: Option<Vector2>) -> Vec<TweenRequest> {
        if self.state == InteractionState::Exploding {
            return Vec::new();
        }

        let threshold = self.tuning.pull_distance;
        let mut requests = Vec::new();
        for (index, cell) in self.cells.iter_mut().enumerate() {
            let (delta, distance) = match pointer {
                Some(p) => {
                    let delta = Vector2 {
                        x: p.x - cell.center.x,
                        y: p.y - cell.center.y,
                    };
                    (delta, (delta.x * delta.x + delta.y * delta.y).sqrt())
                }
                None => (Vector2 { x: 0.0, y: 0.0 }, f32::INFINITY),
            };

            if distance < threshold {
                cell.pulled = true;
                requests.push(TweenRequest::Offset(OffsetTween {
                    targets: TweenTargets::Cell(index),
                    to: pull_offset(delta, distance, threshold),
                    duration: self.tuning.pull_duration,
                    easing: None,
                }));
            } else if cell.pulled {
                cell.pulled = false;
                requests.push(TweenRequest::Offset(OffsetTween {
                    targets: TweenTargets::Cell(index),
                    to: Vector2 { x: 0.0, y: 0.0 },
                    duration: self.tuning.return_duration,
                    easing: Some(self.tuning.return_easing()),
                }));
            }
        }

        if self.pending_reset {
            self.pending_reset = false;
            debug!("Settling all {} cells after explosion", self.cells.len());
            requests.push(TweenRequest::Offset(OffsetTween {
                targets: TweenTargets::AllCells,
                to: Vector2 { x: 0.0, y: 0.0 },
                duration: self.tuning.return_duration,
                easing: Some(self.tuning.return_easing()),
            }));
        }

        requests
    }

    /// Handle a release over cell `index`.
    ///
    /// While idle, switches to [`InteractionState::Exploding`] and returns the
    /// explosion request. Returns `None` and changes nothing while an
    /// explosion is already running or when `index` is not a cell.
    pub fn on_cell_release(&mut self, index: usize) -> Option<TweenRequest> {
        if self.state == InteractionState::Exploding {
            return None;
        }
        if index >= self.cells.len() {
            warn!("Release on unknown cell {}", index);
            return None;
        }

        self.state = InteractionState::Exploding;
        info!("Explosion from cell {}", index);

        Some(TweenRequest::Explosion(ExplosionTween {
            targets: TweenTargets::AllCells,
            duration: self.tuning.explosion_duration,
            physics: Physics2D {
                velocity: self.tuning.velocity,
                angle: self.tuning.angle,
                gravity: self.tuning.gravity,
            },
            stagger: Stagger {
                grid: (self.grid.rows, self.grid.cols),
                from: index,
                amount: self.tuning.stagger_amount,
            },
            on_complete: TweenCallback::SetTimeScale(-self.tuning.reverse_time_scale),
            on_reverse_complete: TweenCallback::SettleExplosion,
        }))
    }

    /// The explosion has played back to its start.
    ///
    /// Returns to idle, arms the full reset and immediately runs a pointer
    /// move with a far-away pointer so every cell settles regardless of
    /// where the real pointer is.
    pub fn finish_explosion(&mut self) -> Vec<TweenRequest> {
        if self.state != InteractionState::Exploding {
            warn!("Explosion finished while {:?}", self.state);
        }
        self.state = InteractionState::Idle;
        self.pending_reset = true;
        self.on_pointer_move(None)
    }
}
