//! Per-entity orbit driver
//!
//! Each entity spins about its own axis. The driver treats the whole
//! animation as one long uncommitted gesture: the first tick after
//! (re)initialization starts the gesture with the current axis-angle handle,
//! every later tick only moves `drag`. The composer then shows the rotation
//! from the starting angle to the current one on top of whatever is committed.

use std::f32::consts::TAU;
use rand::Rng;
use serde::{Serialize, Deserialize};
use fileorbit_math::{Quaternion, Vec3};
use crate::OrientationState;

/// Degenerate axis draws are retried this many times before falling back
const MAX_AXIS_DRAWS: usize = 8;

/// Squared length below which a candidate axis counts as degenerate
const MIN_AXIS_LENGTH_SQUARED: f32 = 1e-12;

/// How orbit axes are picked when the entity batch is (re)built
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPolicy {
    /// Any direction
    Random,
    /// Orthogonal to the entity's anchor, so the marker sweeps a great circle
    /// through its own position on the sphere
    #[default]
    Tangential,
}

impl AxisPolicy {
    /// The other policy
    pub fn toggled(self) -> Self {
        match self {
            AxisPolicy::Random => AxisPolicy::Tangential,
            AxisPolicy::Tangential => AxisPolicy::Random,
        }
    }

    /// Draw a unit axis for an entity anchored at `anchor`
    ///
    /// Retries degenerate draws a bounded number of times, then falls back to
    /// a fixed axis that is valid for the policy.
    pub fn draw_axis<R: Rng + ?Sized>(self, anchor: Vec3, rng: &mut R) -> Vec3 {
        for _ in 0..MAX_AXIS_DRAWS {
            let v = random_vector(rng);
            let candidate = match self {
                AxisPolicy::Random => v,
                AxisPolicy::Tangential => anchor.cross(v),
            };
            if candidate.length_squared() > MIN_AXIS_LENGTH_SQUARED {
                return candidate.normalized();
            }
        }

        log::debug!("Axis draw stayed degenerate for anchor {:?}, using fallback", anchor);
        self.fallback_axis(anchor)
    }

    fn fallback_axis(self, anchor: Vec3) -> Vec3 {
        match self {
            AxisPolicy::Random => Vec3::Y,
            AxisPolicy::Tangential => {
                let axis = anchor.any_orthogonal();
                if axis == Vec3::ZERO { Vec3::Y } else { axis }
            }
        }
    }
}

fn random_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
    )
}

/// Which way the angle accumulator runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinDirection {
    Increasing,
    Decreasing,
}

impl SpinDirection {
    /// Either direction with equal probability
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            SpinDirection::Increasing
        } else {
            SpinDirection::Decreasing
        }
    }
}

/// Automatic spin state for one entity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitDriver {
    axis: Vec3,
    angle: f32,
    direction: SpinDirection,
    started: bool,
}

impl OrbitDriver {
    /// Driver with a given axis (normalized here) and direction, angle at 0
    pub fn new(axis: Vec3, direction: SpinDirection) -> Self {
        Self {
            axis: axis.normalized(),
            angle: 0.0,
            direction,
            started: false,
        }
    }

    /// Driver with an axis drawn by `policy` and a random direction
    pub fn randomized<R: Rng + ?Sized>(policy: AxisPolicy, anchor: Vec3, rng: &mut R) -> Self {
        let axis = policy.draw_axis(anchor, rng);
        Self::new(axis, SpinDirection::random(rng))
    }

    /// Unit rotation axis
    #[inline]
    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    /// Current angle in radians
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn direction(&self) -> SpinDirection {
        self.direction
    }

    /// Whether the first tick since (re)initialization has happened
    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Handle quaternion for the current angle
    pub fn handle(&self) -> Quaternion {
        Quaternion::from_axis_angle(self.axis, self.angle)
    }

    /// Advance one simulation tick and feed the new handle to `orientation`
    ///
    /// `speed` is in turns per tick.
    pub fn tick(&mut self, speed: f32, orientation: &mut OrientationState) {
        let step = TAU * speed;
        match self.direction {
            SpinDirection::Increasing => {
                self.angle += step;
                // Reset to `speed`, not 0
                if self.angle >= TAU {
                    self.angle = speed;
                }
            }
            SpinDirection::Decreasing => {
                self.angle -= step;
                if self.angle <= 0.0 {
                    self.angle = TAU;
                }
            }
        }

        let handle = self.handle();
        if self.started {
            orientation.drag_to(handle);
        } else {
            orientation.begin(handle);
            self.started = true;
        }
    }
}
