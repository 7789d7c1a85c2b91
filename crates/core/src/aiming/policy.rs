//! Mode dispatch: turning an aim request into barrel pitch and launch speed
//!
//! [`solve`] is pure with respect to its inputs. The values a failed solve
//! falls back to are passed in as [`BarrelState`], not read from a mount.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::AimConfig;
use super::request::{AimConstraint, AimRequest};
use crate::core_types::Vec3;
use crate::geometry::signed_angle_deg;
use crate::physics::{Ballistics, SolveFailure};

/// Pitch and speed a mount currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BarrelState {
    /// Barrel pitch (degrees, positive = down)
    pub pitch_deg: f64,
    /// Launch speed
    pub speed: f64,
}

impl BarrelState {
    pub fn new(pitch_deg: f64, speed: f64) -> Self {
        Self { pitch_deg, speed }
    }
}

/// Result of one [`solve`] call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchSolution {
    /// Barrel pitch (degrees, positive = down)
    pub pitch_deg: f64,
    /// Launch speed
    pub speed: f64,
    /// Horizontal extent for the drawn arc when it should not end at the
    /// target (fixed-all mode, unreachable fixed-speed targets)
    pub horizontal_distance_override: Option<f64>,
    /// Why the solver could not produce finite values, if it could not.
    /// `pitch_deg` and `speed` then hold whatever was retained.
    pub failure: Option<SolveFailure>,
}

impl LaunchSolution {
    /// Launch elevation above horizontal (degrees), as the ballistics
    /// functions expect it
    pub fn elevation_deg(&self) -> f64 {
        -self.pitch_deg
    }

    /// Pitch and speed as a barrel state
    pub fn barrel(&self) -> BarrelState {
        BarrelState::new(self.pitch_deg, self.speed)
    }

    /// True when the solve succeeded without falling back
    pub fn is_solved(&self) -> bool {
        self.failure.is_none()
    }
}

/// Solve launch pitch and speed for one aim request.
///
/// | Mode          | Pitch                         | Speed                          | Override          |
/// |---------------|-------------------------------|--------------------------------|-------------------|
/// | `FixedAll`    | fixed                         | fixed                          | preview distance  |
/// | `FixedPitch`  | fixed                         | `speed_from_angle`             | none              |
/// | `FixedSpeed`  | low or high root              | fixed                          | none              |
/// | `Unfixed`     | `solve_from_max_height`       | `solve_from_max_height`        | none              |
///
/// An unreachable fixed-speed target keeps the `previous` pitch, still launches
/// at the fixed speed, and draws a preview arc instead. Any other non-finite result is replaced by the
/// matching `previous` value and reported in
/// [`LaunchSolution::failure`]. The preview distance is
/// `displacement_at_time(elevation, speed, preview_time).x` of the final values.
pub fn solve(
    request: &AimRequest,
    ballistics: &Ballistics,
    config: &AimConfig,
    previous: BarrelState,
) -> LaunchSolution {
    let (x, y) = request.displacement();

    let mut preview = false;
    let (pitch_deg, speed, failure) = match request.constraint {
        AimConstraint::FixedAll { pitch_deg, speed } => {
            preview = true;
            (pitch_deg, speed, None)
        }
        AimConstraint::FixedPitch { pitch_deg } => {
            let speed = ballistics.speed_from_angle(x, y, -pitch_deg);
            let failure = speed.is_nan().then_some(SolveFailure::UnreachableAtFixedAngle);
            (pitch_deg, speed, failure)
        }
        AimConstraint::FixedSpeed {
            speed,
            prefer_small_angle,
        } => {
            let arcs = ballistics.angle_from_speed(x, y, speed);
            if arcs.is_valid() {
                let elevation = if prefer_small_angle {
                    arcs.low()
                } else {
                    arcs.high()
                };
                (-elevation, speed, None)
            } else {
                debug!(
                    "Target out of range at speed {:.3} (x={:.3}, y={:.3}), keeping pitch={:.2}°",
                    speed, x, y, previous.pitch_deg
                );
                preview = true;
                (f64::NAN, speed, Some(SolveFailure::UnreachableAtFixedSpeed))
            }
        }
        AimConstraint::Unfixed => {
            let apex = config.apex_height(x, y);
            let solution = ballistics.solve_from_max_height(x, y, apex);
            let failure = (apex < 0.0 || apex < y).then_some(SolveFailure::InvalidApexHeight);
            (-solution.angle, solution.speed, failure)
        }
    };

    let degenerate = !(pitch_deg.is_finite() && speed.is_finite());
    let failure = failure.or_else(|| degenerate.then_some(SolveFailure::DegenerateGeometry));
    if let Some(reason) =
        failure.filter(|f| degenerate && *f != SolveFailure::UnreachableAtFixedSpeed)
    {
        warn!(
            "{} solve failed ({}): pitch={}, speed={}, keeping previous values",
            request.constraint.mode(),
            reason,
            pitch_deg,
            speed
        );
    }

    let pitch_deg = if pitch_deg.is_finite() {
        pitch_deg
    } else {
        previous.pitch_deg
    };
    let speed = if speed.is_finite() {
        speed
    } else {
        previous.speed
    };

    let horizontal_distance_override = preview.then(|| {
        ballistics
            .displacement_at_time(-pitch_deg, speed, config.preview_time)
            .0
    });

    LaunchSolution {
        pitch_deg,
        speed,
        horizontal_distance_override,
        failure,
    }
}

/// Yaw (degrees) that turns `forward` toward `target` about `up`.
///
/// Positive yaw is a counter-clockwise turn seen from above. `NaN` when the
/// target is directly above or below `pivot`.
pub fn yaw_toward(pivot: Vec3, target: Vec3, forward: Vec3, up: Vec3) -> f64 {
    -signed_angle_deg(target - pivot, forward, up)
}
