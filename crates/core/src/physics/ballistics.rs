//! Closed-form projectile motion under constant gravity
//!
//! Every formula assumes a single constant downward acceleration `g`, no drag,
//! and motion in the vertical plane containing launch and target. Within that
//! plane `x` is horizontal distance and `y` is vertical displacement (target
//! height minus launch height, signed). Angles are degrees measured from the
//! horizontal, positive above it; the trigonometry runs in radians internally.
//!
//! # Equations
//!
//! ```text
//! x(t) = v·cos(θ)·t
//! y(t) = v·sin(θ)·t − ½·g·t²
//! ```
//!
//! Solving these for the unknown launch parameter gives the four entry points:
//! [`Ballistics::speed_from_angle`], [`Ballistics::angle_from_speed`],
//! [`Ballistics::solve_from_max_height`] and the time/angle/displacement
//! queries used for sampling.
//!
//! # Failure signalling
//!
//! Physically unreachable requests return `NaN`, never panic. The aiming policy
//! is the one place that interprets those values (see [`SolveFailure`]).
//! Degenerate geometry (zero horizontal distance, vertical launch, zero speed)
//! is not guarded and yields `NaN` or `±∞`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core_types::{GravitySource, STANDARD_GRAVITY};

/// Why a solve produced no usable value.
///
/// The solver itself signals failure with `NaN`; this enum names the cause so
/// the aiming policy can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveFailure {
    /// `speed_from_angle`: target needs a negative squared speed at this angle
    UnreachableAtFixedAngle,
    /// `angle_from_speed`: negative discriminant, no angle reaches the target
    UnreachableAtFixedSpeed,
    /// `solve_from_max_height`: apex below launch height or below the target
    InvalidApexHeight,
    /// Zero-length projection or zero horizontal distance produced NaN/∞
    DegenerateGeometry,
}

impl fmt::Display for SolveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SolveFailure::UnreachableAtFixedAngle => "target unreachable at the fixed angle",
            SolveFailure::UnreachableAtFixedSpeed => "target unreachable at the fixed speed",
            SolveFailure::InvalidApexHeight => "apex height below launch point or target",
            SolveFailure::DegenerateGeometry => "degenerate aiming geometry",
        };
        f.write_str(text)
    }
}

/// The two launch angles that reach a target at a fixed speed
///
/// Both are `NaN` when the target is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcAngles {
    /// Root taken with `+√disc`
    pub angle1: f64,
    /// Root taken with `−√disc`
    pub angle2: f64,
}

impl ArcAngles {
    const UNREACHABLE: ArcAngles = ArcAngles {
        angle1: f64::NAN,
        angle2: f64::NAN,
    };

    /// True when both roots are real numbers
    pub fn is_valid(&self) -> bool {
        !self.angle1.is_nan() && !self.angle2.is_nan()
    }

    /// Flatter of the two trajectories (degrees)
    pub fn low(&self) -> f64 {
        self.angle1.min(self.angle2)
    }

    /// Steeper of the two trajectories (degrees)
    pub fn high(&self) -> f64 {
        self.angle1.max(self.angle2)
    }
}

/// Launch parameters derived from a desired apex height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApexSolution {
    /// Launch angle above horizontal (degrees)
    pub angle: f64,
    /// Launch speed
    pub speed: f64,
    /// Time at which the projectile reaches the target
    pub time: f64,
}

impl ApexSolution {
    const INVALID: ApexSolution = ApexSolution {
        angle: f64::NAN,
        speed: f64::NAN,
        time: f64::NAN,
    };
}

/// Projectile-motion solver bound to one gravity magnitude.
///
/// Construct one per aim call from the ambient gravity; the value is read once
/// and used consistently for every formula in that call.
///
/// # Example
///
/// ```
/// use cannon_aim_core::Ballistics;
///
/// let ballistics = Ballistics::new(10.0);
/// let speed = ballistics.speed_from_angle(10.0, 0.0, 45.0);
/// assert!((speed - 10.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ballistics {
    gravity: f64,
}

impl Default for Ballistics {
    fn default() -> Self {
        Self::new(STANDARD_GRAVITY)
    }
}

impl Ballistics {
    /// Create a solver for the given gravity. The sign is discarded.
    #[inline]
    pub fn new(gravity: f64) -> Self {
        Self {
            gravity: gravity.abs(),
        }
    }

    /// Read gravity once from an ambient source
    #[inline]
    pub fn from_source<G: GravitySource + ?Sized>(source: &G) -> Self {
        Self::new(source.gravity())
    }

    /// Magnitude of the downward acceleration
    #[inline]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Total flight time to cover horizontal distance `x`.
    ///
    /// ```text
    /// t = x / (v·cos(θ))
    /// ```
    ///
    /// Undefined (`±∞` or `NaN`) for a vertical launch or zero speed; callers
    /// guard near-vertical launches themselves.
    pub fn total_time(&self, x: f64, angle_deg: f64, speed: f64) -> f64 {
        let theta = angle_deg.to_radians();
        x / (speed * theta.cos())
    }

    /// Flight-path angle at time `t` (degrees).
    ///
    /// ```text
    /// vx = v·cos(θ)
    /// vy = v·sin(θ) − g·t
    /// θt = atan(vy / vx)
    /// ```
    ///
    /// Uses `atan`, not `atan2`: the result is only meaningful while the
    /// horizontal velocity is non-zero and travelling forward, which is always
    /// the case for a sampled launch arc.
    pub fn angle_at_time(&self, angle_deg: f64, speed: f64, t: f64) -> f64 {
        self.angle_at_time_rad(angle_deg, speed, t).to_degrees()
    }

    /// Same as [`Ballistics::angle_at_time`], in radians
    pub fn angle_at_time_rad(&self, angle_deg: f64, speed: f64, t: f64) -> f64 {
        let theta = angle_deg.to_radians();
        let vx = speed * theta.cos();
        let vy = speed * theta.sin() - self.gravity * t;
        (vy / vx).atan()
    }

    /// Horizontal and vertical displacement at time `t`.
    ///
    /// # Returns
    ///
    /// Tuple of `(x, y)`: distance travelled along the firing direction and
    /// height relative to the launch point
    pub fn displacement_at_time(&self, angle_deg: f64, speed: f64, t: f64) -> (f64, f64) {
        let theta = angle_deg.to_radians();
        let x = speed * theta.cos() * t;
        let y = speed * theta.sin() * t - 0.5 * self.gravity * t * t;
        (x, y)
    }

    /// Launch speed that reaches `(x, y)` at a fixed launch angle.
    ///
    /// ```text
    /// v = sqrt( g·x² / (2x·sin(θ)·cos(θ) − 2y·cos²(θ)) )
    /// ```
    ///
    /// Returns `NaN` when the denominator is negative: the target sits above
    /// the line of fire and no speed reaches it at this angle.
    pub fn speed_from_angle(&self, x: f64, y: f64, angle_deg: f64) -> f64 {
        let theta = angle_deg.to_radians();
        let (sin, cos) = theta.sin_cos();

        let denominator = 2.0 * x * sin * cos - 2.0 * y * cos * cos;
        if denominator < 0.0 {
            return f64::NAN;
        }

        ((self.gravity * x * x) / denominator).sqrt()
    }

    /// Launch angles that reach `(x, y)` at a fixed speed.
    ///
    /// The range equation is quadratic in `tan(θ)`:
    ///
    /// ```text
    /// disc = v⁴ − g·(g·x² + 2y·v²)
    /// θ    = atan( (−v² ± sqrt(disc)) / (−g·x) )
    /// ```
    ///
    /// Both angles are `NaN` when `disc < 0` (target out of range at this
    /// speed). Choosing between the low and high arc is left to the caller.
    pub fn angle_from_speed(&self, x: f64, y: f64, speed: f64) -> ArcAngles {
        let g = self.gravity;
        let speed_sq = speed * speed;

        let discriminant = speed_sq * speed_sq - g * (g * x * x + 2.0 * y * speed_sq);
        if discriminant < 0.0 {
            return ArcAngles::UNREACHABLE;
        }

        let root = discriminant.sqrt();
        let denominator = -g * x;
        ArcAngles {
            angle1: ((-speed_sq + root) / denominator).atan().to_degrees(),
            angle2: ((-speed_sq - root) / denominator).atan().to_degrees(),
        }
    }

    /// Launch angle, speed and arrival time for an arc peaking at `max_height`.
    ///
    /// `max_height` is measured from the launch point and must clear both the
    /// launch point and the target:
    ///
    /// ```text
    /// p1 = sqrt(2·g·h)            (initial vertical speed)
    /// p2 = sqrt(2·g·(h − y))      (vertical speed at the target)
    /// t  = max((−p1 ± p2) / −g)   (later crossing of the target height)
    /// θ  = atan(p1·t / x)
    /// v  = p1 / sin(θ)
    /// ```
    ///
    /// All fields are `NaN` when `h < 0` or `h < y`. A target directly overhead
    /// (`x = 0`) or a zero apex is not guarded.
    pub fn solve_from_max_height(&self, x: f64, y: f64, max_height: f64) -> ApexSolution {
        let g = self.gravity;
        let h = max_height;

        if h < 0.0 || h - y < 0.0 {
            return ApexSolution::INVALID;
        }

        let rise_speed = (2.0 * g * h).sqrt();
        let arrival_speed = (2.0 * g * (h - y)).sqrt();

        let t1 = (-rise_speed + arrival_speed) / -g;
        let t2 = (-rise_speed - arrival_speed) / -g;
        let time = t1.max(t2);

        let theta = (rise_speed * time / x).atan();
        let speed = rise_speed / theta.sin();

        ApexSolution {
            angle: theta.to_degrees(),
            speed,
            time,
        }
    }
}
