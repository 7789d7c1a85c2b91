//! Turning a solved launch into sample poses
//!
//! # Algorithm
//!
//! 1. Horizontal firing direction = normalized projection of `target − start`
//!    onto the ground plane
//! 2. Horizontal distance = fixed override, or the length of that projection
//! 3. Flight time `T = total_time(distance, angle, speed)`
//! 4. Sample count from [`SampleCountPolicy`]
//! 5. For `i = 1..=n`: `t = i·T/n`, position from `displacement_at_time`,
//!    pitch from `angle_at_time`
//!
//! The first sample is one step after launch and the last lands at `T`.
//! Nothing is clamped: a degenerate launch propagates NaN/∞ into every sample.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use tracing::debug;

use super::sample::{Trajectory, TrajectorySample};
use crate::core_types::{world_up, Vec3};
use crate::error::AimError;
use crate::geometry::project_on_plane;
use crate::physics::Ballistics;

/// How many samples to place along an arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleCountPolicy {
    /// Denser sampling for longer arcs: `clamp(ceil(3 × distance), 8, 4096)`
    #[default]
    Adaptive,
    /// Always exactly this many samples
    Fixed(NonZeroU32),
}

impl SampleCountPolicy {
    /// Floor for adaptive sampling so short arcs stay smooth
    pub const MIN_ADAPTIVE_SAMPLES: usize = 8;

    /// Ceiling for adaptive sampling. Arcs longer than ~1365 units get
    /// sparser than [`Self::SAMPLES_PER_UNIT`] instead of growing without bound.
    pub const MAX_ADAPTIVE_SAMPLES: usize = 4096;

    /// Adaptive samples per unit of horizontal distance
    pub const SAMPLES_PER_UNIT: f64 = 3.0;

    /// Fixed sample count, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`AimError`] with code `InvalidSampleCount` when `count` is 0.
    pub fn fixed(count: u32) -> Result<Self, AimError> {
        NonZeroU32::new(count)
            .map(SampleCountPolicy::Fixed)
            .ok_or_else(|| AimError::invalid_sample_count(count))
    }

    /// Number of samples for an arc of the given horizontal distance.
    ///
    /// A non-finite distance falls back to the adaptive floor.
    pub fn count_for(&self, distance: f64) -> usize {
        match self {
            SampleCountPolicy::Fixed(count) => count.get() as usize,
            SampleCountPolicy::Adaptive => {
                let dense = (distance * Self::SAMPLES_PER_UNIT).ceil();
                if dense.is_finite() && dense > Self::MIN_ADAPTIVE_SAMPLES as f64 {
                    dense.min(Self::MAX_ADAPTIVE_SAMPLES as f64) as usize
                } else {
                    Self::MIN_ADAPTIVE_SAMPLES
                }
            }
        }
    }
}

/// Per-draw quantities shared by every sample
struct ArcPlan {
    forward: Vec3,
    total_time: f64,
    count: usize,
}

impl ArcPlan {
    fn new(
        ballistics: &Ballistics,
        start: Vec3,
        target: Vec3,
        angle_deg: f64,
        speed: f64,
        fixed_distance: Option<f64>,
        policy: SampleCountPolicy,
    ) -> Self {
        let on_ground = project_on_plane(target - start, world_up());
        let distance = fixed_distance.unwrap_or_else(|| on_ground.norm());

        Self {
            forward: on_ground.normalize(),
            total_time: ballistics.total_time(distance, angle_deg, speed),
            count: policy.count_for(distance),
        }
    }

    fn write_samples(
        &self,
        out: &mut Vec<TrajectorySample>,
        ballistics: &Ballistics,
        start: Vec3,
        angle_deg: f64,
        speed: f64,
    ) {
        let up = world_up();
        let interval = self.total_time / self.count as f64;

        out.clear();
        out.reserve(self.count);
        out.extend((1..=self.count).map(|i| {
            let t = i as f64 * interval;
            let (x, y) = ballistics.displacement_at_time(angle_deg, speed, t);
            TrajectorySample {
                t,
                position: start + self.forward * x + up * y,
                forward: self.forward,
                pitch_deg: ballistics.angle_at_time(angle_deg, speed, t),
            }
        }));
    }
}

/// Sample a launch arc from `start` toward `target`.
///
/// # Arguments
///
/// * `ballistics` - Solver bound to the ambient gravity
/// * `start` - Launch position
/// * `target` - Aim point; only its horizontal direction matters when
///   `fixed_distance` is set
/// * `angle_deg` - Launch angle above horizontal
/// * `speed` - Launch speed
/// * `fixed_distance` - Horizontal distance override (preview arcs)
/// * `policy` - Sample count policy
///
/// # Returns
///
/// Exactly `policy.count_for(distance)` samples in ascending time order.
///
/// # Example
///
/// ```
/// use cannon_aim_core::trajectory::{sample, SampleCountPolicy};
/// use cannon_aim_core::{Ballistics, Vec3};
///
/// let ballistics = Ballistics::new(10.0);
/// let trajectory = sample(
///     &ballistics,
///     Vec3::zeros(),
///     Vec3::new(0.0, 0.0, 10.0),
///     45.0,
///     10.0,
///     None,
///     SampleCountPolicy::Adaptive,
/// );
/// assert_eq!(trajectory.len(), 30);
/// ```
pub fn sample(
    ballistics: &Ballistics,
    start: Vec3,
    target: Vec3,
    angle_deg: f64,
    speed: f64,
    fixed_distance: Option<f64>,
    policy: SampleCountPolicy,
) -> Trajectory {
    let plan = ArcPlan::new(
        ballistics,
        start,
        target,
        angle_deg,
        speed,
        fixed_distance,
        policy,
    );
    let mut samples = Vec::new();
    plan.write_samples(&mut samples, ballistics, start, angle_deg, speed);
    Trajectory::from_samples(samples)
}

/// Reusable sampler that keeps its sample buffer between draws.
///
/// Each [`TrajectorySampler::draw`] replaces the previous samples entirely;
/// the allocation is reused so redrawing on every aim update does not churn
/// memory.
#[derive(Debug, Clone, Default)]
pub struct TrajectorySampler {
    policy: SampleCountPolicy,
    samples: Vec<TrajectorySample>,
}

impl TrajectorySampler {
    /// Create an empty sampler
    pub fn new(policy: SampleCountPolicy) -> Self {
        Self {
            policy,
            samples: Vec::new(),
        }
    }

    /// Current sample count policy
    pub fn policy(&self) -> SampleCountPolicy {
        self.policy
    }

    /// Change the policy; takes effect on the next draw
    pub fn set_policy(&mut self, policy: SampleCountPolicy) {
        self.policy = policy;
    }

    /// Resample the arc, replacing the previous samples.
    ///
    /// See [`sample`] for the meaning of the arguments.
    pub fn draw(
        &mut self,
        ballistics: &Ballistics,
        start: Vec3,
        target: Vec3,
        angle_deg: f64,
        speed: f64,
        fixed_distance: Option<f64>,
    ) -> &[TrajectorySample] {
        let plan = ArcPlan::new(
            ballistics,
            start,
            target,
            angle_deg,
            speed,
            fixed_distance,
            self.policy,
        );
        plan.write_samples(&mut self.samples, ballistics, start, angle_deg, speed);

        debug!(
            "Trajectory drawn: {} samples over {:.3}s (angle={:.2}°, speed={:.3})",
            self.samples.len(),
            plan.total_time,
            angle_deg,
            speed
        );

        &self.samples
    }

    /// Drop all samples (trajectory hidden)
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples from the most recent draw
    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    /// Copy the current samples out as an owned trajectory
    pub fn to_trajectory(&self) -> Trajectory {
        Trajectory::from_samples(self.samples.clone())
    }
}
