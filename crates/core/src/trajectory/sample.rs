//! Trajectory sample poses

use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};

use crate::core_types::{world_up, Vec3};

/// One time-stamped pose along a launch arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    /// Time since launch
    pub t: f64,
    /// World position
    pub position: Vec3,
    /// Horizontal firing direction (unit length, orthogonal to world up)
    pub forward: Vec3,
    /// Flight-path angle at `t` (degrees, positive above horizontal)
    pub pitch_deg: f64,
}

impl TrajectorySample {
    /// Rotation of a marker placed at this sample.
    ///
    /// Built by looking along `forward` with world up (the yaw), then pitching
    /// about the lateral axis by `-pitch_deg`. The local +Z axis of the result
    /// points along the direction of motion.
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        let yaw = UnitQuaternion::face_towards(&self.forward, &world_up());
        let pitch = UnitQuaternion::from_axis_angle(&Vec3::x_axis(), -self.pitch_deg.to_radians());
        yaw * pitch
    }

    /// Unit direction of motion at this sample
    pub fn heading(&self) -> Vec3 {
        self.orientation() * Vec3::z()
    }

    /// True when every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.t.is_finite()
            && self.pitch_deg.is_finite()
            && self.position.iter().all(|c| c.is_finite())
            && self.forward.iter().all(|c| c.is_finite())
    }
}

/// Ordered sequence of samples for one drawn arc.
///
/// Samples are sorted by `t` ascending. A trajectory is produced whole on
/// every draw and never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub(crate) fn from_samples(samples: Vec<TrajectorySample>) -> Self {
        Self { samples }
    }

    /// All samples in time order
    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the trajectory holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate samples in time order
    pub fn iter(&self) -> std::slice::Iter<'_, TrajectorySample> {
        self.samples.iter()
    }

    /// Final sample (the landing point for a target-bound arc)
    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    /// Check the whole arc is usable before rendering.
    ///
    /// The sampler never clamps, so a degenerate launch (vertical, zero speed)
    /// comes back full of NaN/∞ and must be rejected here by the caller.
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(TrajectorySample::is_finite)
    }

    /// Consume into the underlying vector
    pub fn into_samples(self) -> Vec<TrajectorySample> {
        self.samples
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectorySample;
    type IntoIter = std::slice::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
