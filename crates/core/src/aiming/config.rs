//! Aiming configuration
//!
//! Every tunable of the aiming policy lives here and is passed in explicitly;
//! there are no process-wide toggles.

use serde::{Deserialize, Serialize};

use crate::error::AimError;
use crate::trajectory::SampleCountPolicy;

/// Tunables for mode dispatch and trajectory display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimConfig {
    /// Flight time used to size preview arcs when the target is not the
    /// arc's end point (fixed-all mode, unreachable fixed-speed targets).
    ///
    /// Default: 2.0
    pub preview_time: f64,

    /// Lowest apex height the unfixed mode will choose.
    ///
    /// Default: 0.5
    pub min_apex_height: f64,

    /// Unfixed mode apex = `max(min_apex_height, y + apex_range_factor × x)`.
    ///
    /// Default: 0.3
    pub apex_range_factor: f64,

    /// Sample count policy for drawn trajectories.
    pub sampling: SampleCountPolicy,

    /// Whether aiming redraws the trajectory.
    ///
    /// Default: true
    pub show_trajectory: bool,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            preview_time: 2.0,
            min_apex_height: 0.5,
            apex_range_factor: 0.3,
            sampling: SampleCountPolicy::Adaptive,
            show_trajectory: true,
        }
    }
}

impl AimConfig {
    /// Replace the sampling policy
    pub fn with_sampling(mut self, sampling: SampleCountPolicy) -> Self {
        self.sampling = sampling;
        self
    }

    /// Turn trajectory drawing on or off
    pub fn with_show_trajectory(mut self, show: bool) -> Self {
        self.show_trajectory = show;
        self
    }

    /// Apex height the unfixed mode aims for.
    ///
    /// Clears a minimum absolute height and a height proportional to range, so
    /// long shots get proportionally taller arcs.
    pub fn apex_height(&self, x: f64, y: f64) -> f64 {
        self.min_apex_height.max(y + self.apex_range_factor * x)
    }

    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`AimError`] with code `InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> Result<(), AimError> {
        if !(self.preview_time.is_finite() && self.preview_time > 0.0) {
            return Err(AimError::invalid_config(
                "preview_time",
                &format!("must be finite and positive, got {}", self.preview_time),
            ));
        }
        if !(self.min_apex_height.is_finite() && self.min_apex_height >= 0.0) {
            return Err(AimError::invalid_config(
                "min_apex_height",
                &format!("must be finite and >= 0, got {}", self.min_apex_height),
            ));
        }
        if !(self.apex_range_factor.is_finite() && self.apex_range_factor >= 0.0) {
            return Err(AimError::invalid_config(
                "apex_range_factor",
                &format!("must be finite and >= 0, got {}", self.apex_range_factor),
            ));
        }
        Ok(())
    }
}
