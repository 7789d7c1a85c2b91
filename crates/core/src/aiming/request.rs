//! Aim requests and solving modes

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core_types::{world_up, Vec3};
use crate::error::AimError;
use crate::geometry::horizontal_and_vertical;

/// Which launch parameters are held fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveMode {
    /// Pitch and speed both fixed; the arc is a preview, not a hit
    FixedAll,
    /// Pitch fixed, speed solved
    FixedPitch,
    /// Speed fixed, pitch solved (low or high arc)
    FixedSpeed,
    /// Both solved from a heuristic apex height
    Unfixed,
}

impl SolveMode {
    /// All modes, in display order
    pub const ALL: [SolveMode; 4] = [
        SolveMode::FixedAll,
        SolveMode::FixedPitch,
        SolveMode::FixedSpeed,
        SolveMode::Unfixed,
    ];
}

impl fmt::Display for SolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveMode::FixedAll => "fixed-all",
            SolveMode::FixedPitch => "fixed-pitch",
            SolveMode::FixedSpeed => "fixed-speed",
            SolveMode::Unfixed => "unfixed",
        };
        f.write_str(name)
    }
}

/// Solving mode together with exactly the values that mode uses.
///
/// Pitches are in the barrel convention: degrees, positive = downward, so an
/// upward-aimed barrel has a negative pitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AimConstraint {
    /// Fire at a fixed pitch and speed
    FixedAll {
        /// Barrel pitch (degrees, positive = down)
        pitch_deg: f64,
        /// Launch speed
        speed: f64,
    },
    /// Fire at a fixed pitch; speed is solved to hit the target
    FixedPitch {
        /// Barrel pitch (degrees, positive = down)
        pitch_deg: f64,
    },
    /// Fire at a fixed speed; pitch is solved to hit the target
    FixedSpeed {
        /// Launch speed
        speed: f64,
        /// Take the flatter of the two possible arcs
        prefer_small_angle: bool,
    },
    /// Solve both from an apex height chosen by [`crate::AimConfig::apex_height`]
    Unfixed,
}

impl Default for AimConstraint {
    fn default() -> Self {
        AimConstraint::FixedPitch { pitch_deg: -45.0 }
    }
}

impl AimConstraint {
    /// Fixed pitch and speed.
    ///
    /// # Errors
    ///
    /// Rejects a non-finite or positive (downward) pitch and a non-positive speed.
    pub fn fixed_all(pitch_deg: f64, speed: f64) -> Result<Self, AimError> {
        Ok(AimConstraint::FixedAll {
            pitch_deg: checked_pitch(pitch_deg)?,
            speed: checked_speed(speed)?,
        })
    }

    /// Fixed pitch, solved speed.
    ///
    /// # Errors
    ///
    /// Rejects a non-finite or positive (downward) pitch.
    pub fn fixed_pitch(pitch_deg: f64) -> Result<Self, AimError> {
        Ok(AimConstraint::FixedPitch {
            pitch_deg: checked_pitch(pitch_deg)?,
        })
    }

    /// Fixed speed, solved pitch.
    ///
    /// # Errors
    ///
    /// Rejects a non-finite or non-positive speed.
    pub fn fixed_speed(speed: f64, prefer_small_angle: bool) -> Result<Self, AimError> {
        Ok(AimConstraint::FixedSpeed {
            speed: checked_speed(speed)?,
            prefer_small_angle,
        })
    }

    /// The mode this constraint selects
    pub fn mode(&self) -> SolveMode {
        match self {
            AimConstraint::FixedAll { .. } => SolveMode::FixedAll,
            AimConstraint::FixedPitch { .. } => SolveMode::FixedPitch,
            AimConstraint::FixedSpeed { .. } => SolveMode::FixedSpeed,
            AimConstraint::Unfixed => SolveMode::Unfixed,
        }
    }

    /// Re-check the carried values (variants can be built directly).
    ///
    /// # Errors
    ///
    /// Same rules as the constructors.
    pub fn validate(&self) -> Result<(), AimError> {
        match *self {
            AimConstraint::FixedAll { pitch_deg, speed } => {
                checked_pitch(pitch_deg)?;
                checked_speed(speed)?;
            }
            AimConstraint::FixedPitch { pitch_deg } => {
                checked_pitch(pitch_deg)?;
            }
            AimConstraint::FixedSpeed { speed, .. } => {
                checked_speed(speed)?;
            }
            AimConstraint::Unfixed => {}
        }
        Ok(())
    }
}

fn checked_pitch(pitch_deg: f64) -> Result<f64, AimError> {
    if pitch_deg.is_finite() && pitch_deg <= 0.0 {
        Ok(pitch_deg)
    } else {
        Err(AimError::invalid_pitch(pitch_deg))
    }
}

fn checked_speed(speed: f64) -> Result<f64, AimError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err(AimError::invalid_speed(speed))
    }
}

/// One aim: where the shot leaves, where it should go, and what is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimRequest {
    /// Muzzle position
    pub launch_point: Vec3,
    /// Aim point
    pub target_point: Vec3,
    /// Mode and its fixed values
    pub constraint: AimConstraint,
}

impl AimRequest {
    /// Build a request
    pub fn new(launch_point: Vec3, target_point: Vec3, constraint: AimConstraint) -> Self {
        Self {
            launch_point,
            target_point,
            constraint,
        }
    }

    /// Horizontal distance and vertical rise from launch to target.
    ///
    /// # Returns
    ///
    /// Tuple of `(x, y)` measured against world up
    pub fn displacement(&self) -> (f64, f64) {
        horizontal_and_vertical(self.launch_point, self.target_point, world_up())
    }
}
