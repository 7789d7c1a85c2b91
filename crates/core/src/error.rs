//! Validation errors for aiming inputs
//!
//! Physical unreachability is not an error here: the solver reports it with
//! `NaN` and [`crate::SolveFailure`]. `AimError` covers values a user or
//! configuration can supply that the mount must never accept, such as an
//! upward-positive barrel pitch or a non-positive launch speed.

use std::fmt;

/// Error codes for rejected aiming inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AimErrorCode {
    /// Fixed barrel pitch must be finite and not above zero (barrel convention).
    InvalidPitch,

    /// Fixed launch speed must be finite and positive.
    InvalidSpeed,

    /// Fixed sample count must be at least one.
    InvalidSampleCount,

    /// A configuration value is outside its allowed range.
    InvalidConfig,
}

impl fmt::Display for AimErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            AimErrorCode::InvalidPitch => "invalid pitch",
            AimErrorCode::InvalidSpeed => "invalid speed",
            AimErrorCode::InvalidSampleCount => "invalid sample count",
            AimErrorCode::InvalidConfig => "invalid configuration",
        };
        f.write_str(text)
    }
}

/// A rejected aiming input: an error code plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AimError {
    code: AimErrorCode,
    msg: String,
}

impl AimError {
    /// Pitch rejected by [`crate::AimConstraint`] constructors.
    ///
    /// # Arguments
    /// * `pitch_deg` - The rejected pitch in degrees (barrel convention)
    pub fn invalid_pitch(pitch_deg: f64) -> Self {
        Self {
            code: AimErrorCode::InvalidPitch,
            msg: format!("Pitch must be finite and <= 0 degrees (barrel points level or up), got {pitch_deg}"),
        }
    }

    /// Speed rejected by [`crate::AimConstraint`] constructors.
    ///
    /// # Arguments
    /// * `speed` - The rejected launch speed
    pub fn invalid_speed(speed: f64) -> Self {
        Self {
            code: AimErrorCode::InvalidSpeed,
            msg: format!("Speed must be finite and positive, got {speed}"),
        }
    }

    /// Zero passed where a fixed sample count is required.
    pub fn invalid_sample_count(count: u32) -> Self {
        Self {
            code: AimErrorCode::InvalidSampleCount,
            msg: format!("Fixed sample count must be at least 1, got {count}"),
        }
    }

    /// Configuration parameter out of range.
    ///
    /// # Arguments
    /// * `param_name` - Field name (e.g., `"preview_time"`)
    /// * `message` - Description of the constraint that failed
    pub fn invalid_config(param_name: &str, message: &str) -> Self {
        Self {
            code: AimErrorCode::InvalidConfig,
            msg: format!("Config parameter {param_name}: {message}"),
        }
    }

    /// Error code
    pub fn code(&self) -> AimErrorCode {
        self.code
    }

    /// Error message
    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for AimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.msg)
    }
}

impl std::error::Error for AimError {}

impl From<AimError> for AimErrorCode {
    fn from(error: AimError) -> Self {
        error.code
    }
}
