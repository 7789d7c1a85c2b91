//! Ambient gravity access.
//!
//! The solver never owns gravity. It asks a [`GravitySource`] once per call and
//! works with the magnitude of the downward acceleration from then on.

use super::vec3::Vec3;

/// Standard gravity (m/s²), used by defaults and the headless demo
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Something that can report the current downward acceleration.
///
/// Implementations may return a signed value; callers always take the absolute
/// value, so an engine that stores gravity as `-9.81` works unchanged.
pub trait GravitySource {
    /// Current gravity (m/s²), sign is ignored
    fn gravity(&self) -> f64;
}

impl GravitySource for f64 {
    fn gravity(&self) -> f64 {
        *self
    }
}

/// Engine-style gravity vector; only the vertical (+Y) component is used.
impl GravitySource for Vec3 {
    fn gravity(&self) -> f64 {
        self.y
    }
}

impl<T: GravitySource + ?Sized> GravitySource for &T {
    fn gravity(&self) -> f64 {
        (**self).gravity()
    }
}
