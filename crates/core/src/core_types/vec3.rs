//! Vector type alias for 3D positions and directions.

use nalgebra::Vector3;

/// 3D vector type for positions, velocities, and directions.
///
/// This is a simple alias for `nalgebra::Vector3<f64>`. The aiming math runs in
/// double precision so that solved speeds reproduce to well below 1e-6.
pub type Vec3 = Vector3<f64>;

/// World up direction (+Y), the axis gravity pulls against.
#[inline]
pub fn world_up() -> Vec3 {
    Vec3::y()
}
