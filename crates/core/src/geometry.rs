//! Vector geometry used by the aiming math
//!
//! Two primitives: projecting a vector onto a plane, and the signed angle between
//! two vectors measured about a reference axis. Both are pure and stateless.
//!
//! # Preconditions
//!
//! Plane normals and reference axes must be unit length. Neither function
//! normalizes its axis argument; passing a non-unit axis scales the result
//! instead of failing.

use crate::core_types::Vec3;

/// Projections shorter than this are treated as having no direction
const DEGENERATE_LENGTH: f64 = 1e-12;

/// Project `vector` onto the plane through the origin with the given normal.
///
/// ```text
/// v_plane = v − (v · n) × n
/// ```
///
/// `normal` is used as given and must be unit length. A zero normal returns
/// `vector` unchanged, which is not a meaningful projection.
///
/// # Example
///
/// ```
/// use cannon_aim_core::geometry::project_on_plane;
/// use cannon_aim_core::Vec3;
///
/// let v = Vec3::new(3.0, 4.0, 0.0);
/// let on_ground = project_on_plane(v, Vec3::y());
/// assert_eq!(on_ground, Vec3::new(3.0, 0.0, 0.0));
/// ```
#[inline]
pub fn project_on_plane(vector: Vec3, normal: Vec3) -> Vec3 {
    let projection_length = vector.dot(&normal);
    vector - normal * projection_length
}

/// Signed angle from `a` to `b` about `axis`, in degrees.
///
/// Both vectors are projected onto the plane orthogonal to `axis` and
/// normalized. The magnitude is the angle between the projections; the sign is
/// positive when turning from `a` to `b` is counter-clockwise about `axis`
/// (right-hand rule). Range is (−180, 180].
///
/// Returns `NaN` when either projection has (near) zero length, i.e. `a` or
/// `b` is parallel to `axis`. That case is reported, not special-cased.
///
/// # Example
///
/// ```
/// use cannon_aim_core::geometry::signed_angle_deg;
/// use cannon_aim_core::Vec3;
///
/// // +X to -Z is a quarter turn counter-clockwise about +Y
/// let angle = signed_angle_deg(Vec3::x(), -Vec3::z(), Vec3::y());
/// assert!((angle - 90.0).abs() < 1e-9);
/// ```
pub fn signed_angle_deg(a: Vec3, b: Vec3, axis: Vec3) -> f64 {
    let a_on_plane = project_on_plane(a, axis);
    let b_on_plane = project_on_plane(b, axis);

    let a_len = a_on_plane.norm();
    let b_len = b_on_plane.norm();
    if a_len <= DEGENERATE_LENGTH || b_len <= DEGENERATE_LENGTH {
        return f64::NAN;
    }

    let a_dir = a_on_plane / a_len;
    let b_dir = b_on_plane / b_len;

    // Right-hand rule: a × b points along +axis for a counter-clockwise turn.
    // Equal or opposite unit vectors give an exactly zero cross product.
    let sin = a_dir.cross(&b_dir).dot(&axis);
    let cos = a_dir.dot(&b_dir);

    // -0.0 would turn the opposite case into -180
    let sin = if sin == 0.0 { 0.0 } else { sin };
    sin.atan2(cos).to_degrees()
}

/// Split the offset `from → to` into horizontal distance and vertical rise.
///
/// Horizontal distance is the length of the offset projected onto the plane
/// orthogonal to `up`; vertical displacement is the signed component along
/// `up` (positive when `to` is higher).
///
/// # Returns
///
/// Tuple of `(horizontal, vertical)` in world units
pub fn horizontal_and_vertical(from: Vec3, to: Vec3, up: Vec3) -> (f64, f64) {
    let offset = to - from;
    let horizontal = project_on_plane(offset, up).norm();
    let vertical = offset.dot(&up);
    (horizontal, vertical)
}
