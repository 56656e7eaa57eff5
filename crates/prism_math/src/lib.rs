// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod ray;
pub use ray::Ray;

/// Tolerance used when comparing normalized vectors.
pub const UNIT_EPSILON: f32 = 1e-4;

/// Returns true if `v` has length 1 within [`UNIT_EPSILON`].
///
/// Used in debug assertions on caller-supplied normals.
#[inline]
pub fn is_unit(v: Vec3) -> bool {
    (v.length_squared() - 1.0).abs() < 2.0 * UNIT_EPSILON
}
