//! Hit record handed to materials by the geometry layer.

use prism_math::Vec3;

/// Record of a single ray-object intersection.
///
/// Produced by whatever intersects rays with the scene. Materials read only
/// `p` and `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, pointing out of the object regardless of which
    /// side the ray arrived from. Dielectrics rely on this to tell entry
    /// from exit.
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
}

impl HitRecord {
    /// Create a hit record.
    ///
    /// `normal` must already be unit length and outward facing. This is not
    /// checked in release builds.
    #[inline]
    pub fn new(p: Vec3, normal: Vec3, t: f32) -> Self {
        debug_assert!(
            prism_math::is_unit(normal),
            "hit normal must be unit length, got {normal:?}"
        );
        Self { p, normal, t }
    }
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            t: 0.0,
        }
    }
}
