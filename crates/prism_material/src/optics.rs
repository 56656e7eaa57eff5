//! Geometric optics helpers shared by the materials.
//!
//! All functions are pure. Normals must be unit length; incident vectors
//! need not be.

use prism_math::Vec3;

/// Reflect a vector about a normal.
///
/// `v - 2 * dot(v, n) * n`. The component of `v` along `n` flips sign, the
/// tangential part is unchanged. `n` must be unit length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface using Snell's law.
///
/// `ni_over_nt` is the index of the medium being left divided by the index
/// of the medium being entered. `n` must be unit length and point to the
/// side `v` arrives from.
///
/// Returns `None` on total internal reflection, in which case the caller
/// should reflect instead. The returned direction is unit length.
#[inline]
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);

    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Fresnel reflectance at normal incidence for an interface with the given
/// refractive index ratio.
#[inline]
pub fn base_reflectance(refractive_index: f32) -> f32 {
    ((1.0 - refractive_index) / (1.0 + refractive_index)).powi(2)
}

/// Schlick's approximation for reflectance.
///
/// `cosine` is the cosine of the angle between the ray and the normal on the
/// side of the interface the caller cares about. 1.0 gives the base
/// reflectance, 0.0 (grazing) gives 1.0.
#[inline]
pub fn schlick(cosine: f32, refractive_index: f32) -> f32 {
    let r0 = base_reflectance(refractive_index);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
