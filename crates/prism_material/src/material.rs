//! Materials and the scatter contract.

use prism_math::{Ray, Vec3};
use rand::RngCore;

use crate::error::{MaterialError, MaterialResult};
use crate::hit::HitRecord;
use crate::optics::{reflect, refract, schlick};
use crate::sampling::{gen_f32, random_in_unit_sphere};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a scatter event that produced a new ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel factor applied to light carried back along `scattered`
    pub attenuation: Color,
    /// The outgoing ray, starting at the hit point
    pub scattered: Ray,
}

impl ScatterResult {
    /// Create a new scatter result.
    #[inline]
    pub fn new(attenuation: Color, scattered: Ray) -> Self {
        Self {
            attenuation,
            scattered,
        }
    }
}

/// Trait for surfaces that describe how light interacts with them.
pub trait Scatter: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some` with the attenuation and outgoing ray, or `None` if the
    /// ray is absorbed. `rng` is the calling worker's generator.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore)
        -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    ///
    /// Components are expected in [0, 1]; use [`Material::lambertian`] to
    /// have that checked.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    /// Get the albedo color.
    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Scatter for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        // The sample lies strictly inside the unit ball, so this never
        // cancels a unit normal
        let target = rec.normal + random_in_unit_sphere(rng);

        let scattered = Ray::new(rec.p, target);
        Some(ScatterResult::new(self.albedo, scattered))
    }
}

/// Metal (mirror) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
}

impl Metal {
    /// Create a new Metal material with the given reflectance color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    /// Get the albedo color.
    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Scatter for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);

        // Only scatter if the reflected ray leaves the surface
        if reflected.dot(rec.normal) > 0.0 {
            let scattered = Ray::new(rec.p, reflected);
            Some(ScatterResult::new(self.albedo, scattered))
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    /// Index of refraction relative to the surrounding medium
    refractive_index: f32,
}

/// Which side of a dielectric boundary a ray is on, and what that implies.
struct Interface {
    outward_normal: Vec3,
    ni_over_nt: f32,
    cosine: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refractive_index`: 1.0 = no bending, 1.5 = glass, 2.4 = diamond
    pub fn new(refractive_index: f32) -> Self {
        Self { refractive_index }
    }

    /// Get the refractive index.
    pub fn refractive_index(&self) -> f32 {
        self.refractive_index
    }

    /// Probability that a ray hitting this surface is reflected rather than
    /// refracted. 1.0 under total internal reflection.
    pub fn reflect_probability(&self, ray_in: &Ray, rec: &HitRecord) -> f32 {
        self.split(ray_in, rec).1
    }

    /// Refracted direction (if any) and the probability of reflecting instead.
    fn split(&self, ray_in: &Ray, rec: &HitRecord) -> (Option<Vec3>, f32) {
        let interface = self.interface(ray_in, rec);
        let refracted = refract(ray_in.direction(), interface.outward_normal, interface.ni_over_nt);
        let reflect_probability = match refracted {
            Some(_) => Self::fresnel(interface.cosine, self.refractive_index),
            None => 1.0,
        };
        (refracted, reflect_probability)
    }

    fn interface(&self, ray_in: &Ray, rec: &HitRecord) -> Interface {
        let ri = self.refractive_index;
        let direction = ray_in.direction();
        let d_dot_n = direction.dot(rec.normal);

        if d_dot_n > 0.0 {
            // Inside the medium, heading out
            let cosine = ri * d_dot_n / direction.length();
            Interface {
                outward_normal: -rec.normal,
                ni_over_nt: ri,
                cosine: (1.0 - ri * ri * (1.0 - cosine * cosine)).sqrt(),
            }
        } else {
            Interface {
                outward_normal: rec.normal,
                ni_over_nt: 1.0 / ri,
                cosine: -d_dot_n / direction.length(),
            }
        }
    }

    /// Schlick reflectance clamped to a valid probability. The exit-side
    /// cosine can leave [0, 1] for steep exits.
    #[inline]
    fn fresnel(cosine: f32, ri: f32) -> f32 {
        schlick(cosine, ri).clamp(0.0, 1.0)
    }
}

impl Scatter for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        // Glass doesn't tint
        let attenuation = Color::ONE;
        let (refracted, reflect_probability) = self.split(ray_in, rec);

        // Reflection uses the stored normal, not the side-corrected one
        let sample = gen_f32(rng);
        let direction = match refracted {
            Some(refracted) if sample >= reflect_probability => refracted,
            _ => reflect(ray_in.direction(), rec.normal),
        };

        Some(ScatterResult::new(attenuation, Ray::new(rec.p, direction)))
    }
}

/// A surface material.
///
/// Materials are small `Copy` values built once per scene object and shared
/// read-only by every worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Create a diffuse material, checking the albedo.
    pub fn lambertian(albedo: Color) -> MaterialResult<Self> {
        validate_albedo(albedo)?;
        log::debug!("Created lambertian material, albedo {:?}", albedo);
        Ok(Material::Lambertian(Lambertian::new(albedo)))
    }

    /// Create a metal material, checking the albedo.
    pub fn metal(albedo: Color) -> MaterialResult<Self> {
        validate_albedo(albedo)?;
        log::debug!("Created metal material, albedo {:?}", albedo);
        Ok(Material::Metal(Metal::new(albedo)))
    }

    /// Create a dielectric material, checking the refractive index.
    pub fn dielectric(refractive_index: f32) -> MaterialResult<Self> {
        if !refractive_index.is_finite() || refractive_index <= 0.0 {
            return Err(MaterialError::InvalidRefractiveIndex(refractive_index));
        }
        log::debug!(
            "Created dielectric material, refractive index {}",
            refractive_index
        );
        Ok(Material::Dielectric(Dielectric::new(refractive_index)))
    }

    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Material::Lambertian(_) => "lambertian",
            Material::Metal(_) => "metal",
            Material::Dielectric(_) => "dielectric",
        }
    }
}

impl Scatter for Material {
    #[inline]
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

fn validate_albedo(albedo: Color) -> MaterialResult<()> {
    let valid = albedo
        .to_array()
        .iter()
        .all(|c| c.is_finite() && (0.0..=1.0).contains(c));
    if valid {
        Ok(())
    } else {
        Err(MaterialError::InvalidAlbedo(albedo.to_array()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn floor_hit() -> HitRecord {
        HitRecord::new(Vec3::new(1.0, 0.0, -2.0), Vec3::Y, 1.0)
    }

    #[test]
    fn test_lambertian_attenuation_and_origin() {
        let mat = Lambertian::new(Color::new(0.5, 0.5, 0.5));
        let rec = floor_hit();
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, -1.0, -2.0));
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let result = mat.scatter(&ray_in, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.5, 0.5, 0.5));
            assert_eq!(result.scattered.origin(), rec.p);

            // Direction is the normal pushed by a point inside the unit ball
            let offset = result.scattered.direction() - rec.normal;
            assert!(offset.length_squared() < 1.0 + 1e-5);
            assert!(result.scattered.direction().dot(rec.normal) > 0.0);
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let mat = Metal::new(Color::new(0.8, 0.8, 0.8));
        let rec = floor_hit();
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, -2.0, 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        let result = mat.scatter(&ray_in, &rec, &mut rng).unwrap();
        assert_eq!(result.attenuation, Color::new(0.8, 0.8, 0.8));
        assert_eq!(result.scattered.origin(), rec.p);

        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-5);
    }

    #[test]
    fn test_metal_grazing_from_behind_absorbs() {
        let mat = Metal::new(Color::new(0.8, 0.8, 0.8));
        let rec = floor_hit();
        let mut rng = StdRng::seed_from_u64(42);

        // Nearly tangent, arriving from the back side
        let behind = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1e-3, 0.0));
        assert!(mat.scatter(&behind, &rec, &mut rng).is_none());

        // Exactly tangent: the reflection does not leave the surface
        let tangent = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(mat.scatter(&tangent, &rec, &mut rng).is_none());

        // Nearly tangent from the front still reflects
        let front = Ray::new(Vec3::ZERO, Vec3::new(1.0, -1e-3, 0.0));
        let result = mat.scatter(&front, &rec, &mut rng).unwrap();
        assert!(result.scattered.direction().dot(rec.normal) > 0.0);
    }

    #[test]
    fn test_dielectric_always_scatters_white() {
        let mat = Dielectric::new(1.5);
        let rec = floor_hit();
        let mut rng = StdRng::seed_from_u64(42);

        let rays = [
            Ray::new(Vec3::ZERO, Vec3::NEG_Y),
            Ray::new(Vec3::ZERO, Vec3::new(1.0, -0.2, 0.3)),
            Ray::new(Vec3::ZERO, Vec3::new(0.4, 1.0, 0.0)),
            Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.9, 0.0)),
        ];
        for ray_in in rays {
            for _ in 0..100 {
                let result = mat.scatter(&ray_in, &rec, &mut rng).unwrap();
                assert_eq!(result.attenuation, Color::ONE);
                assert_eq!(result.scattered.origin(), rec.p);
            }
        }
    }

    #[test]
    fn test_dielectric_head_on_probability() {
        let mat = Dielectric::new(1.5);
        let rec = floor_hit();
        let ray_in = Ray::new(Vec3::new(1.0, 1.0, -2.0), Vec3::new(0.0, -3.0, 0.0));

        let p = mat.reflect_probability(&ray_in, &rec);
        assert!((p - 0.04).abs() < 1e-5);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mat = Dielectric::new(1.5);
        let rec = floor_hit();
        // Leaving the glass 60 degrees off the normal
        let theta = 60.0_f32.to_radians();
        let ray_in = Ray::new(Vec3::ZERO, Vec3::new(theta.sin(), theta.cos(), 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(mat.reflect_probability(&ray_in, &rec), 1.0);
        for _ in 0..100 {
            let result = mat.scatter(&ray_in, &rec, &mut rng).unwrap();
            // Bounced back into the medium
            assert!(result.scattered.direction().dot(rec.normal) < 0.0);
        }
    }

    #[test]
    fn test_dielectric_exit_probability_in_range() {
        let mat = Dielectric::new(1.5);
        let rec = floor_hit();
        for degrees in [0.0_f32, 10.0, 25.0, 40.0, 41.0] {
            let theta = degrees.to_radians();
            let ray_in = Ray::new(Vec3::ZERO, Vec3::new(theta.sin(), theta.cos(), 0.0));
            let p = mat.reflect_probability(&ray_in, &rec);
            assert!((0.0..=1.0).contains(&p), "angle {degrees}: {p}");
        }
    }

    #[test]
    fn test_dielectric_exit_cosine_scaled_by_index() {
        let mat = Dielectric::new(1.5);
        let rec = floor_hit();
        let exiting = |degrees: f32| {
            let theta = degrees.to_radians();
            Ray::new(Vec3::ZERO, Vec3::new(theta.sin(), theta.cos(), 0.0) * 2.0)
        };

        // cosine = 1.5 * cos(30) = 1.299 -> sqrt(1 - 2.25 * (1 - 1.6875)) = 1.596,
        // raw Schlick is about -0.032 and clamps to 0
        assert_eq!(mat.reflect_probability(&exiting(30.0), &rec), 0.0);

        // Just inside the critical angle the scaled cosine stays above 1 and
        // Schlick lands a little under r0 (0.0384, not the unscaled 0.40)
        let p = mat.reflect_probability(&exiting(41.0), &rec);
        assert!((p - 0.0384).abs() < 1e-3, "got {p}");
    }

    #[test]
    fn test_dielectric_unit_index_passes_straight() {
        let mat = Dielectric::new(1.0);
        let rec = floor_hit();
        let dir = Vec3::new(1.0, -1.0, 0.5);
        let ray_in = Ray::new(Vec3::ZERO, dir);
        let mut rng = StdRng::seed_from_u64(42);

        // Matched index: a refracted ray continues undeviated
        let mut refracted = 0;
        for _ in 0..100 {
            let result = mat.scatter(&ray_in, &rec, &mut rng).unwrap();
            if result.scattered.direction().dot(rec.normal) < 0.0 {
                assert!((result.scattered.direction() - dir.normalize()).length() < 1e-5);
                refracted += 1;
            }
        }
        // Schlick with cosine 2/3 reflects about 0.4% of rays
        assert!(refracted > 90, "only {refracted} of 100 refracted");
    }

    #[test]
    fn test_material_enum_dispatch() {
        let rec = floor_hit();
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));

        let lambertian: Material = Lambertian::new(Color::new(0.2, 0.4, 0.6)).into();
        let metal: Material = Metal::new(Color::new(0.9, 0.9, 0.9)).into();
        let glass: Material = Dielectric::new(1.5).into();

        // Same seed through the enum and the concrete type gives the same ray
        for (mat, concrete) in [
            (lambertian, &Lambertian::new(Color::new(0.2, 0.4, 0.6)) as &dyn Scatter),
            (metal, &Metal::new(Color::new(0.9, 0.9, 0.9)) as &dyn Scatter),
            (glass, &Dielectric::new(1.5) as &dyn Scatter),
        ] {
            let mut rng_a = StdRng::seed_from_u64(9);
            let mut rng_b = StdRng::seed_from_u64(9);
            assert_eq!(
                mat.scatter(&ray_in, &rec, &mut rng_a),
                concrete.scatter(&ray_in, &rec, &mut rng_b),
                "{}",
                mat.kind()
            );
        }
    }

    #[test]
    fn test_validated_constructors() {
        assert!(Material::lambertian(Color::new(0.5, 0.5, 0.5)).is_ok());
        assert!(Material::metal(Color::ONE).is_ok());
        assert!(Material::dielectric(1.5).is_ok());

        assert!(matches!(
            Material::lambertian(Color::new(1.2, 0.0, 0.0)),
            Err(MaterialError::InvalidAlbedo(_))
        ));
        assert!(matches!(
            Material::metal(Color::new(f32::NAN, 0.0, 0.0)),
            Err(MaterialError::InvalidAlbedo(_))
        ));
        assert!(matches!(
            Material::dielectric(0.0),
            Err(MaterialError::InvalidRefractiveIndex(_))
        ));
        assert!(matches!(
            Material::dielectric(f32::INFINITY),
            Err(MaterialError::InvalidRefractiveIndex(_))
        ));
    }

    #[test]
    fn test_material_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Material>();
    }
}
