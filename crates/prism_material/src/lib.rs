//! Prism materials - light transport at a single surface hit.
//!
//! Given an incident ray and a hit record, a material decides whether light
//! scatters, where it goes next and how much of each color channel survives.
//!
//! - **Optics**: `reflect`, `refract`, `schlick`
//! - **Sampling**: rejection sampling in the unit ball, per-worker generators
//! - **Materials**: `Lambertian`, `Metal`, `Dielectric` behind a closed `Material` enum
//! - **Library**: JSON material libraries via serde
//!
//! The render loop owns recursion, depth limits and the accumulation of
//! attenuation across bounces. Each worker owns one generator and passes it
//! into every scatter call.
//!
//! # Example
//!
//! ```ignore
//! use prism_material::{worker_rng, HitRecord, Material, Ray, Scatter, Vec3};
//!
//! let glass = Material::dielectric(1.5)?;
//! let mut rng = worker_rng(42, 0);
//! let rec = HitRecord::new(Vec3::ZERO, Vec3::Y, 1.0);
//! let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
//! if let Some(result) = glass.scatter(&ray_in, &rec, &mut rng) {
//!     println!("{:?} -> {:?}", result.attenuation, result.scattered);
//! }
//! ```

pub mod config;
pub mod error;
mod hit;
mod material;
pub mod optics;
pub mod sampling;

pub use config::{LibraryConfig, MaterialDesc, MaterialLibrary, SamplingConfig};
pub use error::{MaterialError, MaterialResult};
pub use hit::HitRecord;
pub use material::{Color, Dielectric, Lambertian, Material, Metal, Scatter, ScatterResult};
pub use optics::{base_reflectance, reflect, refract, schlick};
pub use sampling::{gen_f32, random_in_unit_sphere, worker_rng};

/// Re-export Vec3 and Ray from prism_math
pub use prism_math::{Ray, Vec3};
