//! JSON material libraries.
//!
//! A library names the materials a scene uses and the sampling settings its
//! workers start from:
//!
//! ```json
//! {
//!   "sampling": { "seed": 42 },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
//!     "mirror": { "type": "metal", "albedo": [0.8, 0.8, 0.8] },
//!     "glass":  { "type": "dielectric", "refractive_index": 1.5 }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use prism_math::Vec3;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{MaterialError, MaterialResult};
use crate::material::Material;
use crate::sampling::{entropy_rng, worker_rng};

/// Serialized form of a single material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum MaterialDesc {
    Lambertian { albedo: [f32; 3] },
    Metal { albedo: [f32; 3] },
    Dielectric { refractive_index: f32 },
}

impl MaterialDesc {
    /// Validate and build the material.
    pub fn build(&self) -> MaterialResult<Material> {
        match *self {
            MaterialDesc::Lambertian { albedo } => Material::lambertian(Vec3::from_array(albedo)),
            MaterialDesc::Metal { albedo } => Material::metal(Vec3::from_array(albedo)),
            MaterialDesc::Dielectric { refractive_index } => Material::dielectric(refractive_index),
        }
    }
}

impl From<&Material> for MaterialDesc {
    fn from(material: &Material) -> Self {
        match material {
            Material::Lambertian(m) => MaterialDesc::Lambertian {
                albedo: m.albedo().to_array(),
            },
            Material::Metal(m) => MaterialDesc::Metal {
                albedo: m.albedo().to_array(),
            },
            Material::Dielectric(m) => MaterialDesc::Dielectric {
                refractive_index: m.refractive_index(),
            },
        }
    }
}

/// How workers seed their generators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingConfig {
    /// Base seed. `None` seeds every worker from OS entropy.
    pub seed: Option<u64>,
}

impl SamplingConfig {
    /// Sampling with a fixed base seed.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Create the generator owned by `worker` for its whole lifetime.
    pub fn rng_for_worker(&self, worker: usize) -> StdRng {
        match self.seed {
            Some(seed) => worker_rng(seed, worker as u64),
            None => entropy_rng(),
        }
    }
}

/// A material library as it appears on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    #[serde(default)]
    pub sampling: SamplingConfig,
    pub materials: BTreeMap<String, MaterialDesc>,
}

impl LibraryConfig {
    /// Parse a library from a JSON string.
    pub fn from_json_str(json: &str) -> MaterialResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a library file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> MaterialResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log::debug!(
            "Read {} material descriptions from {}",
            config.materials.len(),
            path.display()
        );
        Ok(config)
    }

    /// Validate every description and build the library.
    ///
    /// Fails on the first invalid material.
    pub fn build(&self) -> MaterialResult<MaterialLibrary> {
        let mut library = MaterialLibrary::new(self.sampling);
        for (name, desc) in &self.materials {
            let material = desc.build().map_err(|e| {
                log::warn!("Material '{}' is invalid: {}", name, e);
                e
            })?;
            library.insert(name.clone(), material);
        }

        if library.is_empty() {
            log::warn!("Material library is empty");
        }
        log::info!("Built material library with {} materials", library.len());
        Ok(library)
    }
}

/// Named, validated materials shared read-only by all workers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialLibrary {
    materials: BTreeMap<String, Material>,
    sampling: SamplingConfig,
}

impl MaterialLibrary {
    /// Create an empty library.
    pub fn new(sampling: SamplingConfig) -> Self {
        Self {
            materials: BTreeMap::new(),
            sampling,
        }
    }

    /// Load and build a library file in one step.
    pub fn load<P: AsRef<Path>>(path: P) -> MaterialResult<Self> {
        LibraryConfig::from_path(path)?.build()
    }

    /// Add or replace a material.
    pub fn insert(&mut self, name: impl Into<String>, material: Material) -> Option<Material> {
        self.materials.insert(name.into(), material)
    }

    /// Look up a material by name.
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Look up a material that must exist.
    pub fn require(&self, name: &str) -> MaterialResult<&Material> {
        self.get(name)
            .ok_or_else(|| MaterialError::UnknownMaterial(name.to_string()))
    }

    /// Sampling settings for the workers using this library.
    pub fn sampling(&self) -> SamplingConfig {
        self.sampling
    }

    /// Get the number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Check if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate over materials in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Material)> {
        self.materials.iter().map(|(name, m)| (name.as_str(), m))
    }

    /// Convert back to the serialized form.
    pub fn to_config(&self) -> LibraryConfig {
        LibraryConfig {
            sampling: self.sampling,
            materials: self
                .materials
                .iter()
                .map(|(name, m)| (name.clone(), MaterialDesc::from(m)))
                .collect(),
        }
    }
}
