//! Scatter statistics for a material library.
//!
//! Fires rays at a flat surface from a spread of incidence angles for every
//! material in a library and reports how often each one absorbs, reflects
//! or transmits. Work is split across rayon workers, each owning its own
//! generator.
//!
//! Usage: cargo run --example scatter_stats [materials.json]

use anyhow::{Context, Result};
use prism_material::{HitRecord, LibraryConfig, Material, MaterialLibrary, Ray, Scatter, Vec3};
use rayon::prelude::*;

const DEFAULT_LIBRARY: &str = include_str!("materials.json");
const WORKERS: usize = 8;
const RAYS_PER_WORKER: u32 = 25_000;

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    absorbed: u32,
    reflected: u32,
    transmitted: u32,
    attenuation: Vec3,
}

impl Tally {
    fn merge(self, other: Tally) -> Tally {
        Tally {
            absorbed: self.absorbed + other.absorbed,
            reflected: self.reflected + other.reflected,
            transmitted: self.transmitted + other.transmitted,
            attenuation: self.attenuation + other.attenuation,
        }
    }

    fn total(&self) -> u32 {
        self.absorbed + self.reflected + self.transmitted
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let library = match std::env::args().nth(1) {
        Some(path) => MaterialLibrary::load(&path)
            .with_context(|| format!("Failed to load material library {}", path))?,
        None => LibraryConfig::from_json_str(DEFAULT_LIBRARY)?.build()?,
    };

    println!("Prism Scatter Statistics");
    println!("========================");
    println!(
        "{} materials, {} workers x {} rays, seed {:?}",
        library.len(),
        WORKERS,
        RAYS_PER_WORKER,
        library.sampling().seed
    );

    let start = std::time::Instant::now();
    for (name, material) in library.iter() {
        let tally = run_material(&library, material);
        let total = tally.total().max(1) as f32;
        let scattered = (tally.reflected + tally.transmitted).max(1) as f32;
        println!(
            "{:>10} ({:<10}) absorbed {:5.1}%  reflected {:5.1}%  transmitted {:5.1}%  mean attenuation {:.3?}",
            name,
            material.kind(),
            100.0 * tally.absorbed as f32 / total,
            100.0 * tally.reflected as f32 / total,
            100.0 * tally.transmitted as f32 / total,
            (tally.attenuation / scattered).to_array(),
        );
    }
    println!("Done in {:?}", start.elapsed());

    Ok(())
}

fn run_material(library: &MaterialLibrary, material: &Material) -> Tally {
    let sampling = library.sampling();
    let rec = HitRecord::new(Vec3::ZERO, Vec3::Y, 1.0);

    (0..WORKERS)
        .into_par_iter()
        .map(|worker| {
            let mut rng = sampling.rng_for_worker(worker);
            let mut tally = Tally::default();

            for i in 0..RAYS_PER_WORKER {
                // Sweep incidence from head-on to grazing, from both sides
                let theta = ((i / 2) % 90) as f32 * std::f32::consts::PI / 180.0;
                let side = if i % 2 == 0 { -1.0 } else { 1.0 };
                let direction = Vec3::new(theta.sin(), side * theta.cos(), 0.0);
                let ray_in = Ray::new(rec.p - direction, direction);

                match material.scatter(&ray_in, &rec, &mut rng) {
                    Some(result) => {
                        let out = result.scattered.direction().dot(rec.normal);
                        if out.signum() == -direction.dot(rec.normal).signum() {
                            tally.reflected += 1;
                        } else {
                            tally.transmitted += 1;
                        }
                        tally.attenuation += result.attenuation;
                    }
                    None => tally.absorbed += 1,
                }
            }

            log::debug!("Worker {} finished {} rays", worker, tally.total());
            tally
        })
        .reduce(Tally::default, Tally::merge)
}
