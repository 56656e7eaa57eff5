//! Random sampling for scattering.
//!
//! Every function takes the caller's generator. A worker creates one
//! generator when it starts (see [`worker_rng`]) and reuses it for every
//! scatter call it makes; nothing here seeds or owns a generator.

use prism_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Rejection-sampling attempts above which a draw is logged as anomalous.
///
/// The acceptance rate is pi/6, so more than 32 rejections in a row has a
/// probability below 1e-10.
pub const MAX_EXPECTED_ATTEMPTS: u32 = 32;

/// Odd constant used to spread worker indices across the seed space.
const WORKER_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Generate a random f32 in [0.0, 1.0).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Generate a random point strictly inside the unit ball.
///
/// Draws candidates uniformly from the cube [-1, 1)^3 and keeps the first
/// one with squared length below 1, so the result is uniform over the ball.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    random_in_unit_sphere_with_attempts(rng).0
}

/// Like [`random_in_unit_sphere`], also returning how many candidates were drawn.
pub fn random_in_unit_sphere_with_attempts(rng: &mut dyn RngCore) -> (Vec3, u32) {
    let mut attempts = 0;
    loop {
        attempts += 1;
        let p = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if p.length_squared() < 1.0 {
            if attempts > MAX_EXPECTED_ATTEMPTS {
                log::warn!(
                    "Unit sphere rejection sampling needed {} attempts (expected < {})",
                    attempts,
                    MAX_EXPECTED_ATTEMPTS
                );
            }
            return (p, attempts);
        }
    }
}

/// Create the generator for one worker.
///
/// The same `(seed, worker)` pair always yields the same stream, and
/// different workers under one seed get unrelated streams.
pub fn worker_rng(seed: u64, worker: u64) -> StdRng {
    let worker_seed = seed ^ worker.wrapping_add(1).wrapping_mul(WORKER_SEED_MIX);
    log::trace!("Seeding worker {} with {:#018x}", worker, worker_seed);
    StdRng::seed_from_u64(worker_seed)
}

/// Create a generator seeded from OS entropy.
pub fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}
