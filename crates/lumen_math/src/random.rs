//! Random sampling helpers.
//!
//! Every helper draws from a caller-supplied generator, so each render
//! thread can own its generator (`rand::thread_rng()`) and tests can use a
//! seeded one.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Uniform `f64` in [0, 1).
#[inline]
pub fn random_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform `f64` in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Vector with each component uniform in [0, 1).
pub fn random_vec(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_f64(rng), random_f64(rng), random_f64(rng))
}

/// Vector with each component uniform in [min, max).
pub fn random_vec_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Point strictly inside the unit sphere, by rejection sampling the cube.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Unit-length vector obtained by normalizing a point in the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        // Normalizing a point at the origin would produce NaNs
        let len_sq = p.length_squared();
        if len_sq > 1e-160 {
            return p / len_sq.sqrt();
        }
    }
}
