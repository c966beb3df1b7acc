//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a hard depth cap
//! - Jittered multi-sampling per pixel
//! - Gamma correction for presentation

use crate::hittable::{HitRecord, Hittable};
use crate::material::Color;
use crate::scene::{Scene, World};
use crate::target::RenderTarget;
use lumen_math::random::random_f64;
use lumen_math::{Interval, Ray, Vec3Ext};
use rand::RngCore;

/// Nearest accepted hit distance; keeps bounced rays off their own surface.
pub const T_MIN: f64 = 0.01;

/// Default recursion cap for [`ray_color`].
pub const DEFAULT_MAX_DEPTH: u32 = 50;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Samples added to every pixel of a row per pass
    pub samples_per_pass: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pass: 1,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces until it escapes,
/// is absorbed, or runs out of depth (which contributes black).
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();
    if !scene.hit(ray, Interval::new(T_MIN, f64::INFINITY), &mut rec) {
        return scene.background().color(ray);
    }

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            emission + result.attenuation * ray_color(&result.scattered, scene, depth - 1, rng)
        }
        None => emission,
    }
}

/// Render one scanline, adding `samples_per_pass` jittered samples to every
/// pixel of row `row` (counted from the bottom).
pub fn render_row<T: RenderTarget + ?Sized>(
    target: &T,
    world: &World,
    row: usize,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) {
    let width = target.width();
    let height = target.height();
    if row >= height {
        return;
    }

    // A single column or row maps everything to u = 0 / v = 0
    let u_scale = 1.0 / (width.max(2) - 1) as f64;
    let v_scale = 1.0 / (height.max(2) - 1) as f64;

    for x in 0..width {
        for _ in 0..config.samples_per_pass {
            let u = (x as f64 + random_f64(rng)) * u_scale;
            let v = (row as f64 + random_f64(rng)) * v_scale;
            let ray = world.camera.get_ray(u, v);
            let color = ray_color(&ray, &world.scene, config.max_depth, rng);
            target.add_pixel(x, row, color);
        }
    }
}

/// Apply gamma correction (gamma = 2.0) and clamp to [0, 1].
#[inline]
pub fn linear_to_gamma(linear: Color) -> Color {
    linear.max(Color::ZERO).component_sqrt().min(Color::ONE)
}

/// Convert a linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = linear_to_gamma(color);
    // NaN samples (should never happen) cast to 0
    [
        (255.0 * c.x) as u8,
        (255.0 * c.y) as u8,
        (255.0 * c.z) as u8,
        255,
    ]
}
