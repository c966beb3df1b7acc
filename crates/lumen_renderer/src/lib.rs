//! Lumen - progressive CPU path tracing
//!
//! A Monte Carlo path tracer that accumulates samples into a shared buffer
//! from a pool of row workers, so the image refines continuously while the
//! camera, world or resolution can change between passes.

mod camera;
mod error;
mod hittable;
mod material;
pub mod presets;
mod rect;
mod renderer;
mod scene;
mod scheduler;
mod sphere;
mod target;
mod texture;
mod transform;

pub use camera::{Camera, MoveAxis};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    reflect, refract, Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterResult,
};
pub use rect::{AxisBox, AxisRect, Plane};
pub use renderer::{
    color_to_rgba, linear_to_gamma, ray_color, render_row, RenderConfig, DEFAULT_MAX_DEPTH, T_MIN,
};
pub use scene::{Background, Scene, World};
pub use scheduler::{ProgressiveRenderer, SchedulerConfig};
pub use sphere::Sphere;
pub use target::{AccumulationBuffer, PixelData, RenderTarget};
pub use texture::{CheckerTexture, ImageTexture, SolidColor, Texture};
pub use transform::{RotateY, Translate};

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};
