//! Double-precision math for the lumen ray tracer.
//!
//! `Vec3` is glam's `DVec3`; it serves as point, direction and linear RGB color.

// Re-export glam for convenience
pub use glam::*;

/// The vector type used throughout the tracer.
pub type Vec3 = DVec3;

mod interval;
mod ray;
pub mod random;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::Vec3Ext;
