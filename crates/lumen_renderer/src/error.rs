//! Configuration errors surfaced by the renderer.

use thiserror::Error;

/// Errors that can occur while configuring a render.
///
/// Nothing in the per-sample path returns these; they are raised when a
/// world, camera, texture or target is set up.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown world preset: {0}")]
    UnknownWorld(String),

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: usize, height: usize },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
