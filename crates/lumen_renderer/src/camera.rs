//! Camera for ray generation.

use crate::{RenderError, RenderResult};
use lumen_math::{Ray, Vec3, Vec3Ext};

/// World up used to build the camera basis.
const WORLD_UP: Vec3 = Vec3::Y;

/// Basis axis for [`Camera::move_along`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAxis {
    LeftRight,
    UpDown,
    ForwardBack,
}

/// Pinhole camera mapping viewport coordinates `(u, v)` in [0, 1] to rays.
///
/// `(0, 0)` is the lower-left corner of the viewport. With the default 90°
/// field of view and focal length 1 the viewport is 2 units tall.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,

    vfov: f64, // Vertical field of view in degrees
    focal_length: f64,

    width: usize,
    height: usize,
    aspect: f64,

    // Cached viewport (rebuilt whenever any of the above changes)
    horizontal: Vec3,
    vertical: Vec3,
    lower_left: Vec3,
}

impl Camera {
    /// Create a camera at `position` looking along `forward`.
    ///
    /// `forward` must be non-zero and not parallel to the world up axis.
    pub fn new(position: Vec3, forward: Vec3) -> RenderResult<Self> {
        let mut camera = Self {
            position,
            forward: Vec3::NEG_Z,
            right: Vec3::NEG_X,
            up: Vec3::Y,
            vfov: 90.0,
            focal_length: 1.0,
            width: 1,
            height: 1,
            aspect: 1.0,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            lower_left: Vec3::ZERO,
        };

        if !camera.set_forward(forward) {
            return Err(RenderError::InvalidGeometry(format!(
                "camera forward {} is zero or parallel to world up",
                forward
            )));
        }
        Ok(camera)
    }

    /// Set the vertical field of view in degrees.
    pub fn with_vfov(mut self, vfov: f64) -> Self {
        self.vfov = vfov;
        self.update_viewport();
        self
    }

    /// Set the resolution the camera renders at; recomputes the aspect ratio.
    pub fn with_resolution(mut self, width: usize, height: usize) -> RenderResult<Self> {
        self.set_resolution(width, height)?;
        Ok(self)
    }

    /// Update the resolution. Fails on a zero dimension.
    pub fn set_resolution(&mut self, width: usize, height: usize) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.aspect = width as f64 / height as f64;
            self.update_viewport();
        }
        Ok(())
    }

    /// Replace the view direction and rebuild the basis.
    ///
    /// Returns false and leaves the camera unchanged when `forward` is
    /// degenerate.
    fn set_forward(&mut self, forward: Vec3) -> bool {
        let forward = forward.normalize_or_zero();
        let right = WORLD_UP.cross(forward);
        if forward == Vec3::ZERO || right.near_zero() {
            return false;
        }

        self.forward = forward;
        self.right = right.normalize();
        self.up = forward.cross(self.right).normalize();
        self.update_viewport();
        true
    }

    fn update_viewport(&mut self) {
        let viewport_height = 2.0 * (self.vfov.to_radians() / 2.0).tan() * self.focal_length;
        let viewport_width = viewport_height * self.aspect;

        self.horizontal = self.right * viewport_width;
        self.vertical = self.up * viewport_height;
        self.lower_left = self.position - self.horizontal / 2.0 - self.vertical / 2.0
            + self.forward * self.focal_length;
    }

    /// Re-aim the camera by a drag delta in viewport fractions.
    ///
    /// Returns false if the new direction would be degenerate, in which case
    /// the camera is left unchanged.
    pub fn aim(&mut self, dx: f64, dy: f64) -> bool {
        let forward = self.forward - (dx * self.right - dy * self.up);
        self.set_forward(forward)
    }

    /// Move the camera along one of its basis axes.
    pub fn move_along(&mut self, amount: f64, axis: MoveAxis) {
        let direction = match axis {
            MoveAxis::LeftRight => self.right,
            MoveAxis::UpDown => self.up,
            MoveAxis::ForwardBack => self.forward,
        };
        self.position += direction * amount;
        self.update_viewport();
    }

    /// Ray from the camera through viewport coordinate `(u, v)`.
    pub fn get_ray(&self, u: f64, v: f64) -> Ray {
        Ray::new(
            self.position,
            self.lower_left + u * self.horizontal + v * self.vertical - self.position,
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}
