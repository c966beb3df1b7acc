//! Renderable worlds: a named collection of hittables plus a background.

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::material::Color;
use crate::Camera;
use lumen_math::{Interval, Ray};
use std::sync::Arc;

/// What a ray sees when it escapes the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// A constant color (black for scenes lit only by emitters).
    Solid(Color),
    /// Vertical gradient from white (looking down) to light blue (looking up).
    Sky,
}

impl Background {
    /// Color for a ray that hit nothing.
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Solid(color) => *color,
            Background::Sky => {
                let unit_direction = ray.direction().normalize();
                let a = 0.5 * (unit_direction.y + 1.0);
                let white = Color::new(1.0, 1.0, 1.0);
                let blue = Color::new(0.5, 0.7, 1.0);
                white * (1.0 - a) + blue * a
            }
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::ZERO)
    }
}

/// A named, immutable scene.
pub struct Scene {
    name: String,
    objects: HittableList,
    background: Background,
}

impl Scene {
    pub fn new(name: impl Into<String>, objects: HittableList, background: Background) -> Self {
        Self {
            name: name.into(),
            objects,
            background,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.objects.hit(ray, ray_t, rec)
    }
}

/// A scene paired with the camera that views it.
///
/// Cloning is cheap: the scene is shared, the camera is copied.
#[derive(Clone)]
pub struct World {
    pub scene: Arc<Scene>,
    pub camera: Camera,
}

impl World {
    pub fn new(scene: Scene, camera: Camera) -> Self {
        Self {
            scene: Arc::new(scene),
            camera,
        }
    }

    pub fn name(&self) -> &str {
        self.scene.name()
    }
}
