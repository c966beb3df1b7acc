//! Instance transforms that wrap an inner hittable.
//!
//! Rays are moved into the inner object's space, tested, and the hit is moved
//! back out. Wrappers own their inner object, so chains cannot form cycles.

use crate::hittable::{HitRecord, Hittable};
use lumen_math::{Interval, Ray, Vec3};

/// Translates an inner hittable by a fixed offset.
pub struct Translate {
    inner: Box<dyn Hittable>,
    offset: Vec3,
}

impl Translate {
    pub fn new(inner: impl Hittable + 'static, offset: Vec3) -> Self {
        Self {
            inner: Box::new(inner),
            offset,
        }
    }
}

impl Hittable for Translate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let moved = Ray::new(ray.origin() - self.offset, ray.direction());
        if !self.inner.hit(&moved, ray_t, rec) {
            return false;
        }

        // Translation leaves normals alone
        rec.p += self.offset;
        true
    }
}

/// Rotates an inner hittable about the Y axis.
pub struct RotateY {
    inner: Box<dyn Hittable>,
    sin_theta: f64,
    cos_theta: f64,
}

impl RotateY {
    pub fn new(inner: impl Hittable + 'static, angle_degrees: f64) -> Self {
        let radians = angle_degrees.to_radians();
        Self {
            inner: Box::new(inner),
            sin_theta: radians.sin(),
            cos_theta: radians.cos(),
        }
    }

    /// Rotate by `-angle` (world to object space).
    #[inline]
    fn to_object(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    /// Rotate by `+angle` (object to world space).
    #[inline]
    fn to_world(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let rotated = Ray::new(self.to_object(ray.origin()), self.to_object(ray.direction()));
        if !self.inner.hit(&rotated, ray_t, rec) {
            return false;
        }

        // The inner normal already faces the rotated ray; rotating both keeps
        // that relation, so front_face carries over unchanged
        rec.p = self.to_world(rec.p);
        rec.normal = self.to_world(rec.normal);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Lambertian, Material};
    use crate::rect::AxisBox;
    use crate::sphere::Sphere;
    use std::sync::Arc;

    const T: Interval = Interval::new(0.01, f64::INFINITY);

    fn mat() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::ONE))
    }

    #[test]
    fn test_translate_moves_hit_point() {
        let sphere = Sphere::new(Vec3::ZERO, 0.5, mat()).unwrap();
        let moved = Translate::new(sphere, Vec3::new(3.0, 0.0, -1.0));
        let ray = Ray::new(Vec3::new(3.0, 0.0, 1.0), Vec3::NEG_Z);

        let mut rec = HitRecord::default();
        assert!(moved.hit(&ray, T, &mut rec));
        assert!((rec.t - 1.5).abs() < 1e-12);
        assert!((rec.p - Vec3::new(3.0, 0.0, -0.5)).length() < 1e-12);
        assert!((rec.normal - Vec3::Z).length() < 1e-12);

        // The original position is now empty
        let old = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        assert!(!moved.hit(&old, T, &mut rec));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        // A thin slab long along X; after 90 degrees about Y it is long along Z
        let slab = AxisBox::new(Vec3::new(-2.0, -0.5, -0.1), Vec3::new(2.0, 0.5, 0.1), mat()).unwrap();
        let rotated = RotateY::new(slab, 90.0);

        let mut rec = HitRecord::default();
        // Would hit the unrotated slab at x = 1.5 but misses after rotation
        let across = Ray::new(Vec3::new(1.5, 0.0, 5.0), Vec3::NEG_Z);
        assert!(!rotated.hit(&across, T, &mut rec));

        // Along +X towards the origin it now meets the face at x = 0.1
        let along = Ray::new(Vec3::new(5.0, 0.0, 1.5), Vec3::NEG_X);
        assert!(rotated.hit(&along, T, &mut rec));
        assert!((rec.p.x - 0.1).abs() < 1e-9);
        assert!((rec.normal - Vec3::X).length() < 1e-9);
        assert!(along.direction().dot(rec.normal) <= 0.0);
    }

    #[test]
    fn test_rotate_preserves_front_face_from_inside() {
        let sphere = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 0.5, mat()).unwrap();
        let rotated = RotateY::new(sphere, 30.0);
        let center = rotated.to_world(Vec3::new(1.0, 0.0, 0.0));
        let ray = Ray::new(center, Vec3::new(0.0, 1.0, 0.0));

        let mut rec = HitRecord::default();
        assert!(rotated.hit(&ray, T, &mut rec));
        assert!(!rec.front_face);
        assert!(ray.direction().dot(rec.normal) <= 0.0);
        assert!((rec.p - (center + Vec3::new(0.0, 0.5, 0.0))).length() < 1e-9);
    }

    #[test]
    fn test_translate_of_rotate_chain() {
        let cube = AxisBox::new(Vec3::ZERO, Vec3::ONE, mat()).unwrap();
        let placed = Translate::new(RotateY::new(cube, 45.0), Vec3::new(10.0, 0.0, 0.0));
        let ray = Ray::new(Vec3::new(10.3, 0.5, 5.0), Vec3::NEG_Z);

        let mut rec = HitRecord::default();
        assert!(placed.hit(&ray, T, &mut rec));
        assert!((rec.p.x - 10.3).abs() < 1e-9);
        assert!(ray.direction().dot(rec.normal) <= 0.0);
    }
}
