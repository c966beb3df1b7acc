//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;
use crate::{RenderError, RenderResult};
use lumen_math::{Interval, Ray, Vec3};
use std::f64::consts::PI;
use std::sync::Arc;

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Vec3, radius: f64, material: Arc<dyn Material>) -> RenderResult<Self> {
        if !(radius > 0.0) {
            return Err(RenderError::InvalidGeometry(format!(
                "sphere radius must be positive, got {}",
                radius
            )));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f64, f64) {
        // theta: angle down from +Y
        // phi: angle around Y axis from -X
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = Self::get_sphere_uv(outward_normal);
        rec.material = self.material.as_ref();

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn unit_sphere_at(center: Vec3, radius: f64) -> Sphere {
        Sphere::new(center, radius, Arc::new(Lambertian::new(Vec3::splat(0.5)))).unwrap()
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(0.01, f64::INFINITY), &mut rec));
        assert!((rec.t - 0.5).abs() < 1e-12);
        assert!((rec.p - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-12);
        assert!((rec.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, Interval::new(0.01, f64::INFINITY), &mut rec));
    }

    #[test]
    fn test_sphere_far_root_from_inside() {
        let sphere = unit_sphere_at(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(0.01, f64::INFINITY), &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!(!rec.front_face);
        // Normal flipped to face the ray
        assert!((rec.normal + Vec3::X).length() < 1e-12);
    }

    #[test]
    fn test_sphere_respects_interval() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let mut rec = HitRecord::default();
        // Both roots (0.5 and 1.5) beyond t_max
        assert!(!sphere.hit(&ray, Interval::new(0.01, 0.4), &mut rec));
        // Near root excluded, far root accepted
        assert!(sphere.hit(&ray, Interval::new(0.6, 10.0), &mut rec));
        assert!((rec.t - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_uv() {
        let (u, v) = Sphere::get_sphere_uv(Vec3::new(1.0, 0.0, 0.0));
        assert!((u - 0.5).abs() < 1e-12 && (v - 0.5).abs() < 1e-12);

        let (_, v) = Sphere::get_sphere_uv(Vec3::new(0.0, 1.0, 0.0));
        assert!((v - 1.0).abs() < 1e-12);

        let (_, v) = Sphere::get_sphere_uv(Vec3::new(0.0, -1.0, 0.0));
        assert!(v.abs() < 1e-12);

        let (u, _) = Sphere::get_sphere_uv(Vec3::new(0.0, 0.0, 1.0));
        assert!((u - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_rejects_bad_radius() {
        let mat: Arc<dyn Material> = Arc::new(Lambertian::new(Vec3::ONE));
        assert!(Sphere::new(Vec3::ZERO, 0.0, mat.clone()).is_err());
        assert!(Sphere::new(Vec3::ZERO, -1.0, mat).is_err());
    }
}
