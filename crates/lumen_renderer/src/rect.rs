//! Axis-aligned rectangles and the box built from them.

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::material::Material;
use crate::{RenderError, RenderResult};
use lumen_math::{Interval, Ray, Vec3};
use std::sync::Arc;

/// The plane an [`AxisRect`] lies in, named by its two free axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Xy,
    Xz,
    Yz,
}

impl Plane {
    /// Indices of the (first free, second free, fixed) axes.
    #[inline]
    fn axes(self) -> (usize, usize, usize) {
        match self {
            Plane::Xy => (0, 1, 2),
            Plane::Xz => (0, 2, 1),
            Plane::Yz => (1, 2, 0),
        }
    }

    /// Unit vector along the fixed axis.
    #[inline]
    fn normal(self) -> Vec3 {
        match self {
            Plane::Xy => Vec3::Z,
            Plane::Xz => Vec3::Y,
            Plane::Yz => Vec3::X,
        }
    }
}

/// A rectangle perpendicular to one coordinate axis.
///
/// Spans `a0..a1` and `b0..b1` on the two free axes at coordinate `k` on the
/// fixed axis.
pub struct AxisRect {
    plane: Plane,
    a0: f64,
    a1: f64,
    b0: f64,
    b1: f64,
    k: f64,
    material: Arc<dyn Material>,
}

impl AxisRect {
    pub fn new(
        plane: Plane,
        (a0, a1): (f64, f64),
        (b0, b1): (f64, f64),
        k: f64,
        material: Arc<dyn Material>,
    ) -> RenderResult<Self> {
        if !(a0 < a1 && b0 < b1) {
            return Err(RenderError::InvalidGeometry(format!(
                "{:?} rectangle bounds must satisfy min < max, got ({}, {}) x ({}, {})",
                plane, a0, a1, b0, b1
            )));
        }

        Ok(Self {
            plane,
            a0,
            a1,
            b0,
            b1,
            k,
            material,
        })
    }

    /// Rectangle in the XY plane at `z = k`.
    pub fn xy(x: (f64, f64), y: (f64, f64), k: f64, material: Arc<dyn Material>) -> RenderResult<Self> {
        Self::new(Plane::Xy, x, y, k, material)
    }

    /// Rectangle in the XZ plane at `y = k`.
    pub fn xz(x: (f64, f64), z: (f64, f64), k: f64, material: Arc<dyn Material>) -> RenderResult<Self> {
        Self::new(Plane::Xz, x, z, k, material)
    }

    /// Rectangle in the YZ plane at `x = k`.
    pub fn yz(y: (f64, f64), z: (f64, f64), k: f64, material: Arc<dyn Material>) -> RenderResult<Self> {
        Self::new(Plane::Yz, y, z, k, material)
    }
}

impl Hittable for AxisRect {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let (ia, ib, ik) = self.plane.axes();
        let origin = ray.origin();
        let direction = ray.direction();

        // A zero direction component yields inf or NaN, both rejected here
        let t = (self.k - origin[ik]) / direction[ik];
        if !ray_t.contains(t) {
            return false;
        }

        let a = origin[ia] + t * direction[ia];
        let b = origin[ib] + t * direction[ib];
        if a < self.a0 || a > self.a1 || b < self.b0 || b > self.b1 {
            return false;
        }

        rec.u = (a - self.a0) / (self.a1 - self.a0);
        rec.v = (b - self.b0) / (self.b1 - self.b0);
        rec.t = t;
        rec.set_face_normal(ray, self.plane.normal());
        rec.material = self.material.as_ref();
        rec.p = ray.at(t);

        true
    }
}

/// An axis-aligned box made of six rectangles.
pub struct AxisBox {
    sides: HittableList,
}

impl AxisBox {
    /// Box spanning the two corner points `p0` (min) and `p1` (max).
    pub fn new(p0: Vec3, p1: Vec3, material: Arc<dyn Material>) -> RenderResult<Self> {
        let sides = HittableList::new()
            .with(AxisRect::xy((p0.x, p1.x), (p0.y, p1.y), p1.z, material.clone())?)
            .with(AxisRect::xy((p0.x, p1.x), (p0.y, p1.y), p0.z, material.clone())?)
            .with(AxisRect::xz((p0.x, p1.x), (p0.z, p1.z), p1.y, material.clone())?)
            .with(AxisRect::xz((p0.x, p1.x), (p0.z, p1.z), p0.y, material.clone())?)
            .with(AxisRect::yz((p0.y, p1.y), (p0.z, p1.z), p1.x, material.clone())?)
            .with(AxisRect::yz((p0.y, p1.y), (p0.z, p1.z), p0.x, material)?);

        Ok(Self { sides })
    }
}

impl Hittable for AxisBox {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.sides.hit(ray, ray_t, rec)
    }
}
