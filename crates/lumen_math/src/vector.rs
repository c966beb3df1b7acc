// Extra vector helpers for ray tracing that glam does not provide.

use crate::Vec3;

/// Extension trait for `Vec3` used by materials and the film.
pub trait Vec3Ext {
    /// Component-wise square root (gamma 2 correction of a linear color).
    fn component_sqrt(self) -> Vec3;

    /// True if every component is within `1e-8` of zero.
    fn near_zero(self) -> bool;
}

impl Vec3Ext for Vec3 {
    fn component_sqrt(self) -> Vec3 {
        Vec3::new(self.x.sqrt(), self.y.sqrt(), self.z.sqrt())
    }

    fn near_zero(self) -> bool {
        const S: f64 = 1e-8;
        self.x.abs() < S && self.y.abs() < S && self.z.abs() < S
    }
}
