//! 3-vector arithmetic shared by the process model, the measurement models,
//! and the magnetic field initializer.

use micromath::F32Ext;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn add(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, s: f32) -> Vector3 {
        Vector3::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn dot(self, other: Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn norm(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the direction of `self`. Returns `Vector3::ZERO` when
    /// the norm is below `1e-6` rather than dividing by (near) zero.
    pub fn normalize(self) -> Vector3 {
        let n = self.norm();
        if n < 1e-6 {
            Vector3::ZERO
        } else {
            self.scale(n.recip())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cross_product_is_orthogonal() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert_relative_eq!(c.dot(a), 0.0, epsilon = 1e-6);
        assert_relative_eq!(c.dot(b), 0.0, epsilon = 1e-6);
        assert_relative_eq!(c.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn normalize_degenerate_is_zero() {
        let v = Vector3::new(1e-9, 0.0, 0.0).normalize();
        assert_eq!(v, Vector3::ZERO);
    }

    #[test]
    fn normalize_unit_norm() {
        let v = Vector3::new(3.0, 4.0, 0.0).normalize();
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-6);
    }
}
