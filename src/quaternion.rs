//! Quaternion algebra for the body-to-NED attitude representation.
//!
//! `Quaternion { w, x, y, z }` rotates a vector from body frame to NED via
//! `v_ned = rotate_vector(q, v_body)`. All operations here are total —
//! `normalize` falls back to the identity quaternion instead of dividing by
//! (near) zero, matching the filter's last-resort recovery policy.

use crate::vector3::Vector3;
use micromath::F32Ext;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    pub fn norm(self) -> f32 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit quaternion in the direction of `self`; the identity quaternion
    /// if `|self| < 1e-6`.
    pub fn normalize(self) -> Quaternion {
        let n = self.norm();
        if n < 1e-6 {
            Quaternion::IDENTITY
        } else {
            let inv = n.recip();
            Quaternion::new(self.w * inv, self.x * inv, self.y * inv, self.z * inv)
        }
    }

    pub fn conjugate(self) -> Quaternion {
        Quaternion::new(self.w, -self.x, -self.y, -self.z)
    }

    /// `conjugate(self) / |self|^2`. For a unit quaternion this equals the
    /// conjugate, but `inverse` stays correct for non-unit inputs too.
    pub fn inverse(self) -> Quaternion {
        let n2 = self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z;
        if n2 < 1e-12 {
            return Quaternion::IDENTITY;
        }
        let inv_n2 = n2.recip();
        let c = self.conjugate();
        Quaternion::new(c.w * inv_n2, c.x * inv_n2, c.y * inv_n2, c.z * inv_n2)
    }

    /// Hamilton product `self ⊗ other`. Non-commutative; used as
    /// body-to-world composition `q_world ∘ q_body`.
    pub fn multiply(self, other: Quaternion) -> Quaternion {
        let (a, b) = (self, other);
        Quaternion::new(
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        )
    }

    /// `0.5 · self ⊗ (0, omega)` — the quaternion kinematics equation.
    pub fn derivative(self, omega: Vector3) -> Quaternion {
        let omega_q = Quaternion::new(0.0, omega.x, omega.y, omega.z);
        self.multiply(omega_q).scale(0.5)
    }

    pub fn scale(self, s: f32) -> Quaternion {
        Quaternion::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }

    pub fn add(self, other: Quaternion) -> Quaternion {
        Quaternion::new(self.w + other.w, self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Rotate `v` from body frame to NED: equivalent to
    /// `self ⊗ (0, v) ⊗ self⁻¹`, computed via the direction-cosine-matrix
    /// form of `self` to avoid two quaternion multiplications.
    pub fn rotate_vector(self, v: Vector3) -> Vector3 {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);
        let n12 = w * w;
        let n02 = x * x;
        let n13 = y * y;
        let n03 = z * z;
        Vector3::new(
            v.x * (n12 + n02 - n13 - n03)
                + v.y * (2.0 * (x * y - w * z))
                + v.z * (2.0 * (x * z + w * y)),
            v.x * (2.0 * (x * y + w * z))
                + v.y * (n12 - n02 + n13 - n03)
                + v.z * (2.0 * (y * z - w * x)),
            v.x * (2.0 * (x * z - w * y))
                + v.y * (2.0 * (y * z + w * x))
                + v.z * (n12 - n02 - n13 + n03),
        )
    }

    /// Rotate `v` from NED back to body frame: `rotate_vector(conjugate(self), v)`.
    pub fn rotate_vector_inverse(self, v: Vector3) -> Vector3 {
        self.conjugate().rotate_vector(v)
    }

    /// Build a quaternion from roll/pitch/yaw (radians), ZYX aerospace
    /// convention, then normalize.
    pub fn from_euler(roll: f32, pitch: f32, yaw: f32) -> Quaternion {
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();

        Quaternion::new(
            cr * cp * cy + sr * sp * sy,
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
        )
        .normalize()
    }

    /// Roll/pitch/yaw (radians), ZYX aerospace convention.
    pub fn to_euler(self) -> (f32, f32, f32) {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);

        let sinr_cosp = 2.0 * (w * x + y * z);
        let cosr_cosp = 1.0 - 2.0 * (x * x + y * y);
        let roll = sinr_cosp.atan2(cosr_cosp);

        let sinp = 2.0 * (w * y - z * x);
        let pitch = if sinp.abs() >= 1.0 {
            core::f32::consts::FRAC_PI_2.copysign(sinp)
        } else {
            sinp.asin()
        };

        let siny_cosp = 2.0 * (w * z + x * y);
        let cosy_cosp = 1.0 - 2.0 * (y * y + z * z);
        let yaw = siny_cosp.atan2(cosy_cosp);

        (roll, pitch, yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn multiply_by_inverse_is_identity() {
        let q = Quaternion::new(0.7, 0.1, 0.2, 0.3).normalize();
        let r = q.multiply(q.inverse());
        assert_relative_eq!(r.w, 1.0, epsilon = 1e-5);
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(r.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(r.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn euler_roundtrip() {
        let (r, p, y) = (0.3, -0.4, 1.1);
        let q = Quaternion::from_euler(r, p, y);
        let (r2, p2, y2) = q.to_euler();
        assert_relative_eq!(r, r2, epsilon = 1e-4);
        assert_relative_eq!(p, p2, epsilon = 1e-4);
        assert_relative_eq!(y, y2, epsilon = 1e-4);
    }

    #[test]
    fn identity_rotation_is_noop() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let out = Quaternion::IDENTITY.rotate_vector(v);
        assert_relative_eq!(out.x, v.x, epsilon = 1e-6);
        assert_relative_eq!(out.y, v.y, epsilon = 1e-6);
        assert_relative_eq!(out.z, v.z, epsilon = 1e-6);
    }

    #[test]
    fn rotate_then_inverse_rotate_is_noop() {
        let q = Quaternion::from_euler(0.2, 0.5, -0.7);
        let v = Vector3::new(1.0, -2.0, 0.5);
        let rotated = q.rotate_vector(v);
        let back = q.rotate_vector_inverse(rotated);
        assert_relative_eq!(back.x, v.x, epsilon = 1e-4);
        assert_relative_eq!(back.y, v.y, epsilon = 1e-4);
        assert_relative_eq!(back.z, v.z, epsilon = 1e-4);
    }

    #[test]
    fn normalize_degenerate_is_identity() {
        let q = Quaternion::new(1e-9, 0.0, 0.0, 0.0).normalize();
        assert_eq!(q, Quaternion::IDENTITY);
    }
}
