//! Magnetic field initializer: turn static magnetometer+accelerometer
//! samples into a unit-norm NED earth-field reference for the
//! magnetometer update's measurement model.

use crate::ekf::EARTH_MAG_NED_DEFAULT;
use crate::vector3::Vector3;

/// Average co-captured `mag_samples`/`accel_samples` taken at rest, build a
/// local NED frame from gravity (Down = -mean accel) and an arbitrary body
/// Y-axis reference, then project the mean field onto that frame.
///
/// Falls back to [`EARTH_MAG_NED_DEFAULT`] on an empty or mismatched sample
/// set, or if the accelerometer samples are too small/degenerate to fix
/// Down (e.g. free-fall, or a body Y-axis parallel to gravity).
pub fn estimate(mag_samples: &[Vector3], accel_samples: &[Vector3]) -> Vector3 {
    if mag_samples.is_empty() || accel_samples.len() != mag_samples.len() {
        return EARTH_MAG_NED_DEFAULT;
    }

    let n = mag_samples.len() as f32;
    let mut mag_sum = Vector3::ZERO;
    let mut accel_sum = Vector3::ZERO;
    for i in 0..mag_samples.len() {
        mag_sum = mag_sum.add(mag_samples[i]);
        accel_sum = accel_sum.add(accel_samples[i]);
    }
    let mean_mag = mag_sum.scale(1.0 / n);
    let mean_accel = accel_sum.scale(1.0 / n);

    let down = mean_accel.scale(-1.0).normalize();
    if down == Vector3::ZERO {
        return EARTH_MAG_NED_DEFAULT;
    }

    let body_y = Vector3::new(0.0, 1.0, 0.0);
    let east = down.cross(body_y).normalize();
    if east == Vector3::ZERO {
        return EARTH_MAG_NED_DEFAULT;
    }
    let north = east.cross(down).normalize();
    if north == Vector3::ZERO {
        return EARTH_MAG_NED_DEFAULT;
    }
    // Re-orthogonalize East against the now-settled North/Down pair.
    let east = north.cross(down).normalize();
    if east == Vector3::ZERO {
        return EARTH_MAG_NED_DEFAULT;
    }

    let field_ned = Vector3::new(north.dot(mean_mag), east.dot(mean_mag), down.dot(mean_mag));
    let unit = field_ned.normalize();
    if unit == Vector3::ZERO {
        return EARTH_MAG_NED_DEFAULT;
    }
    unit
}
