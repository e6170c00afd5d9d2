//! Extended Kalman Filter for strapdown inertial navigation.
//!
//! Fuses a body-frame IMU (gyro + accelerometer) with GPS, barometric
//! altitude, and magnetometer measurements into a 16-state NED navigation
//! solution: position, velocity, attitude quaternion, and gyro/accel
//! biases. See [`ekf::Ekf`] for the filter itself.
//!
//! `no_std` by default; enable the `std` feature for host builds (tests,
//! tooling). Enable `defmt` to route internal degraded-state warnings
//! through [`defmt`] instead of compiling them out.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod ekf;
pub mod mag_field;
pub mod matrix;
pub mod quaternion;
pub mod status;
pub mod vector3;

pub use ekf::Ekf;
pub use matrix::Matrix;
pub use quaternion::Quaternion;
pub use status::Status;
pub use vector3::Vector3;
