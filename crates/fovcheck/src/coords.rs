//! Cone/clock angles and unit vectors.
//!
//! Conventions
//! - Cone ∈ [0, π] is the angular distance from +Z.
//! - Clock ∈ [0, 2π) is the azimuth about +Z, measured from +X toward +Y.
//! - In a polygon's query frame the clock angle is called longitude and
//!   `π/2 − cone` latitude.
//! - A vector on the Z axis (x = y = 0) has clock 0.

use nalgebra::{Matrix3, Vector3};
use std::f64::consts::{FRAC_PI_2, TAU};

/// A direction given as (cone, clock) angles in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConeClock {
    pub cone: f64,
    pub clock: f64,
}

impl ConeClock {
    #[inline]
    pub fn new(cone: f64, clock: f64) -> Self {
        Self { cone, clock }
    }
    #[inline]
    pub fn from_degrees(cone: f64, clock: f64) -> Self {
        Self::new(cone.to_radians(), clock.to_radians())
    }
    #[inline]
    pub fn to_unit(self) -> Vector3<f64> {
        spherical_to_cartesian(self.cone, self.clock)
    }
    #[inline]
    pub fn from_unit(v: &Vector3<f64>) -> Self {
        let (cone, clock) = cartesian_to_spherical(v);
        Self { cone, clock }
    }
}

impl From<ConeClock> for Vector3<f64> {
    #[inline]
    fn from(a: ConeClock) -> Self {
        a.to_unit()
    }
}

/// Unit vector for the given cone and clock angles.
#[inline]
pub fn spherical_to_cartesian(cone: f64, clock: f64) -> Vector3<f64> {
    let (s_cone, c_cone) = cone.sin_cos();
    let (s_clock, c_clock) = clock.sin_cos();
    Vector3::new(s_cone * c_clock, s_cone * s_clock, c_cone)
}

/// (cone, clock) of `v`; `v` need not be normalized. The zero vector maps to (0, 0).
pub fn cartesian_to_spherical(v: &Vector3<f64>) -> (f64, f64) {
    let r = v.norm();
    let cone = if r > 0.0 {
        (v.z / r).clamp(-1.0, 1.0).acos()
    } else {
        0.0
    };
    (cone, clock_of(v))
}

/// Clock angle of `v` in [0, 2π).
#[inline]
pub fn clock_of(v: &Vector3<f64>) -> f64 {
    if v.x == 0.0 && v.y == 0.0 {
        return 0.0;
    }
    wrap_clock(v.y.atan2(v.x))
}

/// Latitude `π/2 − cone` of `v`.
#[inline]
pub fn latitude_of(v: &Vector3<f64>) -> f64 {
    FRAC_PI_2 - cartesian_to_spherical(v).0
}

/// Wrap an angle into [0, 2π).
///
/// Values that round to exactly 2π after wrapping map to 0, and −0 maps to +0.
#[inline]
pub fn wrap_clock(a: f64) -> f64 {
    if !a.is_finite() {
        return a;
    }
    if a == 0.0 {
        return 0.0;
    }
    let mut x = a;
    while x < 0.0 {
        x += TAU;
    }
    while x >= TAU {
        x -= TAU;
    }
    x
}

/// Apply rotation `m` to direction `v`.
#[inline]
pub fn rotate(v: &Vector3<f64>, m: &Matrix3<f64>) -> Vector3<f64> {
    m * v
}
