//! Double-precision 3-component vector used for positions.
//!
//! Positions are Cartesian meters. The crate owns this small type rather
//! than pulling in a linear-algebra dependency; the only operations the
//! interpolation path needs are add, sub, and scalar multiply.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A position (or displacement) in Cartesian coordinates, meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise approximate equality, absolute tolerance.
    ///
    /// Interpolated results accumulate one multiply and one add of rounding
    /// error per component, so exact comparison is too strict for tests.
    pub fn approx_eq(&self, other: &Vec3, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol
            && (self.y - other.y).abs() <= tol
            && (self.z - other.z).abs() <= tol
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
