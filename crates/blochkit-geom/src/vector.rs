//! Three-component vectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Smallest norm treated as non-zero.
pub const TOLERANCE: f64 = 1e-12;

/// A point in 3D space, usually a Bloch vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component (⟨σx⟩).
    pub x: f64,
    /// Y component (⟨σy⟩).
    pub y: f64,
    /// Z component (⟨σz⟩), +1 at |0⟩ and -1 at |1⟩.
    pub z: f64,
}

impl Vec3 {
    /// Unit X axis.
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    /// Unit Y axis.
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    /// Unit Z axis.
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    /// The origin.
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    /// Create a vector from its components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product `self × other`.
    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }

    /// Scale to unit length.
    ///
    /// A vector shorter than [`TOLERANCE`] has no direction and is returned
    /// unchanged.
    pub fn normalized(self) -> Vec3 {
        let len = self.norm();
        if len < TOLERANCE {
            self
        } else {
            self * (1.0 / len)
        }
    }

    /// Linear interpolation: `(1 - k)·self + k·other`.
    #[inline]
    pub fn lerp(self, other: Vec3, k: f64) -> Vec3 {
        self * (1.0 - k) + other * k
    }

    /// Component-wise comparison within `tol`.
    pub fn approx_eq(self, other: Vec3, tol: f64) -> bool {
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

    fn mul(self, k: f64) -> Vec3 {
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_product_right_handed() {
        assert!(Vec3::X.cross(Vec3::Y).approx_eq(Vec3::Z, 1e-15));
        assert!(Vec3::Y.cross(Vec3::Z).approx_eq(Vec3::X, 1e-15));
        assert!(Vec3::Z.cross(Vec3::X).approx_eq(Vec3::Y, 1e-15));
    }

    #[test]
    fn test_normalized() {
        let v = Vec3::new(1.0, 0.0, 1.0).normalized();
        assert!((v.norm() - 1.0).abs() < 1e-15);
        assert!((v.x - v.z).abs() < 1e-15);

        // Zero vector has no direction and stays put.
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec3::X;
        let b = Vec3::Z;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert!(a.lerp(b, 0.5).approx_eq(Vec3::new(0.5, 0.0, 0.5), 1e-15));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vec3::Z.to_string(), "(0.0000, 0.0000, 1.0000)");
    }
}
