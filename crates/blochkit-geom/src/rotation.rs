//! Axis-angle rotation of Bloch vectors.
//!
//! Every gate in the catalog reduces to "rotate this vector about that axis
//! by that angle". [`rotate`] is the general Rodrigues formula:
//!
//!   v' = v·cos α + (n × v)·sin α + n·(n·v)·(1 − cos α)
//!
//! with `n` the normalized axis. The X/Y/Z specializations are the same
//! formula with `n` fixed, written out as a 2-row rotation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vector::{TOLERANCE, Vec3};

/// Rotate `v` about an arbitrary `axis` by `angle` radians (right-handed).
///
/// The axis need not be unit length. A zero-length axis has no direction and
/// leaves `v` unchanged.
pub fn rotate(v: Vec3, axis: Vec3, angle: f64) -> Vec3 {
    let len = axis.norm();
    if len < TOLERANCE {
        return v;
    }
    let n = axis * (1.0 / len);
    let (sa, ca) = angle.sin_cos();
    v * ca + n.cross(v) * sa + n * (n.dot(v) * (1.0 - ca))
}

/// Rotate `v` about +X by `angle` radians.
#[inline]
pub fn rotate_x(v: Vec3, angle: f64) -> Vec3 {
    let (sa, ca) = angle.sin_cos();
    Vec3::new(v.x, v.y * ca - v.z * sa, v.y * sa + v.z * ca)
}

/// Rotate `v` about +Y by `angle` radians.
#[inline]
pub fn rotate_y(v: Vec3, angle: f64) -> Vec3 {
    let (sa, ca) = angle.sin_cos();
    Vec3::new(v.x * ca + v.z * sa, v.y, -v.x * sa + v.z * ca)
}

/// Rotate `v` about +Z by `angle` radians.
#[inline]
pub fn rotate_z(v: Vec3, angle: f64) -> Vec3 {
    let (sa, ca) = angle.sin_cos();
    Vec3::new(v.x * ca - v.y * sa, v.x * sa + v.y * ca, v.z)
}

/// A rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The +X axis.
    X,
    /// The +Y axis.
    Y,
    /// The +Z axis.
    Z,
    /// Any other direction, not necessarily unit length.
    Arbitrary(Vec3),
}

impl Axis {
    /// Rotate `v` about this axis, using the closed form for X/Y/Z.
    #[inline]
    pub fn rotate(self, v: Vec3, angle: f64) -> Vec3 {
        match self {
            Axis::X => rotate_x(v, angle),
            Axis::Y => rotate_y(v, angle),
            Axis::Z => rotate_z(v, angle),
            Axis::Arbitrary(axis) => rotate(v, axis, angle),
        }
    }

    /// The axis direction as a vector (unnormalized for `Arbitrary`).
    pub fn vector(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
            Axis::Arbitrary(axis) => axis,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
            Axis::Arbitrary(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-12;

    #[test]
    fn test_quarter_turns() {
        assert!(rotate_x(Vec3::Z, FRAC_PI_2).approx_eq(-Vec3::Y, TOL));
        assert!(rotate_y(Vec3::Z, FRAC_PI_2).approx_eq(Vec3::X, TOL));
        assert!(rotate_z(Vec3::X, FRAC_PI_2).approx_eq(Vec3::Y, TOL));
    }

    #[test]
    fn test_specializations_match_rodrigues() {
        let v = Vec3::new(0.3, -0.5, 0.81).normalized();
        for &angle in &[0.0, 0.4, FRAC_PI_2, PI, -2.2, 7.0] {
            assert!(rotate_x(v, angle).approx_eq(rotate(v, Vec3::X, angle), TOL));
            assert!(rotate_y(v, angle).approx_eq(rotate(v, Vec3::Y, angle), TOL));
            assert!(rotate_z(v, angle).approx_eq(rotate(v, Vec3::Z, angle), TOL));
        }
    }

    #[test]
    fn test_hadamard_axis_swaps_z_and_x() {
        let axis = Axis::Arbitrary(Vec3::new(1.0, 0.0, 1.0));
        assert!(axis.rotate(Vec3::Z, PI).approx_eq(Vec3::X, TOL));
        assert!(axis.rotate(Vec3::X, PI).approx_eq(Vec3::Z, TOL));
        assert!(axis.rotate(-Vec3::Z, PI).approx_eq(-Vec3::X, TOL));
    }

    #[test]
    fn test_unnormalized_axis_is_normalized() {
        let v = Vec3::new(0.0, 0.6, 0.8);
        let a = rotate(v, Vec3::new(0.0, 0.0, 5.0), 1.1);
        let b = rotate_z(v, 1.1);
        assert!(a.approx_eq(b, TOL));
    }

    #[test]
    fn test_zero_axis_is_identity() {
        let v = Vec3::new(0.6, 0.0, 0.8);
        assert_eq!(rotate(v, Vec3::ZERO, 1.0), v);
    }

    #[test]
    fn test_axis_display() {
        assert_eq!(Axis::X.to_string(), "x");
        assert_eq!(Axis::Arbitrary(Vec3::new(1.0, 0.0, 1.0)).to_string(), "(1, 0, 1)");
    }
}
