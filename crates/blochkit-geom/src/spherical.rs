//! Spherical/Cartesian conversion on the unit sphere.
//!
//! Uses the physics convention: `θ` is the colatitude measured from +Z
//! (θ = 0 is |0⟩, θ = π is |1⟩) and `φ` is the azimuth measured from +X
//! towards +Y.

use std::f64::consts::{PI, TAU};

use crate::vector::{TOLERANCE, Vec3};

/// Distance from a pole within which the azimuth is treated as undefined.
pub const POLE_EPSILON: f64 = 1e-4;

/// Convert `(θ, φ)` to a unit vector.
#[inline]
pub fn to_cartesian(theta: f64, phi: f64) -> Vec3 {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    Vec3::new(sin_t * cos_p, sin_t * sin_p, cos_t)
}

/// Convert a vector to `(θ, φ)`.
///
/// `θ = acos(z / r)` with `r` floored at [`TOLERANCE`] and the ratio clamped
/// into [-1, 1], `φ = atan2(y, x)` shifted into [0, 2π). The pole rule is not
/// applied here; see [`normalize_pole`].
pub fn to_spherical(v: Vec3) -> (f64, f64) {
    let r = v.norm().max(TOLERANCE);
    let theta = (v.z / r).clamp(-1.0, 1.0).acos();
    let mut phi = v.y.atan2(v.x);
    if phi < 0.0 {
        phi += TAU;
    }
    // A tiny negative azimuth rounds up to exactly 2π.
    if phi >= TAU {
        phi -= TAU;
    }
    (theta, phi)
}

/// Whether `theta` sits within `epsilon` of either pole.
#[inline]
pub fn is_pole(theta: f64, epsilon: f64) -> bool {
    theta.abs() < epsilon || (theta - PI).abs() < epsilon
}

/// Force `φ = 0` at the poles, where the azimuth is undefined.
#[inline]
pub fn normalize_pole(theta: f64, phi: f64, epsilon: f64) -> (f64, f64) {
    if is_pole(theta, epsilon) {
        (theta, 0.0)
    } else {
        (theta, phi)
    }
}
