//! Per-qubit Bloch state.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;

use blochkit_geom::{POLE_EPSILON, Vec3, is_pole, normalize_pole, to_cartesian, to_spherical};

/// A single qubit as a point on its Bloch sphere.
///
/// `theta` lies in [0, π] and `phi` in [0, 2π). Within the pole epsilon of
/// either pole `phi` is pinned to 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QubitState {
    theta: f64,
    phi: f64,
}

impl QubitState {
    /// The |0⟩ state.
    pub const ZERO: QubitState = QubitState {
        theta: 0.0,
        phi: 0.0,
    };

    /// The |1⟩ state.
    pub const ONE: QubitState = QubitState { theta: PI, phi: 0.0 };

    /// Create a state, bringing the angles into range.
    pub fn new(theta: f64, phi: f64) -> Self {
        Self::with_epsilon(theta, phi, POLE_EPSILON)
    }

    /// Like [`QubitState::new`] with a custom pole epsilon.
    pub fn with_epsilon(theta: f64, phi: f64, epsilon: f64) -> Self {
        let theta = if theta.is_finite() {
            theta.clamp(0.0, PI)
        } else {
            0.0
        };
        let mut phi = if phi.is_finite() { phi.rem_euclid(TAU) } else { 0.0 };
        if phi >= TAU {
            phi = 0.0;
        }
        let (theta, phi) = normalize_pole(theta, phi, epsilon);
        Self { theta, phi }
    }

    /// Create a state from angles in degrees.
    pub fn from_degrees(theta: f64, phi: f64) -> Self {
        Self::new(theta.to_radians(), phi.to_radians())
    }

    /// Project a vector onto the sphere.
    pub fn from_cartesian(v: Vec3) -> Self {
        Self::from_cartesian_with_epsilon(v, POLE_EPSILON)
    }

    /// Like [`QubitState::from_cartesian`] with a custom pole epsilon.
    pub fn from_cartesian_with_epsilon(v: Vec3, epsilon: f64) -> Self {
        let (theta, phi) = to_spherical(v);
        Self::with_epsilon(theta, phi, epsilon)
    }

    /// Colatitude in radians.
    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Azimuth in radians.
    #[inline]
    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn theta_degrees(&self) -> f64 {
        self.theta.to_degrees()
    }

    pub fn phi_degrees(&self) -> f64 {
        self.phi.to_degrees()
    }

    /// Unit Bloch vector.
    #[inline]
    pub fn to_cartesian(&self) -> Vec3 {
        to_cartesian(self.theta, self.phi)
    }

    /// Probability of reading |1⟩, `(1 − cos θ) / 2`.
    #[inline]
    pub fn prob_one(&self) -> f64 {
        (1.0 - self.theta.cos()) / 2.0
    }

    /// Probability of reading |0⟩.
    #[inline]
    pub fn prob_zero(&self) -> f64 {
        1.0 - self.prob_one()
    }

    /// Whether the state sits on a pole.
    pub fn is_pole(&self) -> bool {
        is_pole(self.theta, POLE_EPSILON)
    }

    /// State vector amplitudes `[cos(θ/2), e^{iφ} sin(θ/2)]`.
    pub fn amplitudes(&self) -> [Complex64; 2] {
        let half = self.theta / 2.0;
        [
            Complex64::new(half.cos(), 0.0),
            Complex64::from_polar(half.sin(), self.phi),
        ]
    }

    /// Approximate equality on the Bloch vectors, so that states that
    /// differ only by azimuth wrap-around compare equal.
    pub fn approx_eq(&self, other: &QubitState, tol: f64) -> bool {
        self.to_cartesian().approx_eq(other.to_cartesian(), tol)
    }
}

impl Default for QubitState {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for QubitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "θ {:.1}°, φ {:.1}°",
            self.theta_degrees(),
            self.phi_degrees()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_new_clamps_and_wraps() {
        let s = QubitState::new(4.0, -FRAC_PI_2);
        assert_eq!(s.theta(), PI);
        // Pole: azimuth pinned.
        assert_eq!(s.phi(), 0.0);

        let s = QubitState::new(1.0, -FRAC_PI_2);
        assert!((s.phi() - 3.0 * FRAC_PI_2).abs() < 1e-12);

        let s = QubitState::new(1.0, TAU + 0.5);
        assert!((s.phi() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_input() {
        assert_eq!(QubitState::new(f64::NAN, f64::INFINITY), QubitState::ZERO);
    }

    #[test]
    fn test_pole_normalization() {
        let s = QubitState::new(5e-5, 1.2);
        assert_eq!(s.phi(), 0.0);
        let s = QubitState::new(PI - 5e-5, 1.2);
        assert_eq!(s.phi(), 0.0);
        let s = QubitState::new(1e-3, 1.2);
        assert_eq!(s.phi(), 1.2);
    }

    #[test]
    fn test_probabilities() {
        assert_eq!(QubitState::ZERO.prob_one(), 0.0);
        assert!((QubitState::ONE.prob_one() - 1.0).abs() < 1e-15);
        let plus = QubitState::new(FRAC_PI_2, 0.0);
        assert!((plus.prob_one() - 0.5).abs() < 1e-12);
        assert!((plus.prob_zero() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_amplitudes_are_normalized() {
        let s = QubitState::from_degrees(60.0, 135.0);
        let [a, b] = s.amplitudes();
        assert!((a.norm_sqr() + b.norm_sqr() - 1.0).abs() < 1e-12);
        assert!((b.norm_sqr() - s.prob_one()).abs() < 1e-12);
        assert!((b.arg() - 135_f64.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn test_cartesian_round_trip() {
        let s = QubitState::from_degrees(120.0, 300.0);
        let back = QubitState::from_cartesian(s.to_cartesian());
        assert!((back.theta() - s.theta()).abs() < 1e-9);
        assert!((back.phi() - s.phi()).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            QubitState::from_degrees(90.0, 45.0).to_string(),
            "θ 90.0°, φ 45.0°"
        );
    }
}
