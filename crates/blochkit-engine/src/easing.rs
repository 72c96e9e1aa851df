//! Animation time curves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Maps linear time progress in [0, 1] to eased progress in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Accelerate then decelerate: cubic Bézier (0.42, 0, 0.58, 1).
    #[default]
    EaseInOut,
}

const EASE_IN_OUT: (f64, f64, f64, f64) = (0.42, 0.0, 0.58, 1.0);

impl Easing {
    /// Eased progress at time fraction `t`. Endpoints are exact.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                let (x1, y1, x2, y2) = EASE_IN_OUT;
                cubic_bezier(x1, y1, x2, y2, t)
            }
        }
    }
}

impl FromStr for Easing {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Easing::Linear),
            "ease-in-out" | "easeinout" | "ease" => Ok(Easing::EaseInOut),
            _ => Err(EngineError::Config(format!("unknown easing: {s}"))),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::EaseInOut => write!(f, "ease-in-out"),
        }
    }
}

/// One coordinate of a cubic Bézier with endpoints 0 and 1.
#[inline]
fn bezier(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

/// Solve the curve for `x` and return its `y`.
///
/// Newton's method first, bisection if Newton stalls on a flat slope.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    const PRECISION: f64 = 1e-7;

    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let mut t = x;
    for _ in 0..8 {
        let err = bezier(t, x1, x2) - x;
        if err.abs() < PRECISION {
            return bezier(t, y1, y2);
        }
        let slope = bezier_slope(t, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        t = (t - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..64 {
        let value = bezier(t, x1, x2);
        if (value - x).abs() < PRECISION {
            break;
        }
        if value < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    bezier(t, y1, y2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_exact() {
        for easing in [Easing::Linear, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-0.5), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn test_ease_in_out_shape() {
        let e = Easing::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        // Slow start, slow finish.
        assert!(e.apply(0.1) < 0.1);
        assert!(e.apply(0.9) > 0.9);
        // Symmetric about the midpoint.
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_monotonic() {
        let e = Easing::EaseInOut;
        let mut prev = 0.0;
        for i in 1..=200 {
            let y = e.apply(f64::from(i) / 200.0);
            assert!(y >= prev - 1e-9, "not monotonic at step {i}");
            prev = y;
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("Linear".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!("ease-in-out".parse::<Easing>().unwrap(), Easing::EaseInOut);
        assert!("bounce".parse::<Easing>().is_err());
    }
}
