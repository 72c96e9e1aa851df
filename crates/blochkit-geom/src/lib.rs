//! Blochkit Geometry
//!
//! Pure geometry underneath the Bloch-sphere engine. Nothing in this crate
//! holds state; every function maps numbers to numbers.
//!
//! # Core Components
//!
//! - **Vectors**: [`Vec3`] for points on (or near) the unit sphere
//! - **Coordinates**: [`to_cartesian`] / [`to_spherical`] convert between
//!   `(θ, φ)` and `(x, y, z)` using the physics convention
//! - **Rotations**: [`rotate`] implements Rodrigues' formula for an arbitrary
//!   axis, [`rotate_x`], [`rotate_y`], [`rotate_z`] are closed-form
//!   specializations, and [`Axis`] picks between them
//!
//! # Example: Hadamard on |0⟩
//!
//! ```rust
//! use blochkit_geom::{Axis, Vec3, to_cartesian, to_spherical};
//! use std::f64::consts::PI;
//!
//! let zero = to_cartesian(0.0, 0.0);
//! let plus = Axis::Arbitrary(Vec3::new(1.0, 0.0, 1.0)).rotate(zero, PI);
//!
//! let (theta, phi) = to_spherical(plus);
//! assert!((theta - PI / 2.0).abs() < 1e-9);
//! assert!(phi.abs() < 1e-9);
//! ```

pub mod rotation;
pub mod spherical;
pub mod vector;

pub use rotation::{Axis, rotate, rotate_x, rotate_y, rotate_z};
pub use spherical::{POLE_EPSILON, is_pole, normalize_pole, to_cartesian, to_spherical};
pub use vector::{TOLERANCE, Vec3};
