#![warn(missing_docs)]

//! Math types for the sonobe geometry kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types for the
//! edge-unit pipeline: points, vectors, directions, and tolerance constants,
//! plus the small set of geometric helpers every other crate leans on.

use nalgebra::{Unit, Vector3};
use thiserror::Error;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Attempted to normalize a vector of (near-)zero length.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("cannot normalize near-zero vector (length {length:e})")]
pub struct ZeroVectorError {
    /// Length of the offending vector.
    pub length: f64,
}

/// Normalize `v`, failing if its length is below `Tolerance::DEFAULT.linear`.
///
/// The silent "return the input unchanged" fallback some renderers use is
/// exactly the failure mode this kernel must not have: a bogus direction
/// propagates into every triangle built from it.
pub fn checked_normalize(v: Vec3) -> Result<Dir3, ZeroVectorError> {
    let length = v.norm();
    if length < Tolerance::DEFAULT.linear {
        return Err(ZeroVectorError { length });
    }
    Ok(Dir3::new_unchecked(v / length))
}

/// Centroid (arithmetic mean) of a non-empty point set.
///
/// Returns `None` for an empty slice.
pub fn centroid(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Area of the triangle `(a, b, c)`.
pub fn triangle_area(a: &Point3, b: &Point3, c: &Point3) -> f64 {
    (b - a).cross(&(c - a)).norm() / 2.0
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default kernel tolerances (1e-9 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
