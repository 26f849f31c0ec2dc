#![warn(missing_docs)]

//! Closed-form pyramid apex geometry for the sonobe kernel.
//!
//! Every face of the host polyhedron carries a pyramid whose apex the body
//! triangles of the edge units meet at. The folding unit dictates the apex
//! angle: the two paper flaps meeting above an edge form a right angle, so
//! the pyramid's lateral (slant-edge) length is `L / sqrt(2)` for base edge
//! length `L`. Given that lateral length and the circumradius of the regular
//! n-gon face, the apex height follows by Pythagoras.
//!
//! Precondition: the polyhedron is centered at the origin and convex (or at
//! least star-shaped from the origin), so `normalize(face centroid)` is the
//! face's outward normal direction.

use std::f64::consts::PI;

use sonobe_math::{centroid, checked_normalize, Point3};
use thiserror::Error;

/// Errors for geometrically impossible (zero-measure) input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DegenerateGeometryError {
    /// An edge has (near-)zero length.
    #[error("edge ({a}, {b}) has near-zero length {length:e}")]
    ZeroLengthEdge {
        /// First endpoint index.
        a: usize,
        /// Second endpoint index.
        b: usize,
        /// The offending length.
        length: f64,
    },

    /// A face spans (near-)zero area.
    #[error("face {face} has near-zero area")]
    ZeroAreaFace {
        /// Index of the offending face.
        face: usize,
    },

    /// A direction that must be normalized has (near-)zero length.
    ///
    /// For apex computation this means the face centroid coincides with the
    /// origin, violating the centered-at-origin outward-normal convention.
    #[error("zero-length direction (face centroid at origin?)")]
    ZeroDirection,

    /// The reference edge length is not strictly positive.
    #[error("reference edge length {length} must be positive")]
    NonPositiveEdgeLength {
        /// The offending length.
        length: f64,
    },
}

/// A non-fatal geometric anomaly; the caller may proceed with the attached
/// best-effort result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryWarning {
    /// The face is too large for a true 90-degree apex; the apex height was
    /// clipped to zero and the apex sits in the face plane.
    #[error("face {face}: apex height clipped to zero (face too large for a 90-degree apex)")]
    ApexFlattened {
        /// Index of the flattened face.
        face: usize,
    },
}

/// The apex of the right-angle pyramid above one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceApex {
    /// The apex point.
    pub point: Point3,
    /// True if the closed-form height came out imaginary and was clipped to
    /// zero, leaving the apex in the face plane.
    pub clipped: bool,
}

/// Compute the 90-degree-apex pyramid point above the face `loop_`.
///
/// `face` is the face's index, used only for error context. `edge_length` is
/// the polyhedron's reference (base) edge length `L`. The lateral edge is
/// `L / sqrt(2)` so that two laterals meeting over a base edge enclose a
/// right angle; the apex height is
/// `sqrt(lateral^2 - circumradius(n-gon)^2)`, clipped at zero.
///
/// A clipped height is reported via [`FaceApex::clipped`], not an error: the
/// geometry stays usable, merely flat.
pub fn face_apex(
    vertices: &[Point3],
    loop_: &[usize],
    face: usize,
    edge_length: f64,
) -> Result<FaceApex, DegenerateGeometryError> {
    if edge_length <= 0.0 {
        return Err(DegenerateGeometryError::NonPositiveEdgeLength {
            length: edge_length,
        });
    }
    let n = loop_.len();
    if n < 3 {
        return Err(DegenerateGeometryError::ZeroAreaFace { face });
    }

    let lateral = edge_length / 2.0_f64.sqrt();
    let circum_r = edge_length / (2.0 * (PI / n as f64).sin());
    let h2 = lateral * lateral - circum_r * circum_r;
    let clipped = h2 < 0.0;
    let height = h2.max(0.0).sqrt();

    let pts: Vec<Point3> = loop_.iter().map(|&v| vertices[v]).collect();
    // n >= 3 checked above, so the centroid exists.
    let center = centroid(&pts).unwrap_or_else(Point3::origin);
    let outward = checked_normalize(center.coords)
        .map_err(|_| DegenerateGeometryError::ZeroDirection)?;

    Ok(FaceApex {
        point: center + height * outward.as_ref(),
        clipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_top_face_apex_on_axis() {
        // Cube face z = +0.7, edge length 1.4.
        let s = 0.7;
        let vertices = vec![
            Point3::new(-s, -s, s),
            Point3::new(s, -s, s),
            Point3::new(s, s, s),
            Point3::new(-s, s, s),
        ];
        let apex = face_apex(&vertices, &[0, 1, 2, 3], 0, 2.0 * s).unwrap();
        assert_relative_eq!(apex.point.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(apex.point.y, 0.0, epsilon = 1e-12);

        // A square face sits exactly at the flattening threshold: its
        // circumradius equals the lateral length L/sqrt(2), so the closed
        // form puts the apex in the face plane (height >= 0, ~0 here).
        assert!(apex.point.z >= s - 1e-12);
        assert_relative_eq!(apex.point.z, s, epsilon = 1e-6);
    }

    #[test]
    fn test_triangle_face_apex_height() {
        // Equilateral triangle with edge 1 in the z = 1 plane, centered on
        // the z axis so its centroid is (0, 0, 1).
        let r = 1.0 / 3.0_f64.sqrt(); // circumradius of unit-edge triangle
        let mut vertices = Vec::new();
        for k in 0..3 {
            let a = 2.0 * PI * k as f64 / 3.0;
            vertices.push(Point3::new(r * a.cos(), r * a.sin(), 1.0));
        }
        let apex = face_apex(&vertices, &[0, 1, 2], 0, 1.0).unwrap();
        assert!(!apex.clipped);

        let lateral: f64 = 1.0 / 2.0_f64.sqrt();
        let expect_h = (lateral * lateral - r * r).sqrt();
        assert_relative_eq!(apex.point.z, 1.0 + expect_h, epsilon = 1e-9);

        // The apex angle over a base edge must be a right angle.
        let va = vertices[0] - apex.point;
        let vb = vertices[1] - apex.point;
        let angle = (va.dot(&vb) / (va.norm() * vb.norm())).acos();
        assert_relative_eq!(angle, PI / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_large_face_clips_to_plane() {
        // A hexagon's circumradius equals its edge length, far beyond the
        // lateral length L/sqrt(2): the apex must flatten, not go NaN.
        let mut vertices = Vec::new();
        for k in 0..6 {
            let a = 2.0 * PI * k as f64 / 6.0;
            vertices.push(Point3::new(a.cos(), a.sin(), 1.0));
        }
        let apex = face_apex(&vertices, &[0, 1, 2, 3, 4, 5], 0, 1.0).unwrap();
        assert!(apex.clipped);
        assert_relative_eq!(apex.point.z, 1.0, epsilon = 1e-12);
        assert!(apex.point.x.is_finite() && apex.point.y.is_finite());
    }

    #[test]
    fn test_centroid_at_origin_errors() {
        // A face whose centroid is the origin has no outward direction.
        let vertices = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-0.5, 0.866, 0.0),
            Point3::new(-0.5, -0.866, 0.0),
        ];
        let err = face_apex(&vertices, &[0, 1, 2], 0, 1.0).unwrap_err();
        assert_eq!(err, DegenerateGeometryError::ZeroDirection);
    }

    #[test]
    fn test_rejects_nonpositive_edge_length() {
        let vertices = vec![Point3::new(1.0, 0.0, 1.0); 3];
        let err = face_apex(&vertices, &[0, 1, 2], 0, 0.0).unwrap_err();
        assert_eq!(
            err,
            DegenerateGeometryError::NonPositiveEdgeLength { length: 0.0 }
        );
    }
}
