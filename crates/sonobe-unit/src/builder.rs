//! The exact unit-construction path for closed regular solids.
//!
//! Consumes a validated [`Polyhedron`] plus one closed-form apex per face and
//! emits one [`EdgeUnit`] per unique edge. Every edge must be shared by
//! exactly two faces; anything else is a topology error, not a unit.

use rayon::prelude::*;
use sonobe_geom::{DegenerateGeometryError, FaceApex};
use sonobe_math::{checked_normalize, Tolerance};
use sonobe_topo::{EdgeKey, Polyhedron, TopologyError};

use crate::error::{Result, UnitError};
use crate::types::{EdgeUnit, Triangle};

/// Minimum acceptable triangle area; anything below is a degenerate unit.
pub const MIN_TRIANGLE_AREA: f64 = 1e-9;

/// Build one edge unit per unique edge of `poly`.
///
/// `apexes` must hold one apex per face, in face order. `edge_length` is the
/// reference edge length `L`; the ridge offset is `L * ridge_frac` (typical
/// fractions 0.01–0.06) and the tab leg is `L / 2`.
///
/// Edges are independent once faces and apexes are fixed, so construction
/// runs in parallel; output order still follows [`Polyhedron::edges`].
pub fn build_units(
    poly: &Polyhedron,
    apexes: &[FaceApex],
    edge_length: f64,
    ridge_frac: f64,
) -> Result<Vec<EdgeUnit>> {
    if apexes.len() != poly.faces.len() {
        return Err(UnitError::ApexCountMismatch {
            apexes: apexes.len(),
            faces: poly.faces.len(),
        });
    }
    if edge_length <= 0.0 {
        return Err(DegenerateGeometryError::NonPositiveEdgeLength {
            length: edge_length,
        }
        .into());
    }

    poly.edges()
        .par_iter()
        .map(|&edge| build_one(poly, apexes, edge, edge_length, ridge_frac))
        .collect()
}

fn build_one(
    poly: &Polyhedron,
    apexes: &[FaceApex],
    edge: EdgeKey,
    edge_length: f64,
    ridge_frac: f64,
) -> Result<EdgeUnit> {
    let adjacent = poly.faces_of_edge(edge);
    if adjacent.len() != 2 {
        return Err(TopologyError::NonManifoldEdge {
            a: edge.a,
            b: edge.b,
            face_count: adjacent.len(),
        }
        .into());
    }
    let (f1, f2) = (adjacent[0], adjacent[1]);

    let a = poly.vertices[edge.a];
    let b = poly.vertices[edge.b];
    let len = (b - a).norm();
    if len < Tolerance::DEFAULT.linear {
        return Err(DegenerateGeometryError::ZeroLengthEdge {
            a: edge.a,
            b: edge.b,
            length: len,
        }
        .into());
    }

    // Outward directions of the two adjacent faces (centered-at-origin
    // convention), averaged into the ridge direction.
    let out1 = checked_normalize(poly.face_centroid(f1).coords)
        .map_err(|_| DegenerateGeometryError::ZeroDirection)?;
    let out2 = checked_normalize(poly.face_centroid(f2).coords)
        .map_err(|_| DegenerateGeometryError::ZeroDirection)?;
    let ridge_dir = checked_normalize(out1.as_ref() + out2.as_ref())
        .map_err(|_| DegenerateGeometryError::ZeroDirection)?;

    let ridge = edge_length * ridge_frac;
    let a_ridge = a + ridge_dir.as_ref() * ridge;
    let b_ridge = b + ridge_dir.as_ref() * ridge;

    let apex1 = apexes[f1].point;
    let apex2 = apexes[f2].point;

    let tab_leg = edge_length / 2.0;
    let tip_a = a - out1.as_ref() * tab_leg;
    let tip_b = b - out2.as_ref() * tab_leg;

    let unit = EdgeUnit {
        edge: (edge.a, edge.b),
        body: [
            Triangle::new(a_ridge, b_ridge, apex1),
            Triangle::new(a_ridge, b_ridge, apex2),
        ],
        tabs: [
            Triangle::new(a_ridge, apex1, tip_a),
            Triangle::new(b_ridge, apex2, tip_b),
        ],
    };

    if unit.triangles().any(|t| t.area() < MIN_TRIANGLE_AREA) {
        return Err(UnitError::DegenerateTriangle {
            a: edge.a,
            b: edge.b,
        });
    }
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sonobe_geom::face_apex;
    use sonobe_math::Point3;
    use std::f64::consts::PI;

    fn octahedron() -> Polyhedron {
        let vertices = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
        ];
        let faces = vec![
            vec![0, 2, 4],
            vec![0, 4, 3],
            vec![0, 3, 5],
            vec![0, 5, 2],
            vec![1, 4, 2],
            vec![1, 3, 4],
            vec![1, 5, 3],
            vec![1, 2, 5],
        ];
        Polyhedron::new(vertices, faces).unwrap()
    }

    fn apexes_for(poly: &Polyhedron, edge_length: f64) -> Vec<FaceApex> {
        poly.faces
            .iter()
            .enumerate()
            .map(|(fi, f)| face_apex(&poly.vertices, f, fi, edge_length).unwrap())
            .collect()
    }

    #[test]
    fn test_octahedron_unit_count() {
        let poly = octahedron();
        let edge_length = 2.0_f64.sqrt();
        let apexes = apexes_for(&poly, edge_length);
        let units = build_units(&poly, &apexes, edge_length, 0.06).unwrap();
        assert_eq!(units.len(), 12);
    }

    #[test]
    fn test_all_triangles_nondegenerate() {
        let poly = octahedron();
        let edge_length = 2.0_f64.sqrt();
        let apexes = apexes_for(&poly, edge_length);
        let units = build_units(&poly, &apexes, edge_length, 0.06).unwrap();
        for unit in &units {
            for t in unit.triangles() {
                assert!(t.area() > MIN_TRIANGLE_AREA);
            }
        }
    }

    #[test]
    fn test_body_apex_angle_is_right() {
        // The defining property of the folding unit: laterals from the apex
        // to the two (un-offset) edge endpoints enclose 90 degrees.
        let poly = octahedron();
        let edge_length = 2.0_f64.sqrt();
        let apexes = apexes_for(&poly, edge_length);
        for edge in poly.edges() {
            let adj = poly.faces_of_edge(edge);
            let a = poly.vertices[edge.a];
            let b = poly.vertices[edge.b];
            for &fi in &adj {
                let apex = apexes[fi].point;
                let va = a - apex;
                let vb = b - apex;
                let angle = (va.dot(&vb) / (va.norm() * vb.norm())).acos();
                assert_relative_eq!(angle, PI / 2.0, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let poly = octahedron();
        let edge_length = 2.0_f64.sqrt();
        let apexes = apexes_for(&poly, edge_length);
        let u1 = build_units(&poly, &apexes, edge_length, 0.04).unwrap();
        let u2 = build_units(&poly, &apexes, edge_length, 0.04).unwrap();
        assert_eq!(u1, u2);
    }

    #[test]
    fn test_open_surface_is_rejected() {
        // Drop one face: its three edges now have a single adjacent face.
        let mut poly = octahedron();
        poly.faces.pop();
        let edge_length = 2.0_f64.sqrt();
        let apexes = apexes_for(&poly, edge_length);
        let err = build_units(&poly, &apexes, edge_length, 0.04).unwrap_err();
        match err {
            UnitError::Topology(TopologyError::NonManifoldEdge { face_count, .. }) => {
                assert_eq!(face_count, 1)
            }
            other => panic!("expected non-manifold edge, got {other:?}"),
        }
    }

    #[test]
    fn test_apex_count_mismatch() {
        let poly = octahedron();
        let err = build_units(&poly, &[], 1.0, 0.04).unwrap_err();
        assert_eq!(
            err,
            UnitError::ApexCountMismatch {
                apexes: 0,
                faces: 8
            }
        );
    }

    #[test]
    fn test_ridge_offset_magnitude() {
        let poly = octahedron();
        let edge_length = 2.0_f64.sqrt();
        let apexes = apexes_for(&poly, edge_length);
        let ridge_frac = 0.05;
        let units = build_units(&poly, &apexes, edge_length, ridge_frac).unwrap();
        for unit in &units {
            let a = poly.vertices[unit.edge.0];
            let a_ridge = unit.body[0].a;
            assert_relative_eq!(
                (a_ridge - a).norm(),
                edge_length * ridge_frac,
                epsilon = 1e-12
            );
        }
    }
}
