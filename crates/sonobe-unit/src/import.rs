//! The tolerant unit-construction path for arbitrary imported meshes.
//!
//! Imported meshes break the assumptions the exact path relies on: faces
//! need not be regular polygons, edge lengths vary, and the surface may have
//! open boundaries. This path trades exactness for robustness:
//!
//! - per-face normal approximated from the first three vertices, flipped to
//!   point away from the mesh center;
//! - apex height is `average incident edge length * 0.4` instead of the
//!   closed-form 90-degree solution;
//! - a boundary edge (one adjacent face) reuses that face's apex for both
//!   body triangles instead of erroring.
//!
//! Kept deliberately separate from [`crate::builder`]; do not unify the two.

use std::collections::HashMap;

use sonobe_geom::DegenerateGeometryError;
use sonobe_math::{centroid, checked_normalize, Dir3, Point3, Tolerance, Vec3};
use sonobe_topo::{EdgeKey, TopologyError};

use crate::builder::MIN_TRIANGLE_AREA;
use crate::error::{Result, UnitError};
use crate::types::{EdgeUnit, Triangle};

/// Heuristic apex height as a fraction of the face's average edge length.
/// Roughly reproduces a 90-degree spike on equilateral triangles.
const APEX_HEIGHT_FRAC: f64 = 0.4;

/// Per-face data the heuristic path derives up front.
struct FaceFrame {
    normal: Dir3,
    apex: Point3,
}

/// Uniformly scale `points` so the farthest point sits at `radius`.
///
/// Imported models arrive at arbitrary scale; normalizing the circumradius
/// keeps ridge fractions and downstream tolerances meaningful.
pub fn fit_to_radius(points: &[Point3], radius: f64) -> Vec<Point3> {
    let max_dist = points
        .iter()
        .map(|p| p.coords.norm())
        .fold(0.0_f64, f64::max);
    if max_dist < Tolerance::DEFAULT.linear {
        return points.to_vec();
    }
    let s = radius / max_dist;
    points.iter().map(|p| Point3::from(p.coords * s)).collect()
}

/// Build edge units for an arbitrary imported mesh.
///
/// `scale` sets the ridge offset to `scale * ridge_frac`. Unlike
/// [`crate::builder::build_units`], edges bounded by a single face are
/// tolerated (open surfaces); more than two adjacent faces is still an error.
pub fn build_units_from_mesh(
    vertices: &[Point3],
    faces: &[Vec<usize>],
    scale: f64,
    ridge_frac: f64,
) -> Result<Vec<EdgeUnit>> {
    for (fi, loop_) in faces.iter().enumerate() {
        if loop_.len() < 3 {
            return Err(TopologyError::FaceTooSmall {
                face: fi,
                count: loop_.len(),
            }
            .into());
        }
        if let Some(&v) = loop_.iter().find(|&&v| v >= vertices.len()) {
            return Err(TopologyError::VertexOutOfRange { face: fi, vertex: v }.into());
        }
    }

    let frames: Vec<FaceFrame> = faces
        .iter()
        .enumerate()
        .map(|(fi, loop_)| face_frame(vertices, loop_, fi))
        .collect::<Result<_>>()?;

    // Unique edges in first-seen order, with their adjacent faces.
    let mut edge_order: Vec<EdgeKey> = Vec::new();
    let mut adjacency: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
    for (fi, loop_) in faces.iter().enumerate() {
        for k in 0..loop_.len() {
            let key = EdgeKey::new(loop_[k], loop_[(k + 1) % loop_.len()]);
            let entry = adjacency.entry(key).or_default();
            if entry.is_empty() {
                edge_order.push(key);
            }
            entry.push(fi);
        }
    }

    let ridge = scale * ridge_frac;
    edge_order
        .iter()
        .map(|&edge| build_one(vertices, &frames, &adjacency[&edge], edge, ridge))
        .collect()
}

/// Approximate normal and heuristic apex for one face.
fn face_frame(vertices: &[Point3], loop_: &[usize], fi: usize) -> Result<FaceFrame> {
    let pts: Vec<Point3> = loop_.iter().map(|&v| vertices[v]).collect();
    // Loops are validated to be at least triangles.
    let center = centroid(&pts).unwrap_or_else(Point3::origin);

    // No regular-polygon assumption: first three vertices define the plane.
    let (v0, v1, v2) = (pts[0], pts[1], pts[2]);
    let mut normal = checked_normalize((v1 - v0).cross(&(v2 - v0)))
        .map_err(|_| DegenerateGeometryError::ZeroAreaFace { face: fi })?;
    if normal.as_ref().dot(&center.coords) < 0.0 {
        normal = -normal;
    }

    let mut perimeter = 0.0;
    for k in 0..pts.len() {
        perimeter += (pts[(k + 1) % pts.len()] - pts[k]).norm();
    }
    let avg_edge = perimeter / pts.len() as f64;

    Ok(FaceFrame {
        normal,
        apex: center + normal.as_ref() * (avg_edge * APEX_HEIGHT_FRAC),
    })
}

fn build_one(
    vertices: &[Point3],
    frames: &[FaceFrame],
    adjacent: &[usize],
    edge: EdgeKey,
    ridge: f64,
) -> Result<EdgeUnit> {
    let (f1, f2) = match adjacent {
        [f1] => (*f1, *f1), // boundary edge: reuse the single face's apex
        [f1, f2] => (*f1, *f2),
        _ => {
            return Err(TopologyError::NonManifoldEdge {
                a: edge.a,
                b: edge.b,
                face_count: adjacent.len(),
            }
            .into())
        }
    };

    let a = vertices[edge.a];
    let b = vertices[edge.b];
    let len = (b - a).norm();
    if len < Tolerance::DEFAULT.linear {
        return Err(DegenerateGeometryError::ZeroLengthEdge {
            a: edge.a,
            b: edge.b,
            length: len,
        }
        .into());
    }

    let n1: &Vec3 = frames[f1].normal.as_ref();
    let n2: &Vec3 = frames[f2].normal.as_ref();
    let ridge_dir =
        checked_normalize(n1 + n2).map_err(|_| DegenerateGeometryError::ZeroDirection)?;

    let a_ridge = a + ridge_dir.as_ref() * ridge;
    let b_ridge = b + ridge_dir.as_ref() * ridge;

    // Tab legs scale with this edge, tolerating non-uniform edge lengths.
    let tab_leg = len / 2.0;
    let tip_a = a - n1 * tab_leg;
    let tip_b = b - n2 * tab_leg;

    let unit = EdgeUnit {
        edge: (edge.a, edge.b),
        body: [
            Triangle::new(a_ridge, b_ridge, frames[f1].apex),
            Triangle::new(a_ridge, b_ridge, frames[f2].apex),
        ],
        tabs: [
            Triangle::new(a_ridge, frames[f1].apex, tip_a),
            Triangle::new(b_ridge, frames[f2].apex, tip_b),
        ],
    };

    // Boundary edges duplicate the body triangle by construction; only tabs
    // are checked there.
    let degenerate = if f1 == f2 {
        unit.tabs.iter().any(|t| t.area() < MIN_TRIANGLE_AREA)
            || unit.body[0].area() < MIN_TRIANGLE_AREA
    } else {
        unit.triangles().any(|t| t.area() < MIN_TRIANGLE_AREA)
    };
    if degenerate {
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

    /// An irregular tetrahedron, the smallest closed mesh.
    fn tetrahedron() -> (Vec<Point3>, Vec<Vec<usize>>) {
        let vertices = vec![
            Point3::new(1.2, 1.0, 0.9),
            Point3::new(1.0, -1.0, -1.1),
            Point3::new(-1.0, 1.1, -1.0),
            Point3::new(-0.9, -1.0, 1.0),
        ];
        let faces = vec![
            vec![0, 1, 2],
            vec![0, 3, 1],
            vec![0, 2, 3],
            vec![1, 3, 2],
        ];
        (vertices, faces)
    }

    #[test]
    fn test_closed_mesh_unit_count() {
        let (vertices, faces) = tetrahedron();
        let units = build_units_from_mesh(&vertices, &faces, 1.0, 0.02).unwrap();
        assert_eq!(units.len(), 6);
        for u in &units {
            for t in u.triangles() {
                assert!(t.area() > MIN_TRIANGLE_AREA);
            }
        }
    }

    #[test]
    fn test_boundary_edge_reuses_single_apex() {
        // A single square face: all four edges are boundary edges.
        let vertices = vec![
            Point3::new(-1.0, -1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(-1.0, 1.0, 1.0),
        ];
        let faces = vec![vec![0, 1, 2, 3]];
        let units = build_units_from_mesh(&vertices, &faces, 1.0, 0.02).unwrap();
        assert_eq!(units.len(), 4);
        for u in &units {
            // Both body triangles go to the same (single) apex.
            assert_eq!(u.body[0], u.body[1]);
        }
    }

    #[test]
    fn test_heuristic_apex_height() {
        let (vertices, faces) = tetrahedron();
        let units = build_units_from_mesh(&vertices, &faces, 1.0, 0.0).unwrap();
        // With zero ridge offset the body triangle base is the bare edge;
        // check the apex of face 0 sits 0.4 * avg edge length above its
        // centroid.
        let pts: Vec<Point3> = faces[0].iter().map(|&v| vertices[v]).collect();
        let center = centroid(&pts).unwrap();
        let mut perimeter = 0.0;
        for k in 0..3 {
            perimeter += (pts[(k + 1) % 3] - pts[k]).norm();
        }
        let expected_h = perimeter / 3.0 * APEX_HEIGHT_FRAC;

        // Face 0's apex appears in the unit for its first edge.
        let apex = units[0].body[0].c;
        assert_relative_eq!((apex - center).norm(), expected_h, epsilon = 1e-9);
    }

    #[test]
    fn test_nonmanifold_edge_rejected() {
        // Three faces sharing edge (0, 1).
        let vertices = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
            Point3::new(-1.0, -1.0, 0.0),
        ];
        let faces = vec![vec![0, 1, 2], vec![0, 1, 3], vec![0, 1, 4]];
        let err = build_units_from_mesh(&vertices, &faces, 1.0, 0.02).unwrap_err();
        match err {
            UnitError::Topology(TopologyError::NonManifoldEdge { a, b, face_count }) => {
                assert_eq!((a, b, face_count), (0, 1, 3));
            }
            other => panic!("expected non-manifold edge, got {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_face_rejected() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 1.0), // collinear with the other two
        ];
        let faces = vec![vec![0, 1, 2]];
        let err = build_units_from_mesh(&vertices, &faces, 1.0, 0.02).unwrap_err();
        assert_eq!(
            err,
            UnitError::Geometry(DegenerateGeometryError::ZeroAreaFace { face: 0 })
        );
    }

    #[test]
    fn test_fit_to_radius() {
        let points = vec![
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 5.0, 0.0),
            Point3::new(0.0, 0.0, -2.5),
        ];
        let scaled = fit_to_radius(&points, 2.0);
        let max = scaled
            .iter()
            .map(|p| p.coords.norm())
            .fold(0.0_f64, f64::max);
        assert_relative_eq!(max, 2.0, epsilon = 1e-12);
        // Proportions preserved.
        assert_relative_eq!(scaled[1].y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_to_radius_degenerate_cloud() {
        let points = vec![Point3::origin(); 3];
        assert_eq!(fit_to_radius(&points, 2.0), points);
    }
}
