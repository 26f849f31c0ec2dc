//! Face recovery by grouping vertices under analytically known face normals.
//!
//! For symmetric solids whose face-plane directions are known in advance
//! (e.g. derived from a simpler seed polyhedron), each face is the set of
//! vertices with maximal projection onto its normal. This sidesteps the
//! single-edge-length assumption of [`crate::resolve`], which breaks on
//! solids with two or more edge-length classes.

use sonobe_math::{centroid, checked_normalize, Dir3, Point3, Vec3};

use crate::error::{Result, TopologyError};
use crate::polyhedron::FaceLoop;

/// Membership tolerance as a fraction of the circumradius.
const PROJECTION_TOLERANCE_FRAC: f64 = 0.001;

/// Recover face loops by maximal projection onto `normals`.
///
/// For each candidate normal, the vertices whose projection lies within
/// 0.1% of the circumradius of the maximal projection form one face, ordered
/// cyclically in the face plane. Candidates gathering fewer than 3 vertices
/// are skipped (the caller supplied a normal with no face at this scale).
pub fn group_faces(points: &[Point3], normals: &[Vec3]) -> Result<Vec<FaceLoop>> {
    if points.len() < 4 {
        return Err(TopologyError::TooFewVertices {
            count: points.len(),
        });
    }

    let circumradius = points
        .iter()
        .map(|p| p.coords.norm())
        .fold(0.0_f64, f64::max);
    let tol = circumradius * PROJECTION_TOLERANCE_FRAC;

    let mut faces = Vec::new();
    for (ni, raw) in normals.iter().enumerate() {
        let normal = checked_normalize(*raw)
            .map_err(|_| TopologyError::ZeroNormal { index: ni })?;

        let dots: Vec<f64> = points
            .iter()
            .map(|p| p.coords.dot(normal.as_ref()))
            .collect();
        let max_dot = dots.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut members: Vec<usize> = dots
            .iter()
            .enumerate()
            .filter(|(_, &d)| (d - max_dot).abs() < tol)
            .map(|(i, _)| i)
            .collect();
        if members.len() < 3 {
            continue;
        }

        order_cyclically(points, &normal, &mut members)?;
        faces.push(members);
    }
    Ok(faces)
}

/// Sort `members` by angle around their centroid in the plane normal to
/// `normal`. The first member defines angle zero.
fn order_cyclically(
    points: &[Point3],
    normal: &Dir3,
    members: &mut [usize],
) -> Result<()> {
    let pts: Vec<Point3> = members.iter().map(|&v| points[v]).collect();
    // members.len() >= 3 is checked by the caller.
    let center = centroid(&pts).unwrap_or_else(Point3::origin);

    let u = checked_normalize(points[members[0]] - center)
        .map_err(|_| TopologyError::VertexAtOrigin { vertex: members[0] })?;
    let w = normal.as_ref().cross(u.as_ref());

    let mut keyed: Vec<(f64, usize)> = members
        .iter()
        .map(|&v| {
            let d = points[v] - center;
            (d.dot(&w).atan2(d.dot(u.as_ref())), v)
        })
        .collect();
    keyed.sort_by(|x, y| x.0.total_cmp(&y.0));
    for (slot, (_, v)) in members.iter_mut().zip(keyed) {
        *slot = v;
    }
    Ok(())
}
