//! Face recovery from a bare point cloud via half-edge traversal.
//!
//! Works for solids with a single dominant edge-length class: the global
//! minimum pairwise distance is taken as *the* edge length, the adjacency
//! graph is built from it, each vertex's neighbors are sorted into cyclic
//! angular order around the outward direction, and faces are traced by
//! walking directed edges one cyclic step at a time.
//!
//! Precondition: the solid is centered at the origin and star-shaped from it,
//! so `normalize(p)` is a valid outward direction at every vertex.

use std::collections::HashSet;

use sonobe_math::{checked_normalize, Point3};

use crate::error::{Result, TopologyError};
use crate::polyhedron::FaceLoop;

/// Adjacency tolerance as a fraction of the minimum squared distance.
const EDGE_TOLERANCE_FRAC: f64 = 0.01;

/// Safety bound on half-edge walk length. Recovered faces are capped at 6
/// vertices, so any walk this long has left manifold territory.
const MAX_WALK_STEPS: usize = 20;

/// Accepted face loop sizes; longer closed walks are discarded.
const FACE_SIZE_RANGE: std::ops::RangeInclusive<usize> = 3..=6;

/// Recover the face loops of a polyhedron given only its vertex positions.
///
/// Returns faces with consistent winding. Fails with a [`TopologyError`] if a
/// vertex has no neighbor at the dominant edge length, or if a face walk does
/// not close — both symptoms of input that is not a closed manifold with a
/// single edge-length class.
pub fn resolve_faces(points: &[Point3]) -> Result<Vec<FaceLoop>> {
    if points.len() < 4 {
        return Err(TopologyError::TooFewVertices {
            count: points.len(),
        });
    }

    let adjacency = build_adjacency(points)?;
    let sorted = sort_neighbors_cyclically(points, adjacency)?;
    walk_faces(&sorted)
}

/// Adjacency from the dominant (minimum) pairwise distance.
fn build_adjacency(points: &[Point3]) -> Result<Vec<Vec<usize>>> {
    let n = points.len();
    let mut min_d2 = f64::INFINITY;
    for i in 0..n {
        for j in (i + 1)..n {
            let d2 = (points[j] - points[i]).norm_squared();
            if d2 < min_d2 {
                min_d2 = d2;
            }
        }
    }

    let tol = min_d2 * EDGE_TOLERANCE_FRAC;
    let mut adjacency = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d2 = (points[j] - points[i]).norm_squared();
            if (d2 - min_d2).abs() < tol {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
    }

    if let Some(v) = adjacency.iter().position(|nbrs| nbrs.is_empty()) {
        return Err(TopologyError::IsolatedVertex { vertex: v });
    }
    Ok(adjacency)
}

/// Sort each vertex's neighbor list into cyclic angular order around the
/// vertex's outward direction.
///
/// The first neighbor defines angle zero; the tangent axis is
/// `outward x ref`, and neighbors sort by `atan2(d . tang, d . ref)`.
fn sort_neighbors_cyclically(
    points: &[Point3],
    mut adjacency: Vec<Vec<usize>>,
) -> Result<Vec<Vec<usize>>> {
    for (v, nbrs) in adjacency.iter_mut().enumerate() {
        let outward = checked_normalize(points[v].coords)
            .map_err(|_| TopologyError::VertexAtOrigin { vertex: v })?;
        // Adjacency guarantees at least one neighbor, at nonzero distance.
        let ref_dir = checked_normalize(points[nbrs[0]] - points[v])
            .map_err(|_| TopologyError::IsolatedVertex { vertex: v })?;
        let tang = outward.as_ref().cross(ref_dir.as_ref());

        let mut keyed: Vec<(f64, usize)> = nbrs
            .iter()
            .map(|&nb| {
                let d = points[nb] - points[v];
                (d.dot(&tang).atan2(d.dot(ref_dir.as_ref())), nb)
            })
            .collect();
        keyed.sort_by(|x, y| x.0.total_cmp(&y.0));
        *nbrs = keyed.into_iter().map(|(_, nb)| nb).collect();
    }
    Ok(adjacency)
}

/// Trace face loops by half-edge traversal.
///
/// From the current vertex `cv`, arrived at from `cu`, the next vertex is the
/// cyclic predecessor of `cu` in `cv`'s sorted neighbor list. Each directed
/// edge belongs to exactly one face, so marking it visited enumerates every
/// face exactly once.
fn walk_faces(adjacency: &[Vec<usize>]) -> Result<Vec<FaceLoop>> {
    let mut faces = Vec::new();
    let mut visited: HashSet<(usize, usize)> = HashSet::new();

    for u in 0..adjacency.len() {
        for &v in &adjacency[u] {
            if visited.contains(&(u, v)) {
                continue;
            }

            let mut loop_ = Vec::new();
            let (mut cu, mut cv) = (u, v);
            let mut closed = false;
            for _ in 0..MAX_WALK_STEPS {
                loop_.push(cu);
                visited.insert((cu, cv));
                let nbrs = &adjacency[cv];
                let idx = nbrs
                    .iter()
                    .position(|&x| x == cu)
                    .ok_or(TopologyError::WalkDidNotClose {
                        from: u,
                        to: v,
                        steps: MAX_WALK_STEPS,
                    })?;
                let next = nbrs[(idx + nbrs.len() - 1) % nbrs.len()];
                cu = cv;
                cv = next;
                if cu == u && cv == v {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(TopologyError::WalkDidNotClose {
                    from: u,
                    to: v,
                    steps: MAX_WALK_STEPS,
                });
            }
            if FACE_SIZE_RANGE.contains(&loop_.len()) {
                faces.push(loop_);
            }
        }
    }
    Ok(faces)
}
