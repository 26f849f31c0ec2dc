//! The combinatorial polyhedron model: vertices, face loops, derived edges.

use std::collections::HashSet;

use sonobe_math::{centroid, Point3};

use crate::error::{Result, TopologyError};

/// An ordered loop of vertex indices describing one planar face.
///
/// Consecutive entries (including last back to first) are edges of the
/// polyhedron; winding is consistent across all faces of a [`Polyhedron`].
pub type FaceLoop = Vec<usize>;

/// An undirected edge, stored as a sorted pair of vertex indices.
///
/// Using a canonical ordered pair (rather than a formatted string key) makes
/// deduplication collision-free and allocation-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    /// Smaller vertex index.
    pub a: usize,
    /// Larger vertex index.
    pub b: usize,
}

impl EdgeKey {
    /// Canonicalize `(i, j)` into a sorted pair.
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }
}

/// A closed polyhedron: an immutable vertex list plus ordered face loops.
///
/// Edges are always derived from the faces, never stored as input.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    /// Vertex positions, indexed by the face loops.
    pub vertices: Vec<Point3>,
    /// Ordered vertex-index loops, one per face.
    pub faces: Vec<FaceLoop>,
}

impl Polyhedron {
    /// Build a polyhedron, validating that the input can plausibly be one:
    /// at least 4 vertices and 4 faces, every loop at least a triangle, and
    /// every referenced index in range.
    pub fn new(vertices: Vec<Point3>, faces: Vec<FaceLoop>) -> Result<Self> {
        if vertices.len() < 4 {
            return Err(TopologyError::TooFewVertices {
                count: vertices.len(),
            });
        }
        if faces.len() < 4 {
            return Err(TopologyError::TooFewFaces { count: faces.len() });
        }
        for (fi, loop_) in faces.iter().enumerate() {
            if loop_.len() < 3 {
                return Err(TopologyError::FaceTooSmall {
                    face: fi,
                    count: loop_.len(),
                });
            }
            if let Some(&v) = loop_.iter().find(|&&v| v >= vertices.len()) {
                return Err(TopologyError::VertexOutOfRange { face: fi, vertex: v });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Enumerate the unique undirected edges, in first-seen face order.
    pub fn edges(&self) -> Vec<EdgeKey> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for loop_ in &self.faces {
            for k in 0..loop_.len() {
                let key = EdgeKey::new(loop_[k], loop_[(k + 1) % loop_.len()]);
                if seen.insert(key) {
                    edges.push(key);
                }
            }
        }
        edges
    }

    /// Indices of all faces containing both endpoints of `edge`.
    ///
    /// For a closed 2-manifold this is exactly two faces per edge.
    pub fn faces_of_edge(&self, edge: EdgeKey) -> Vec<usize> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, loop_)| loop_.contains(&edge.a) && loop_.contains(&edge.b))
            .map(|(fi, _)| fi)
            .collect()
    }

    /// Centroid of face `fi`.
    ///
    /// Face loops are validated non-empty at construction, so this cannot
    /// fail for a valid polyhedron.
    pub fn face_centroid(&self, fi: usize) -> Point3 {
        let pts: Vec<Point3> = self.faces[fi].iter().map(|&v| self.vertices[v]).collect();
        centroid(&pts).unwrap_or_else(Point3::origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron() -> Polyhedron {
        let vertices = vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
        ];
        let faces = vec![vec![0, 1, 2], vec![0, 3, 1], vec![0, 2, 3], vec![1, 3, 2]];
        Polyhedron::new(vertices, faces).unwrap()
    }

    #[test]
    fn test_edge_key_canonical() {
        assert_eq!(EdgeKey::new(5, 2), EdgeKey::new(2, 5));
        assert_eq!(EdgeKey::new(2, 5).a, 2);
        assert_eq!(EdgeKey::new(2, 5).b, 5);
    }

    #[test]
    fn test_tetrahedron_edges() {
        let tet = tetrahedron();
        let edges = tet.edges();
        assert_eq!(edges.len(), 6);
        // Every edge of a closed manifold has exactly two adjacent faces.
        for e in edges {
            assert_eq!(tet.faces_of_edge(e).len(), 2, "edge {e:?}");
        }
    }

    #[test]
    fn test_rejects_too_few_vertices() {
        let err = Polyhedron::new(
            vec![Point3::origin(); 3],
            vec![vec![0, 1, 2]; 4],
        )
        .unwrap_err();
        assert_eq!(err, TopologyError::TooFewVertices { count: 3 });
    }

    #[test]
    fn test_rejects_too_few_faces() {
        let err = Polyhedron::new(
            vec![Point3::origin(); 4],
            vec![vec![0, 1, 2]],
        )
        .unwrap_err();
        assert_eq!(err, TopologyError::TooFewFaces { count: 1 });
    }

    #[test]
    fn test_rejects_degenerate_face() {
        let err = Polyhedron::new(
            vec![Point3::origin(); 4],
            vec![vec![0, 1, 2], vec![0, 1], vec![0, 2, 3], vec![1, 2, 3]],
        )
        .unwrap_err();
        assert_eq!(err, TopologyError::FaceTooSmall { face: 1, count: 2 });
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let err = Polyhedron::new(
            vec![Point3::origin(); 4],
            vec![vec![0, 1, 2], vec![0, 1, 9], vec![0, 2, 3], vec![1, 2, 3]],
        )
        .unwrap_err();
        assert_eq!(err, TopologyError::VertexOutOfRange { face: 1, vertex: 9 });
    }
}
