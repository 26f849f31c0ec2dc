//! Error types for topology construction and recovery.

use thiserror::Error;

/// Errors that can occur while building or recovering polyhedron topology.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// Fewer than 4 vertices cannot form a closed polyhedron.
    #[error("need at least 4 vertices, got {count}")]
    TooFewVertices {
        /// Number of vertices supplied.
        count: usize,
    },

    /// Fewer than 4 faces cannot form a closed polyhedron.
    #[error("need at least 4 faces, got {count}")]
    TooFewFaces {
        /// Number of faces supplied.
        count: usize,
    },

    /// A face loop has fewer than 3 vertices.
    #[error("face {face} has only {count} vertices")]
    FaceTooSmall {
        /// Index of the offending face.
        face: usize,
        /// Number of vertices in the loop.
        count: usize,
    },

    /// A face references a vertex index outside the vertex list.
    #[error("face {face} references out-of-range vertex {vertex}")]
    VertexOutOfRange {
        /// Index of the offending face.
        face: usize,
        /// The out-of-range vertex index.
        vertex: usize,
    },

    /// A vertex has no neighbors within the edge-length tolerance.
    #[error("vertex {vertex} is isolated (no neighbor at the dominant edge length)")]
    IsolatedVertex {
        /// Index of the isolated vertex.
        vertex: usize,
    },

    /// A vertex sits at the origin, so no outward direction exists for it.
    #[error("vertex {vertex} lies at the origin; outward direction undefined")]
    VertexAtOrigin {
        /// Index of the offending vertex.
        vertex: usize,
    },

    /// A candidate face normal has (near-)zero length.
    #[error("candidate normal {index} has near-zero length")]
    ZeroNormal {
        /// Index into the candidate-normal list.
        index: usize,
    },

    /// A half-edge walk failed to return to its starting directed edge.
    #[error("face walk from directed edge {from}->{to} did not close within {steps} steps")]
    WalkDidNotClose {
        /// Start vertex of the initial directed edge.
        from: usize,
        /// End vertex of the initial directed edge.
        to: usize,
        /// The safety bound that was exhausted.
        steps: usize,
    },

    /// An edge is shared by a number of faces other than exactly two.
    #[error("edge ({a}, {b}) has {face_count} adjacent faces, expected 2")]
    NonManifoldEdge {
        /// Smaller vertex index of the edge.
        a: usize,
        /// Larger vertex index of the edge.
        b: usize,
        /// Number of faces found adjacent to the edge.
        face_count: usize,
    },
}

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;
