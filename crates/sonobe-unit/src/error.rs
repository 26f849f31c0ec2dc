//! Error types for unit construction.

use sonobe_geom::DegenerateGeometryError;
use sonobe_topo::TopologyError;
use thiserror::Error;

/// Errors that can occur while building edge units.
///
/// Every variant names the offending edge or face; a unit is atomic, so a
/// failing edge rejects its whole unit rather than emitting a partial one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Underlying topology problem (adjacency, input counts).
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// Underlying degenerate geometry (zero-length edge, zero direction).
    #[error(transparent)]
    Geometry(#[from] DegenerateGeometryError),

    /// A constructed triangle collapsed to (near-)zero area.
    #[error("unit for edge ({a}, {b}) produced a near-zero-area triangle")]
    DegenerateTriangle {
        /// Smaller vertex index of the edge.
        a: usize,
        /// Larger vertex index of the edge.
        b: usize,
    },

    /// The apex list does not match the face list.
    #[error("apex count {apexes} does not match face count {faces}")]
    ApexCountMismatch {
        /// Number of apexes supplied.
        apexes: usize,
        /// Number of faces in the polyhedron.
        faces: usize,
    },
}

/// Result type for unit construction.
pub type Result<T> = std::result::Result<T, UnitError>;
