#![warn(missing_docs)]

//! Polyhedron topology for the sonobe kernel.
//!
//! Provides the shared combinatorial model (vertex list + ordered face loops,
//! with edges derived rather than stored) and two face-recovery strategies for
//! inputs that arrive as bare point clouds:
//!
//! 1. [`resolve::resolve_faces`] — nearest-neighbor edge detection followed by
//!    a half-edge walk over cyclically sorted vertex neighborhoods. Works for
//!    solids with a single dominant edge-length class.
//! 2. [`normal_group::group_faces`] — groups vertices by maximal projection
//!    onto analytically known face normals. Works for solids with several
//!    edge-length classes, where the distance heuristic breaks down.
//!
//! Both strategies require the solid to be centered at the origin and
//! star-shaped from it; outward directions are derived as `normalize(p)`.

mod error;
mod polyhedron;

pub mod normal_group;
pub mod resolve;

pub use error::{Result, TopologyError};
pub use polyhedron::{EdgeKey, FaceLoop, Polyhedron};
