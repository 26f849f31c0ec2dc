#![warn(missing_docs)]

//! Edge-unit triangle construction for the sonobe kernel.
//!
//! One Sonobe-family folding unit sits on every edge of the host polyhedron:
//! two *body* triangles spanning the (slightly offset) edge to the apexes of
//! the two adjacent face pyramids, and two *tab* triangles, one rooted at
//! each endpoint, that tuck into the neighboring units' pockets.
//!
//! Two construction paths, deliberately kept separate:
//!
//! - [`builder`] — the exact path for closed regular solids, consuming
//!   closed-form face apexes and requiring 2-manifold adjacency.
//! - [`import`] — the tolerant path for arbitrary imported meshes, with a
//!   heuristic apex height and boundary-edge fallback.

mod error;
mod types;

pub mod builder;
pub mod import;

pub use builder::{build_units, MIN_TRIANGLE_AREA};
pub use error::{Result, UnitError};
pub use import::{build_units_from_mesh, fit_to_radius};
pub use types::{EdgeUnit, Triangle};
