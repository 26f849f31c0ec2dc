#![warn(missing_docs)]

//! Edge-unit modular origami geometry kernel.
//!
//! Generates the 3D geometry of Sonobe-family assemblies: one 4-triangle
//! folding unit per edge of a host polyhedron. The host can be supplied
//! three ways, all ending in the same closed-form construction:
//!
//! - explicit vertices + face loops;
//! - a bare point cloud, faces recovered by half-edge traversal
//!   ([`sonobe_topo::resolve`]);
//! - a bare point cloud plus analytic face normals, faces recovered by
//!   projection grouping ([`sonobe_topo::normal_group`]).
//!
//! Arbitrary imported meshes take a fourth, heuristic path
//! ([`sonobe_unit::import`]) that tolerates open boundaries and irregular
//! faces.
//!
//! # Example
//!
//! ```
//! use sonobe::{Assembly, ReferenceSolid};
//!
//! let assembly = ReferenceSolid::Icosahedron.assemble(0.7, 0.04).unwrap();
//! assert_eq!(assembly.units.len(), 30);
//! ```

pub use sonobe_geom;
pub use sonobe_math;
pub use sonobe_solids;
pub use sonobe_topo;
pub use sonobe_unit;

use sonobe_geom::{face_apex, FaceApex, GeometryWarning};
use sonobe_math::{Point3, Vec3};
use sonobe_topo::{normal_group, resolve, Polyhedron};
use sonobe_unit::{build_units, build_units_from_mesh, EdgeUnit};

pub use sonobe_unit::{Result, UnitError};

/// A complete edge-unit assembly: the final renderable geometry plus any
/// non-fatal warnings gathered while deriving it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// One unit per unique edge of the host polyhedron.
    pub units: Vec<EdgeUnit>,
    /// Non-fatal anomalies (e.g. flattened apexes); empty on clean input.
    pub warnings: Vec<GeometryWarning>,
}

impl Assembly {
    /// Build units for an explicit polyhedron.
    ///
    /// The reference edge length is taken from the first edge of the first
    /// face, matching the single-edge-class convention of the closed-form
    /// path.
    pub fn from_polyhedron(poly: &Polyhedron, ridge_frac: f64) -> Result<Self> {
        if poly.faces.len() < 4 {
            return Err(sonobe_topo::TopologyError::TooFewFaces {
                count: poly.faces.len(),
            }
            .into());
        }
        let f0 = &poly.faces[0];
        let edge_length = (poly.vertices[f0[1]] - poly.vertices[f0[0]]).norm();
        Self::from_polyhedron_with_edge_length(poly, edge_length, ridge_frac)
    }

    /// Build units for an explicit polyhedron with an explicit reference
    /// edge length.
    pub fn from_polyhedron_with_edge_length(
        poly: &Polyhedron,
        edge_length: f64,
        ridge_frac: f64,
    ) -> Result<Self> {
        let mut warnings = Vec::new();
        let apexes: Vec<FaceApex> = poly
            .faces
            .iter()
            .enumerate()
            .map(|(fi, loop_)| {
                let apex = face_apex(&poly.vertices, loop_, fi, edge_length)?;
                if apex.clipped {
                    warnings.push(GeometryWarning::ApexFlattened { face: fi });
                }
                Ok(apex)
            })
            .collect::<Result<_>>()?;

        let units = build_units(poly, &apexes, edge_length, ridge_frac)?;
        Ok(Self { units, warnings })
    }

    /// Recover faces from a bare point cloud by half-edge traversal, then
    /// build units.
    pub fn from_points(points: &[Point3], ridge_frac: f64) -> Result<Self> {
        let faces = resolve::resolve_faces(points)?;
        let poly = Polyhedron::new(points.to_vec(), faces)?;
        Self::from_polyhedron(&poly, ridge_frac)
    }

    /// Recover faces from a point cloud by projection onto analytic normals,
    /// then build units.
    pub fn from_points_with_normals(
        points: &[Point3],
        normals: &[Vec3],
        ridge_frac: f64,
    ) -> Result<Self> {
        let faces = normal_group::group_faces(points, normals)?;
        let poly = Polyhedron::new(points.to_vec(), faces)?;
        Self::from_polyhedron(&poly, ridge_frac)
    }

    /// Build units for an arbitrary imported mesh via the heuristic path.
    ///
    /// Tolerates open boundaries; emits no warnings (the heuristic path has
    /// no closed-form height to clip).
    pub fn from_mesh(
        vertices: &[Point3],
        faces: &[Vec<usize>],
        scale: f64,
        ridge_frac: f64,
    ) -> Result<Self> {
        let units = build_units_from_mesh(vertices, faces, scale, ridge_frac)?;
        Ok(Self {
            units,
            warnings: Vec::new(),
        })
    }
}

/// The reference solids shipped with the kernel, each wired to the
/// face-recovery strategy that suits its edge-length structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSolid {
    /// 6 faces, 12 edges. Explicit face list.
    Cube,
    /// 8 faces, 12 edges. Explicit face list.
    Octahedron,
    /// 20 faces, 30 edges. Explicit face list.
    Icosahedron,
    /// 32 faces, 60 edges. Point cloud, faces recovered by traversal.
    Icosidodecahedron,
    /// 32 faces, 90 edges. Point cloud + analytic normals.
    TruncatedIcosahedron,
    /// 62 faces, 120 edges. Point cloud + analytic normals.
    Rhombicosidodecahedron,
    /// 180 faces, 270 edges. Explicit face list (frequency-3 subdivision).
    GeodesicIcosahedron,
}

impl ReferenceSolid {
    /// Build the assembly for this solid at the given scale.
    pub fn assemble(self, scale: f64, ridge_frac: f64) -> Result<Assembly> {
        match self {
            Self::Cube => Assembly::from_polyhedron(&sonobe_solids::cube(scale), ridge_frac),
            Self::Octahedron => {
                Assembly::from_polyhedron(&sonobe_solids::octahedron(scale), ridge_frac)
            }
            Self::Icosahedron => {
                Assembly::from_polyhedron(&sonobe_solids::icosahedron(scale), ridge_frac)
            }
            Self::Icosidodecahedron => Assembly::from_points(
                &sonobe_solids::icosidodecahedron_points(scale),
                ridge_frac,
            ),
            Self::TruncatedIcosahedron => Assembly::from_points_with_normals(
                &sonobe_solids::truncated_icosahedron_points(scale),
                &sonobe_solids::truncated_icosahedron_normals(),
                ridge_frac,
            ),
            Self::Rhombicosidodecahedron => Assembly::from_points_with_normals(
                &sonobe_solids::rhombicosidodecahedron_points(scale),
                &sonobe_solids::rhombicosidodecahedron_normals(),
                ridge_frac,
            ),
            Self::GeodesicIcosahedron => {
                Assembly::from_polyhedron(&sonobe_solids::geodesic_icosahedron(scale), ridge_frac)
            }
        }
    }

    /// Ridge-offset fraction that renders well for this solid (denser
    /// assemblies want slimmer ridges).
    pub fn default_ridge_frac(self) -> f64 {
        match self {
            Self::Cube => 0.06,
            Self::Octahedron => 0.06,
            Self::Icosahedron => 0.04,
            Self::Icosidodecahedron => 0.03,
            Self::TruncatedIcosahedron => 0.02,
            Self::Rhombicosidodecahedron => 0.015,
            Self::GeodesicIcosahedron => 0.01,
        }
    }

    /// Number of edges, i.e. the number of paper units to fold.
    pub fn unit_count(self) -> usize {
        match self {
            Self::Cube => 12,
            Self::Octahedron => 12,
            Self::Icosahedron => 30,
            Self::Icosidodecahedron => 60,
            Self::TruncatedIcosahedron => 90,
            Self::Rhombicosidodecahedron => 120,
            Self::GeodesicIcosahedron => 270,
        }
    }
}
