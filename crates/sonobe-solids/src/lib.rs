#![warn(missing_docs)]

//! Reference polyhedra for the sonobe kernel.
//!
//! The solids the assembly pipeline is exercised against, all centered at
//! the origin as the kernel's outward-normal convention requires:
//!
//! - [`cube`], [`octahedron`], [`icosahedron`], [`geodesic_icosahedron`] —
//!   with known face lists;
//! - [`icosidodecahedron_points`] — bare point cloud with a single edge
//!   length class, recoverable by half-edge traversal;
//! - [`rhombicosidodecahedron_points`] / [`rhombicosidodecahedron_normals`]
//!   and [`truncated_icosahedron_points`] / [`truncated_icosahedron_normals`]
//!   — point clouds with several edge-length classes plus the analytic
//!   normal families needed to group their faces.
//!
//! The normal families all derive from the icosahedron seed: vertex
//! directions, face-centroid directions, and edge-midpoint directions.
//! Every point cloud here is generated in that same seed's frame, so the
//! candidate normals and the clouds they group always agree.

use std::collections::HashMap;

use sonobe_math::{Point3, Tolerance, Vec3};
use sonobe_topo::{EdgeKey, Polyhedron};

/// Golden ratio.
fn phi() -> f64 {
    (1.0 + 5.0_f64.sqrt()) / 2.0
}

/// Cube with vertices at `(+-s, +-s, +-s)`: 8 vertices, 6 faces, 12 edges.
pub fn cube(s: f64) -> Polyhedron {
    let vertices = vec![
        Point3::new(-s, -s, -s),
        Point3::new(s, -s, -s),
        Point3::new(s, s, -s),
        Point3::new(-s, s, -s),
        Point3::new(-s, -s, s),
        Point3::new(s, -s, s),
        Point3::new(s, s, s),
        Point3::new(-s, s, s),
    ];
    // Outward-consistent winding, viewed from outside each face.
    let faces = vec![
        vec![0, 3, 2, 1], // z = -s
        vec![4, 5, 6, 7], // z = +s
        vec![0, 1, 5, 4], // y = -s
        vec![2, 3, 7, 6], // y = +s
        vec![1, 2, 6, 5], // x = +s
        vec![0, 4, 7, 3], // x = -s
    ];
    Polyhedron::new(vertices, faces).expect("cube data is a valid polyhedron")
}

/// Regular octahedron with vertices at distance `s` on the axes:
/// 6 vertices, 8 faces, 12 edges.
pub fn octahedron(s: f64) -> Polyhedron {
    let vertices = vec![
        Point3::new(s, 0.0, 0.0),
        Point3::new(-s, 0.0, 0.0),
        Point3::new(0.0, s, 0.0),
        Point3::new(0.0, -s, 0.0),
        Point3::new(0.0, 0.0, s),
        Point3::new(0.0, 0.0, -s),
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
    Polyhedron::new(vertices, faces).expect("octahedron data is a valid polyhedron")
}

/// Regular icosahedron scaled by `s`: 12 vertices, 20 faces, 30 edges.
pub fn icosahedron(s: f64) -> Polyhedron {
    let p = phi();
    let raw = [
        [-1.0, p, 0.0],
        [1.0, p, 0.0],
        [-1.0, -p, 0.0],
        [1.0, -p, 0.0],
        [0.0, -1.0, p],
        [0.0, 1.0, p],
        [0.0, -1.0, -p],
        [0.0, 1.0, -p],
        [p, 0.0, -1.0],
        [p, 0.0, 1.0],
        [-p, 0.0, -1.0],
        [-p, 0.0, 1.0],
    ];
    let vertices = raw
        .iter()
        .map(|v| Point3::new(v[0] * s, v[1] * s, v[2] * s))
        .collect();
    let faces = vec![
        vec![0, 11, 5],
        vec![0, 5, 1],
        vec![0, 1, 7],
        vec![0, 7, 10],
        vec![0, 10, 11],
        vec![1, 5, 9],
        vec![5, 11, 4],
        vec![11, 10, 2],
        vec![10, 7, 6],
        vec![7, 1, 8],
        vec![3, 9, 4],
        vec![3, 4, 2],
        vec![3, 2, 6],
        vec![3, 6, 8],
        vec![3, 8, 9],
        vec![4, 9, 5],
        vec![2, 4, 11],
        vec![6, 2, 10],
        vec![8, 6, 7],
        vec![9, 8, 1],
    ];
    Polyhedron::new(vertices, faces).expect("icosahedron data is a valid polyhedron")
}

/// Frequency-3 geodesic subdivision of the icosahedron, projected onto its
/// circumsphere and scaled by `s`: 92 vertices, 180 faces, 270 edges.
///
/// Vertex layout: the 12 seed vertices first, then two trisection points per
/// seed edge (nearer endpoint first), then the 20 face centroids. Each seed
/// face subdivides into 9 triangles.
pub fn geodesic_icosahedron(s: f64) -> Polyhedron {
    let ico = icosahedron(1.0);
    let edges = ico.edges();
    let edge_index: HashMap<EdgeKey, usize> =
        edges.iter().enumerate().map(|(i, &e)| (e, i)).collect();

    let mut raw: Vec<Vec3> = ico.vertices.iter().map(|p| p.coords).collect();
    for e in &edges {
        let a = ico.vertices[e.a].coords;
        let b = ico.vertices[e.b].coords;
        raw.push(a + (b - a) / 3.0);
        raw.push(a + (b - a) * 2.0 / 3.0);
    }
    for fi in 0..ico.faces.len() {
        raw.push(ico.face_centroid(fi).coords);
    }

    let sphere_r = ico.vertices[0].coords.norm();
    let vertices: Vec<Point3> = raw
        .iter()
        .map(|v| Point3::from(v / v.norm() * sphere_r * s))
        .collect();

    let centroid_base = 12 + 2 * edges.len();
    // Map barycentric coordinates (i, j, k), i + j + k = 3, on seed face
    // `fi` with corners (a, b, c) to a subdivision vertex index.
    let vert_at = |fi: usize, (a, b, c): (usize, usize, usize), i: usize, j: usize, k: usize| {
        if i == 3 {
            return a;
        }
        if j == 3 {
            return b;
        }
        if k == 3 {
            return c;
        }
        if i == 1 && j == 1 && k == 1 {
            return centroid_base + fi;
        }
        // On a seed edge: (u, v) with t thirds of the way from u to v.
        let (u, v, t) = if k == 0 {
            (a, b, j)
        } else if j == 0 {
            (a, c, k)
        } else {
            (b, c, k)
        };
        let ei = edge_index[&EdgeKey::new(u, v)];
        let t_from_a = if edges[ei].a == u { t } else { 3 - t };
        12 + 2 * ei + if t_from_a == 1 { 0 } else { 1 }
    };

    let mut faces = Vec::with_capacity(9 * ico.faces.len());
    for (fi, loop_) in ico.faces.iter().enumerate() {
        let abc = (loop_[0], loop_[1], loop_[2]);
        // Upward triangles of the subdivision grid.
        for i in (1..=3).rev() {
            for j in 0..=(3 - i) {
                let k = 3 - i - j;
                faces.push(vec![
                    vert_at(fi, abc, i, j, k),
                    vert_at(fi, abc, i - 1, j + 1, k),
                    vert_at(fi, abc, i - 1, j, k + 1),
                ]);
            }
        }
        // Downward (inverted) triangles.
        for i in (0..=2).rev() {
            for j in 1..=(3 - i) {
                let k = 3 - i - j;
                if k >= 1 {
                    faces.push(vec![
                        vert_at(fi, abc, i, j, k),
                        vert_at(fi, abc, i + 1, j - 1, k),
                        vert_at(fi, abc, i + 1, j, k - 1),
                    ]);
                }
            }
        }
    }
    Polyhedron::new(vertices, faces).expect("geodesic subdivision is a valid polyhedron")
}

/// Icosidodecahedron point cloud (30 points, the icosahedron's edge
/// midpoints), scaled by `s`.
///
/// Quasiregular: a single edge-length class, so its 20 triangles and 12
/// pentagons are recoverable by half-edge traversal alone.
pub fn icosidodecahedron_points(s: f64) -> Vec<Point3> {
    let ico = icosahedron(1.0);
    ico.edges()
        .iter()
        .map(|e| {
            let m = (ico.vertices[e.a].coords + ico.vertices[e.b].coords) / 2.0;
            Point3::from(m * s)
        })
        .collect()
}

/// Rhombicosidodecahedron point cloud (60 points), scaled by `s`.
///
/// Built from the coordinate triples `(+-1, +-1, +-phi^3)`,
/// `(+-phi^2, +-phi, +-2 phi)`, `(+-(2+phi), 0, +-phi^2)`. The textbook
/// construction takes their even permutations; that solid sits in the frame
/// mirrored (y/z swapped) against the icosahedron seed the candidate normals
/// derive from, so the odd permutations are used here instead. Same solid,
/// reflected into the seed's frame.
pub fn rhombicosidodecahedron_points(s: f64) -> Vec<Point3> {
    let p = phi();
    let p2 = p + 1.0;
    let p3 = 2.0 * p + 1.0;

    let mut raw: Vec<Point3> = Vec::new();
    for &(a, b, c) in &[(1.0, 1.0, p3), (p2, p, 2.0 * p), (2.0 + p, 0.0, p2)] {
        for (x, y, z) in [(a, c, b), (b, a, c), (c, b, a)] {
            for sx in signs(x) {
                for sy in signs(y) {
                    for sz in signs(z) {
                        raw.push(Point3::new(sx * x, sy * y, sz * z));
                    }
                }
            }
        }
    }

    // Sign enumeration can repeat a point when coordinates coincide.
    let tol = Tolerance::DEFAULT;
    let mut unique: Vec<Point3> = Vec::new();
    for pt in raw {
        if !unique.iter().any(|q| tol.points_equal(&pt, q)) {
            unique.push(pt);
        }
    }
    unique
        .into_iter()
        .map(|pt| Point3::from(pt.coords * s))
        .collect()
}

fn signs(x: f64) -> Vec<f64> {
    if x == 0.0 {
        vec![1.0]
    } else {
        vec![1.0, -1.0]
    }
}

/// The 62 candidate face normals of the rhombicosidodecahedron:
/// 20 triangle normals (icosahedron face centroids), 30 square normals
/// (icosahedron edge midpoints), 12 pentagon normals (icosahedron vertices).
pub fn rhombicosidodecahedron_normals() -> Vec<Vec3> {
    let ico = icosahedron(1.0);
    let mut normals = Vec::with_capacity(62);
    normals.extend(face_centroid_directions(&ico));
    normals.extend(edge_midpoint_directions(&ico));
    normals.extend(vertex_directions(&ico));
    normals
}

/// Truncated icosahedron point cloud (60 points, the icosahedron's edges
/// trisected), scaled by `s`.
///
/// Two edge-length classes (pentagon edges vs. hexagon-hexagon edges), so
/// face recovery needs the analytic normals, not the distance heuristic.
pub fn truncated_icosahedron_points(s: f64) -> Vec<Point3> {
    let ico = icosahedron(1.0);
    let mut points = Vec::with_capacity(60);
    for e in ico.edges() {
        let a = ico.vertices[e.a].coords;
        let b = ico.vertices[e.b].coords;
        points.push(Point3::from((a + (b - a) / 3.0) * s));
        points.push(Point3::from((a + (b - a) * 2.0 / 3.0) * s));
    }
    points
}

/// The 32 candidate face normals of the truncated icosahedron:
/// 12 pentagon normals (icosahedron vertices), 20 hexagon normals
/// (icosahedron face centroids).
pub fn truncated_icosahedron_normals() -> Vec<Vec3> {
    let ico = icosahedron(1.0);
    let mut normals = Vec::with_capacity(32);
    normals.extend(vertex_directions(&ico));
    normals.extend(face_centroid_directions(&ico));
    normals
}

fn vertex_directions(poly: &Polyhedron) -> Vec<Vec3> {
    poly.vertices.iter().map(|v| v.coords).collect()
}

fn face_centroid_directions(poly: &Polyhedron) -> Vec<Vec3> {
    (0..poly.faces.len())
        .map(|fi| poly.face_centroid(fi).coords)
        .collect()
}

fn edge_midpoint_directions(poly: &Polyhedron) -> Vec<Vec3> {
    poly.edges()
        .iter()
        .map(|e| (poly.vertices[e.a].coords + poly.vertices[e.b].coords) / 2.0)
        .collect()
}
