//! Output records: triangles and edge units.

use serde::{Deserialize, Serialize};
use sonobe_math::{triangle_area, Point3};

/// One renderable triangle, as a plain 3D point triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// First corner.
    pub a: Point3,
    /// Second corner.
    pub b: Point3,
    /// Third corner.
    pub c: Point3,
}

impl Triangle {
    /// Create a triangle from three corners.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { a, b, c }
    }

    /// Area of the triangle.
    pub fn area(&self) -> f64 {
        triangle_area(&self.a, &self.b, &self.c)
    }
}

/// The four triangles of one folding unit, immutable once built.
///
/// Body triangles span the ridge-offset edge to the two adjacent pyramid
/// apexes; tab triangles are rooted at the ridge endpoints and fold inward
/// toward the respective adjacent face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeUnit {
    /// The host edge as a sorted `(min, max)` vertex-index pair.
    pub edge: (usize, usize),
    /// Body triangles toward the two adjacent face apexes.
    pub body: [Triangle; 2],
    /// Tab triangles, one per edge endpoint.
    pub tabs: [Triangle; 2],
}

impl EdgeUnit {
    /// Iterate over all four triangles, bodies first.
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.body.iter().chain(self.tabs.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_area() {
        let t = Triangle::new(
            Point3::origin(),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        );
        assert!((t.area() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_triangle_iteration_order() {
        let t = Triangle::new(Point3::origin(), Point3::origin(), Point3::origin());
        let unit = EdgeUnit {
            edge: (0, 1),
            body: [t, t],
            tabs: [t, t],
        };
        assert_eq!(unit.triangles().count(), 4);
    }
}
