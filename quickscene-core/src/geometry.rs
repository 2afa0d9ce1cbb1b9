//! Geometry containers and primitive shape constructors

use crate::color::Color;
use crate::{Point3f, Vector3f};
use serde::{Deserialize, Serialize};

/// Vertex data for a renderable object
///
/// Positions are mandatory; indices, normals and per-vertex colors are
/// optional and consumed by the renderer when present. The unit cube is the
/// default geometry substituted by every facade factory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub positions: Vec<Point3f>,
    pub indices: Option<Vec<u32>>,
    pub normals: Option<Vec<Vector3f>>,
    pub colors: Option<Vec<Color>>,
}

impl Geometry {
    /// Create an empty geometry
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            indices: None,
            normals: None,
            colors: None,
        }
    }

    /// Create a geometry from raw positions
    pub fn from_positions(positions: Vec<Point3f>) -> Self {
        Self {
            positions,
            indices: None,
            normals: None,
            colors: None,
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether the geometry carries no vertices
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Set per-vertex colors; ignored if the length does not match
    pub fn set_colors(&mut self, colors: Vec<Color>) {
        if colors.len() == self.positions.len() {
            self.colors = Some(colors);
        }
    }

    /// An axis-aligned cube with edge length 1, centered at the origin
    pub fn unit_cube() -> Self {
        Self::cuboid(1.0, 1.0, 1.0)
    }

    /// An axis-aligned box centered at the origin
    ///
    /// Built as 24 vertices so each face gets its own normal.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);

        // (face normal, four corners counter-clockwise seen from outside)
        let faces: [(Vector3f, [Point3f; 4]); 6] = [
            (
                Vector3f::new(0.0, 0.0, 1.0),
                [
                    Point3f::new(-x, -y, z),
                    Point3f::new(x, -y, z),
                    Point3f::new(x, y, z),
                    Point3f::new(-x, y, z),
                ],
            ),
            (
                Vector3f::new(0.0, 0.0, -1.0),
                [
                    Point3f::new(x, -y, -z),
                    Point3f::new(-x, -y, -z),
                    Point3f::new(-x, y, -z),
                    Point3f::new(x, y, -z),
                ],
            ),
            (
                Vector3f::new(1.0, 0.0, 0.0),
                [
                    Point3f::new(x, -y, z),
                    Point3f::new(x, -y, -z),
                    Point3f::new(x, y, -z),
                    Point3f::new(x, y, z),
                ],
            ),
            (
                Vector3f::new(-1.0, 0.0, 0.0),
                [
                    Point3f::new(-x, -y, -z),
                    Point3f::new(-x, -y, z),
                    Point3f::new(-x, y, z),
                    Point3f::new(-x, y, -z),
                ],
            ),
            (
                Vector3f::new(0.0, 1.0, 0.0),
                [
                    Point3f::new(-x, y, z),
                    Point3f::new(x, y, z),
                    Point3f::new(x, y, -z),
                    Point3f::new(-x, y, -z),
                ],
            ),
            (
                Vector3f::new(0.0, -1.0, 0.0),
                [
                    Point3f::new(-x, -y, -z),
                    Point3f::new(x, -y, -z),
                    Point3f::new(x, -y, z),
                    Point3f::new(-x, -y, z),
                ],
            ),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, corners) in faces {
            let base = positions.len() as u32;
            positions.extend_from_slice(&corners);
            normals.extend(std::iter::repeat(normal).take(4));
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            positions,
            indices: Some(indices),
            normals: Some(normals),
            colors: None,
        }
    }

    /// A UV sphere centered at the origin
    pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut indices = Vec::new();

        for ring in 0..=rings {
            let phi = std::f32::consts::PI * ring as f32 / rings as f32;
            for segment in 0..=segments {
                let theta = 2.0 * std::f32::consts::PI * segment as f32 / segments as f32;
                let normal = Vector3f::new(
                    phi.sin() * theta.cos(),
                    phi.cos(),
                    phi.sin() * theta.sin(),
                );
                positions.push(Point3f::from(normal * radius));
                normals.push(normal);
            }
        }

        let stride = segments + 1;
        for ring in 0..rings {
            for segment in 0..segments {
                let a = ring * stride + segment;
                let b = a + stride;
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }

        Self {
            positions,
            indices: Some(indices),
            normals: Some(normals),
            colors: None,
        }
    }

    /// A flat rectangle in the XY plane, facing +Z
    pub fn plane(width: f32, height: f32) -> Self {
        let (x, y) = (width / 2.0, height / 2.0);
        Self {
            positions: vec![
                Point3f::new(-x, -y, 0.0),
                Point3f::new(x, -y, 0.0),
                Point3f::new(x, y, 0.0),
                Point3f::new(-x, y, 0.0),
            ],
            indices: Some(vec![0, 1, 2, 0, 2, 3]),
            normals: Some(vec![Vector3f::new(0.0, 0.0, 1.0); 4]),
            colors: None,
        }
    }

    /// A polyline through the given points, in order
    pub fn line_strip(points: Vec<Point3f>) -> Self {
        Self::from_positions(points)
    }

    /// Disjoint line segments from endpoint pairs
    pub fn segments(pairs: Vec<[Point3f; 2]>) -> Self {
        let mut positions = Vec::with_capacity(pairs.len() * 2);
        for [a, b] in pairs {
            positions.push(a);
            positions.push(b);
        }
        Self::from_positions(positions)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_has_one_normal_per_vertex() {
        let cube = Geometry::unit_cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.normals.as_ref().unwrap().len(), 24);
        assert_eq!(cube.indices.as_ref().unwrap().len(), 36);
    }

    #[test]
    fn unit_cube_extent_is_one() {
        let cube = Geometry::unit_cube();
        for p in &cube.positions {
            assert!(p.x.abs() <= 0.5 && p.y.abs() <= 0.5 && p.z.abs() <= 0.5);
        }
        assert!(cube.positions.iter().any(|p| p.x == 0.5));
        assert!(cube.positions.iter().any(|p| p.x == -0.5));
    }

    #[test]
    fn sphere_normals_are_unit_length() {
        let sphere = Geometry::uv_sphere(2.0, 8, 6);
        for n in sphere.normals.as_ref().unwrap() {
            assert!((n.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn sphere_indices_stay_in_bounds() {
        let sphere = Geometry::uv_sphere(1.0, 12, 8);
        let count = sphere.vertex_count() as u32;
        for &i in sphere.indices.as_ref().unwrap() {
            assert!(i < count);
        }
    }

    #[test]
    fn segments_flatten_pairs() {
        let geom = Geometry::segments(vec![
            [Point3f::origin(), Point3f::new(1.0, 0.0, 0.0)],
            [Point3f::origin(), Point3f::new(0.0, 1.0, 0.0)],
        ]);
        assert_eq!(geom.vertex_count(), 4);
    }

    #[test]
    fn mismatched_colors_are_rejected() {
        let mut geom = Geometry::plane(1.0, 1.0);
        geom.set_colors(vec![Color::RED; 3]);
        assert!(geom.colors.is_none());
        geom.set_colors(vec![Color::RED; 4]);
        assert!(geom.colors.is_some());
    }
}
