//! 3D transformation utilities for scene nodes

use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D transformation stored as a homogeneous 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a translation from individual components
    pub fn translation_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::translation(Vector3::new(x, y, z))
    }

    /// Create a rotation transformation from a quaternion
    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Create a non-uniform scaling transformation
    pub fn scaling(scale: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&scale),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Apply the transformation to a direction vector (no translation)
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }

    /// The translation component
    pub fn position(&self) -> Point3<f32> {
        Point3::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    /// Overwrite the translation component in place
    pub fn set_position(&mut self, position: Point3<f32>) {
        self.matrix[(0, 3)] = position.x;
        self.matrix[(1, 3)] = position.y;
        self.matrix[(2, 3)] = position.z;
    }

    /// Compose this transformation with another (self applied after `other`)
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Get the inverse transformation, if it exists
    pub fn inverse(self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn translation_moves_points() {
        let t = Transform3D::translation_xyz(1.0, 2.0, 3.0);
        let p = t.transform_point(&Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 3.0);
    }

    #[test]
    fn vectors_ignore_translation() {
        let t = Transform3D::translation_xyz(5.0, 5.0, 5.0);
        let v = t.transform_vector(&Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(v.y, 1.0);
        assert_relative_eq!(v.x, 0.0);
    }

    #[test]
    fn compose_applies_right_to_left() {
        let scale = Transform3D::uniform_scaling(2.0);
        let shift = Transform3D::translation_xyz(1.0, 0.0, 0.0);
        let p = (shift * scale).transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 3.0);
    }

    #[test]
    fn position_roundtrip() {
        let mut t = Transform3D::identity();
        t.set_position(Point3::new(4.0, -1.0, 2.5));
        assert_eq!(t.position(), Point3::new(4.0, -1.0, 2.5));
    }
}
