//! Perspective camera

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

/// A perspective camera looking from `position` toward `target`
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    /// Default vertical field of view (75 degrees)
    pub const DEFAULT_FOV_Y: f32 = 75.0 * std::f32::consts::PI / 180.0;

    /// Default camera standoff along +Z so default-sized objects are visible
    pub const DEFAULT_STANDOFF: f32 = 5.0;

    /// Create a camera with explicit parameters
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up: Vector3::y(),
            fov_y,
            aspect,
            near,
            far,
        }
    }

    /// The default camera for a surface with the given aspect ratio
    pub fn with_aspect(aspect: f32) -> Self {
        Self::new(
            Point3::new(0.0, 0.0, Self::DEFAULT_STANDOFF),
            Point3::origin(),
            Self::DEFAULT_FOV_Y,
            aspect,
            0.01,
            1000.0,
        )
    }

    /// Update the aspect ratio, typically after a surface resize
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Perspective3::new(self.aspect, self.fov_y, self.near, self.far).into_inner()
    }

    /// Combined projection * view matrix
    pub fn view_proj(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Direction from the camera to its target
    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.position).normalize()
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::with_aspect(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_camera_sits_at_standoff() {
        let camera = PerspectiveCamera::default();
        assert_relative_eq!(camera.position.z, 5.0);
        assert_relative_eq!(camera.near, 0.01);
        assert_relative_eq!(camera.far, 1000.0);
    }

    #[test]
    fn set_aspect_feeds_projection() {
        let mut camera = PerspectiveCamera::default();
        camera.set_aspect(2.0);
        let wide = camera.projection_matrix();
        camera.set_aspect(1.0);
        let square = camera.projection_matrix();
        // Horizontal scale shrinks as the aspect ratio grows.
        assert!(wide[(0, 0)] < square[(0, 0)]);
    }

    #[test]
    fn forward_points_at_target() {
        let camera = PerspectiveCamera::default();
        assert_relative_eq!(camera.forward().z, -1.0, epsilon = 1e-6);
    }
}
