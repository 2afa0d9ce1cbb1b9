//! Mouse-driven orbit camera controls
//!
//! Left drag orbits around the target, right drag pans the target in the
//! view plane, the wheel zooms. Input accumulates into velocities that decay
//! each frame, giving damped motion without any per-event camera math.

use quickscene_core::{PerspectiveCamera, Point3f, Vector3f};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Damped orbit/pan/zoom controller mutating a [`PerspectiveCamera`]
pub struct OrbitControls {
    target: Point3f,
    distance: f32,
    yaw: f32,
    pitch: f32,

    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
    pan_x: f32,
    pan_y: f32,

    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    /// Per-frame velocity retention in `(0, 1)`; lower means snappier stops
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enabled: bool,

    left_down: bool,
    right_down: bool,
    last_cursor: Option<(f64, f64)>,
}

const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

impl OrbitControls {
    /// A controller whose initial orbit matches the camera's current pose
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.norm().max(0.01);
        Self {
            target: camera.target,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
            pan_x: 0.0,
            pan_y: 0.0,
            rotate_speed: 0.005,
            pan_speed: 0.002,
            zoom_speed: 0.1,
            damping: 0.85,
            min_distance: 0.05,
            max_distance: 500.0,
            enabled: true,
            left_down: false,
            right_down: false,
            last_cursor: None,
        }
    }

    /// The point the camera orbits around
    pub fn target(&self) -> Point3f {
        self.target
    }

    pub fn set_target(&mut self, target: Point3f) {
        self.target = target;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Feed one window event; returns whether the controller consumed it
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        if !self.enabled {
            return false;
        }
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.left_down = pressed,
                    MouseButton::Right => self.right_down = pressed,
                    _ => return false,
                }
                if !pressed {
                    self.last_cursor = None;
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current = (position.x, position.y);
                if let Some((lx, ly)) = self.last_cursor {
                    let dx = (current.0 - lx) as f32;
                    let dy = (current.1 - ly) as f32;
                    if self.left_down {
                        self.yaw_velocity -= dx * self.rotate_speed;
                        self.pitch_velocity += dy * self.rotate_speed;
                    } else if self.right_down {
                        self.pan_x -= dx * self.pan_speed * self.distance;
                        self.pan_y += dy * self.pan_speed * self.distance;
                    }
                }
                if self.left_down || self.right_down {
                    self.last_cursor = Some(current);
                    true
                } else {
                    false
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.zoom_velocity += scroll * self.zoom_speed;
                true
            }
            _ => false,
        }
    }

    /// Apply accumulated input to the camera and decay the velocities
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        if !self.enabled {
            return;
        }
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-MAX_PITCH, MAX_PITCH);
        self.distance =
            (self.distance * (1.0 - self.zoom_velocity)).clamp(self.min_distance, self.max_distance);

        if self.pan_x != 0.0 || self.pan_y != 0.0 {
            let forward = (self.target - camera.position).normalize();
            let right = forward.cross(&camera.up).normalize();
            let up = right.cross(&forward);
            self.target += right * self.pan_x + up * self.pan_y;
        }

        self.yaw_velocity *= self.damping;
        self.pitch_velocity *= self.damping;
        self.zoom_velocity *= self.damping;
        self.pan_x = 0.0;
        self.pan_y = 0.0;

        let offset = Vector3f::new(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        );
        camera.position = self.target + offset;
        camera.target = self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::with_aspect(1.0)
    }

    #[test]
    fn from_camera_recovers_the_standoff() {
        let camera = camera();
        let controls = OrbitControls::from_camera(&camera);
        assert_relative_eq!(controls.distance(), 5.0);
        assert_relative_eq!(controls.target().coords.norm(), 0.0);
    }

    #[test]
    fn update_without_input_keeps_the_pose() {
        let mut camera = camera();
        let mut controls = OrbitControls::from_camera(&camera);
        controls.update(&mut camera);
        assert_relative_eq!(camera.position.z, 5.0, epsilon = 1e-5);
        assert_relative_eq!(camera.position.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn orbit_preserves_distance_to_target() {
        let mut camera = camera();
        let mut controls = OrbitControls::from_camera(&camera);
        controls.yaw_velocity = 0.3;
        controls.pitch_velocity = 0.1;
        for _ in 0..10 {
            controls.update(&mut camera);
        }
        let distance = (camera.position - camera.target).norm();
        assert_relative_eq!(distance, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn zoom_respects_min_distance() {
        let mut camera = camera();
        let mut controls = OrbitControls::from_camera(&camera);
        for _ in 0..100 {
            controls.zoom_velocity = 0.9;
            controls.update(&mut camera);
        }
        assert!((camera.position - camera.target).norm() >= controls.min_distance - 1e-6);
    }

    #[test]
    fn disabled_controller_ignores_events() {
        let mut camera = camera();
        let mut controls = OrbitControls::from_camera(&camera);
        controls.enabled = false;
        let consumed = controls.handle_event(&WindowEvent::MouseWheel {
            device_id: unsafe { winit::event::DeviceId::dummy() },
            delta: MouseScrollDelta::LineDelta(0.0, 1.0),
            phase: winit::event::TouchPhase::Moved,
        });
        assert!(!consumed);
        controls.update(&mut camera);
        assert_relative_eq!(camera.position.z, 5.0, epsilon = 1e-5);
    }
}
