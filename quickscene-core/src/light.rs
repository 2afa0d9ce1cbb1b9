//! Light sources

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// The kind of a light source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightKind {
    /// Cone light; `angle` is the half-angle of the cone in radians
    Spot { angle: f32 },
    /// Omnidirectional light at the node position
    Point,
    /// Parallel light along the node's -Z axis
    Directional,
    /// Uniform ambient term, position-independent
    Ambient,
}

/// A light source attached to a scene node
///
/// Position and orientation come from the owning node's transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    /// A white spot light, the facade's default
    pub fn spot() -> Self {
        Self {
            kind: LightKind::Spot {
                angle: std::f32::consts::FRAC_PI_3,
            },
            color: Color::WHITE,
            intensity: 1.0,
        }
    }

    /// A white point light
    pub fn point() -> Self {
        Self {
            kind: LightKind::Point,
            color: Color::WHITE,
            intensity: 1.0,
        }
    }

    /// A white directional light
    pub fn directional() -> Self {
        Self {
            kind: LightKind::Directional,
            color: Color::WHITE,
            intensity: 1.0,
        }
    }

    /// A dim ambient fill light
    pub fn ambient(intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color: Color::WHITE,
            intensity,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::spot()
    }
}
