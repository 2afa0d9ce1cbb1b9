//! Material records with the defaults the facade factories substitute
//!
//! The defaults mirror the facade contract: shapes come up as white
//! wireframes, point clouds as fixed-size sprites, lines as plain white.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Surface material for solid meshes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshMaterial {
    pub color: Color,
    /// Draw edges only instead of filled triangles
    pub wireframe: bool,
    /// Skip lighting and output the flat material color
    pub unlit: bool,
}

impl MeshMaterial {
    /// A filled, lit material in the given color
    pub fn lit(color: Color) -> Self {
        Self {
            color,
            wireframe: false,
            unlit: false,
        }
    }

    /// A wireframe material in the given color
    pub fn wireframe(color: Color) -> Self {
        Self {
            color,
            wireframe: true,
            unlit: true,
        }
    }
}

impl Default for MeshMaterial {
    fn default() -> Self {
        Self::wireframe(Color::WHITE)
    }
}

/// Material for point-cloud renderables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointsMaterial {
    /// Point sprite size in world units
    pub size: f32,
    pub color: Color,
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self {
            size: 0.1,
            color: Color::WHITE,
        }
    }
}

/// Material for line and line-segment renderables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineMaterial {
    pub color: Color,
}

impl Default for LineMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}

/// A custom material carrying fully assembled WGSL sources
///
/// Produced by the shader template model in `quickscene-gpu`; the renderer
/// compiles and caches one pipeline per distinct source pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderMaterial {
    pub vertex_source: String,
    pub fragment_source: String,
    /// Point size consumed by shader-points pipelines; ignored for meshes
    pub point_size: f32,
}

impl ShaderMaterial {
    pub fn new(vertex_source: String, fragment_source: String) -> Self {
        Self {
            vertex_source,
            fragment_source,
            point_size: 1.0,
        }
    }
}
