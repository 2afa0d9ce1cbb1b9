//! wgpu rendering backend for quickscene
//!
//! This crate turns a [`quickscene_core::Scene`] into frames on a winit
//! window:
//! - Device and surface bootstrap
//! - One pipeline per renderable kind (mesh, wireframe, points, lines)
//! - A slot-based shader template model for caller-supplied WGSL fragments
//! - An optional egui overlay painted into the main pass

pub mod device;
pub mod overlay;
pub mod renderer;
pub mod shaders;
pub mod template;
pub mod vertex;

pub use device::GpuContext;
pub use overlay::{OverlayFrame, OverlayRenderer};
pub use renderer::{RenderConfig, Renderer};
pub use template::{
    assemble_mesh_program, assemble_points_program, Fragment, ShaderProgram, SlotId,
    StageFragments,
};
pub use vertex::{LineVertex, MeshVertex, PointVertex};
