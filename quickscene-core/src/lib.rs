//! Core data structures for quickscene
//!
//! This crate provides the scene-side half of the facade: an id-addressed
//! scene graph, geometry and material records, lights, a perspective camera
//! and 3D transforms. Nothing in here touches the GPU; rendering lives in
//! `quickscene-gpu`.

pub mod camera;
pub mod color;
pub mod error;
pub mod geometry;
pub mod light;
pub mod material;
pub mod scene;
pub mod transform;

pub use camera::*;
pub use color::*;
pub use error::*;
pub use geometry::*;
pub use light::*;
pub use material::*;
pub use scene::*;
pub use transform::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;
