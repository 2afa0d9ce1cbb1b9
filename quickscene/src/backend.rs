//! Rendering seam behind the facade
//!
//! The facade talks to its renderer only through [`RenderBackend`], so tests
//! substitute a recording backend and never touch a GPU. The default
//! implementation wraps the wgpu renderer from `quickscene-gpu`.

use quickscene_core::{Color, PerspectiveCamera, Result, Scene};
use quickscene_gpu::{OverlayFrame, RenderConfig, Renderer};
use std::sync::Arc;
use winit::window::Window;

/// What the facade needs from a renderer
pub trait RenderBackend {
    /// Current drawable size in pixels; both dimensions are at least one
    fn size(&self) -> (u32, u32);

    fn resize(&mut self, width: u32, height: u32);

    fn set_clear_color(&mut self, color: Color);

    /// Draw one frame of the scene from the given camera, with an optional
    /// GUI overlay on top
    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        overlay: Option<OverlayFrame>,
    ) -> Result<()>;
}

/// wgpu-backed renderer targeting a winit window
pub struct WgpuBackend {
    renderer: Renderer,
}

impl WgpuBackend {
    /// Initialize the GPU renderer for a window, blocking on adapter and
    /// device setup
    pub fn new(window: Arc<Window>, config: RenderConfig) -> Result<Self> {
        let renderer = pollster::block_on(Renderer::new(window, config))?;
        Ok(Self { renderer })
    }
}

impl RenderBackend for WgpuBackend {
    fn size(&self) -> (u32, u32) {
        self.renderer.size()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    fn set_clear_color(&mut self, color: Color) {
        self.renderer.set_clear_color(color);
    }

    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        overlay: Option<OverlayFrame>,
    ) -> Result<()> {
        self.renderer.render(scene, camera, overlay)
    }
}
