//! egui overlay painted into the main render pass

use crate::device::GpuContext;
use egui_wgpu::ScreenDescriptor;

/// One frame of tessellated egui output, produced by the facade's GUI layer
pub struct OverlayFrame {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// Paints [`OverlayFrame`]s with egui-wgpu
pub struct OverlayRenderer {
    renderer: egui_wgpu::Renderer,
}

impl OverlayRenderer {
    /// Create an overlay renderer targeting the surface format
    ///
    /// The depth format must match the main pass since the overlay is drawn
    /// inside it.
    pub fn new(
        gpu: &GpuContext,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Self {
        Self {
            renderer: egui_wgpu::Renderer::new(&gpu.device, surface_format, depth_format, 1),
        }
    }

    /// Upload textures and buffers for this frame; call before the pass
    pub fn prepare(
        &mut self,
        gpu: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        frame: &OverlayFrame,
        screen: &ScreenDescriptor,
    ) {
        for (id, delta) in &frame.textures_delta.set {
            self.renderer
                .update_texture(&gpu.device, &gpu.queue, *id, delta);
        }
        self.renderer
            .update_buffers(&gpu.device, &gpu.queue, encoder, &frame.primitives, screen);
    }

    /// Record the overlay draws into the pass
    pub fn paint<'rp>(
        &'rp self,
        pass: &mut wgpu::RenderPass<'rp>,
        frame: &'rp OverlayFrame,
        screen: &ScreenDescriptor,
    ) {
        self.renderer.render(pass, &frame.primitives, screen);
    }

    /// Release textures freed by egui this frame; call after submission
    pub fn cleanup(&mut self, frame: &OverlayFrame) {
        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
