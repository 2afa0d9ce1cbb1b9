//! Scene renderer over a winit window surface
//!
//! One pipeline per renderable kind, built once at construction; custom
//! shader materials get their pipelines compiled on first use and cached by a
//! hash of the assembled WGSL pair. Vertex and uniform buffers are uploaded
//! per frame.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use egui_wgpu::ScreenDescriptor;
use quickscene_core::{
    Color, Error, Geometry, Light, LightKind, Object, PerspectiveCamera, Result, Scene,
    ShaderMaterial, Transform3D, Vector3f,
};
use winit::window::Window;

use crate::device::GpuContext;
use crate::overlay::{OverlayFrame, OverlayRenderer};
use crate::shaders;
use crate::vertex::{
    CameraUniform, LightUniform, LightsUniform, LineVertex, MeshVertex, ModelUniform, PointVertex,
    MAX_LIGHTS,
};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub clear_color: Color,
    pub enable_depth_test: bool,
    pub enable_alpha_blending: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::BLACK,
            enable_depth_test: true,
            enable_alpha_blending: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PipelineKind {
    Mesh,
    Wireframe,
    Points,
    LineStrip,
    LineList,
}

enum PipelineRef {
    Builtin(PipelineKind),
    Custom(u64),
}

/// One draw prepared ahead of the render pass
struct PreparedDraw {
    pipeline: PipelineRef,
    vertex_buffer: wgpu::Buffer,
    index: Option<(wgpu::Buffer, u32)>,
    vertex_count: u32,
    model_bind_group: wgpu::BindGroup,
}

/// The default wgpu render backend
pub struct Renderer {
    gpu: Arc<GpuContext>,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: Option<wgpu::TextureView>,
    camera_bind_group_layout: wgpu::BindGroupLayout,
    model_bind_group_layout: wgpu::BindGroupLayout,
    pipelines: HashMap<PipelineKind, wgpu::RenderPipeline>,
    shader_pipelines: HashMap<u64, wgpu::RenderPipeline>,
    overlay: OverlayRenderer,
    config: RenderConfig,
}

impl Renderer {
    /// Create a renderer drawing to the given window
    pub async fn new(window: Arc<Window>, config: RenderConfig) -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| Error::Gpu(format!("Failed to create surface: {:?}", e)))?;

        let gpu = Arc::new(GpuContext::new(&instance, Some(&surface)).await?);

        let surface_caps = surface.get_capabilities(&gpu.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &surface_config);

        let camera_bind_group_layout = gpu.create_bind_group_layout(
            "camera_bind_group_layout",
            &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT),
                uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
            ],
        );
        let model_bind_group_layout = gpu.create_bind_group_layout(
            "model_bind_group_layout",
            &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        );

        let depth_view = config
            .enable_depth_test
            .then(|| create_depth_view(&gpu, &surface_config));

        let mut pipelines = HashMap::new();
        {
            let mesh_shader = gpu.create_shader_module("Mesh Shader", shaders::MESH_SHADER);
            let point_shader = gpu.create_shader_module("Point Shader", shaders::POINT_SHADER);
            let line_shader = gpu.create_shader_module("Line Shader", shaders::LINE_SHADER);

            let build = |label: &str,
                         shader: &wgpu::ShaderModule,
                         buffers: &[wgpu::VertexBufferLayout],
                         topology: wgpu::PrimitiveTopology,
                         polygon_mode: wgpu::PolygonMode| {
                build_pipeline(
                    &gpu,
                    label,
                    &[&camera_bind_group_layout, &model_bind_group_layout],
                    shader,
                    shader,
                    buffers,
                    topology,
                    polygon_mode,
                    surface_format,
                    &config,
                )
            };

            pipelines.insert(
                PipelineKind::Mesh,
                build(
                    "Mesh Pipeline",
                    &mesh_shader,
                    &[MeshVertex::desc()],
                    wgpu::PrimitiveTopology::TriangleList,
                    wgpu::PolygonMode::Fill,
                ),
            );
            if gpu.supports_wireframe {
                pipelines.insert(
                    PipelineKind::Wireframe,
                    build(
                        "Wireframe Pipeline",
                        &mesh_shader,
                        &[MeshVertex::desc()],
                        wgpu::PrimitiveTopology::TriangleList,
                        wgpu::PolygonMode::Line,
                    ),
                );
            }
            pipelines.insert(
                PipelineKind::Points,
                build(
                    "Points Pipeline",
                    &point_shader,
                    &[PointVertex::desc()],
                    wgpu::PrimitiveTopology::PointList,
                    wgpu::PolygonMode::Fill,
                ),
            );
            pipelines.insert(
                PipelineKind::LineStrip,
                build(
                    "Line Strip Pipeline",
                    &line_shader,
                    &[LineVertex::desc()],
                    wgpu::PrimitiveTopology::LineStrip,
                    wgpu::PolygonMode::Fill,
                ),
            );
            pipelines.insert(
                PipelineKind::LineList,
                build(
                    "Line List Pipeline",
                    &line_shader,
                    &[LineVertex::desc()],
                    wgpu::PrimitiveTopology::LineList,
                    wgpu::PolygonMode::Fill,
                ),
            );
        }

        let overlay = OverlayRenderer::new(
            &gpu,
            surface_format,
            config.enable_depth_test.then_some(DEPTH_FORMAT),
        );

        Ok(Self {
            gpu,
            surface,
            surface_config,
            depth_view,
            camera_bind_group_layout,
            model_bind_group_layout,
            pipelines,
            shader_pipelines: HashMap::new(),
            overlay,
            config,
        })
    }

    /// The shared GPU context
    pub fn gpu(&self) -> &Arc<GpuContext> {
        &self.gpu
    }

    /// Current surface size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Reconfigure the surface after a window resize
    ///
    /// Zero dimensions are clamped to 1; wgpu rejects zero extents.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width.max(1);
        self.surface_config.height = height.max(1);
        self.surface.configure(&self.gpu.device, &self.surface_config);
        if self.config.enable_depth_test {
            self.depth_view = Some(create_depth_view(&self.gpu, &self.surface_config));
        }
    }

    /// Change the clear color for subsequent frames
    pub fn set_clear_color(&mut self, color: Color) {
        self.config.clear_color = color;
    }

    /// Draw one frame of the scene from the camera's viewpoint
    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        overlay: Option<OverlayFrame>,
    ) -> Result<()> {
        let (draws, lights) = self.prepare(scene);

        let camera_uniform = CameraUniform {
            view_proj: camera.view_proj().into(),
            view_pos: [camera.position.x, camera.position.y, camera.position.z, 1.0],
        };
        let camera_buffer = self.gpu.create_buffer_init(
            "Camera Buffer",
            &[camera_uniform],
            wgpu::BufferUsages::UNIFORM,
        );
        let lights_buffer =
            self.gpu
                .create_buffer_init("Lights Buffer", &[lights], wgpu::BufferUsages::UNIFORM);
        let camera_bind_group = self.gpu.create_bind_group(
            "camera_bind_group",
            &self.camera_bind_group_layout,
            &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        );

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.gpu.device, &self.surface_config);
                self.surface
                    .get_current_texture()
                    .map_err(|e| Error::Gpu(format!("Failed to acquire frame: {:?}", e)))?
            }
            Err(e) => return Err(Error::Gpu(format!("Failed to acquire frame: {:?}", e))),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        let screen = ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: overlay.as_ref().map_or(1.0, |f| f.pixels_per_point),
        };
        if let Some(frame) = &overlay {
            self.overlay.prepare(&self.gpu, &mut encoder, frame, &screen);
        }

        {
            let clear = self.config.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: self.depth_view.as_ref().map(|depth_view| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view: depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &camera_bind_group, &[]);
            for draw in &draws {
                let pipeline = match &draw.pipeline {
                    PipelineRef::Builtin(kind) => &self.pipelines[kind],
                    PipelineRef::Custom(hash) => &self.shader_pipelines[hash],
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(1, &draw.model_bind_group, &[]);
                pass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
                match &draw.index {
                    Some((buffer, count)) => {
                        pass.set_index_buffer(buffer.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..*count, 0, 0..1);
                    }
                    None => pass.draw(0..draw.vertex_count, 0..1),
                }
            }

            if let Some(frame) = &overlay {
                self.overlay.paint(&mut pass, frame, &screen);
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(frame) = &overlay {
            self.overlay.cleanup(frame);
        }
        Ok(())
    }

    /// Walk the scene collecting draw batches and the light array
    fn prepare(&mut self, scene: &Scene) -> (Vec<PreparedDraw>, LightsUniform) {
        let gpu = Arc::clone(&self.gpu);
        let model_layout = &self.model_bind_group_layout;
        let camera_layout = &self.camera_bind_group_layout;
        let shader_pipelines = &mut self.shader_pipelines;
        let surface_format = self.surface_config.format;
        let config = &self.config;
        let supports_wireframe = gpu.supports_wireframe;

        let mut draws = Vec::new();
        let mut lights = LightsUniform::default();
        let mut light_count = 0usize;

        scene.visit(|_, object, world| match object {
            Object::Group => {}
            Object::Mesh { geometry, material } => {
                if geometry.is_empty() {
                    return;
                }
                let kind = if material.wireframe && supports_wireframe {
                    PipelineKind::Wireframe
                } else {
                    PipelineKind::Mesh
                };
                let unlit = material.unlit || material.wireframe;
                draws.push(make_mesh_draw(
                    &gpu,
                    model_layout,
                    PipelineRef::Builtin(kind),
                    geometry,
                    world,
                    material.color,
                    [if unlit { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
                ));
            }
            Object::ShaderMesh { geometry, material } => {
                if geometry.is_empty() {
                    return;
                }
                let hash = ensure_shader_pipeline(
                    &gpu,
                    shader_pipelines,
                    camera_layout,
                    model_layout,
                    surface_format,
                    config,
                    material,
                    false,
                );
                draws.push(make_mesh_draw(
                    &gpu,
                    model_layout,
                    PipelineRef::Custom(hash),
                    geometry,
                    world,
                    Color::WHITE,
                    [1.0, material.point_size, 0.0, 0.0],
                ));
            }
            Object::Points { geometry, material } => {
                if geometry.is_empty() {
                    return;
                }
                let vertices: Vec<PointVertex> = geometry
                    .positions
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let color = vertex_color(geometry, i, material.color);
                        PointVertex::new(p, color, material.size)
                    })
                    .collect();
                draws.push(make_raw_draw(
                    &gpu,
                    model_layout,
                    PipelineRef::Builtin(PipelineKind::Points),
                    bytemuck::cast_slice(&vertices),
                    vertices.len() as u32,
                    None,
                    world,
                    Color::WHITE,
                    [1.0, 1.0, 0.0, 0.0],
                ));
            }
            Object::ShaderPoints { geometry, material } => {
                if geometry.is_empty() {
                    return;
                }
                let hash = ensure_shader_pipeline(
                    &gpu,
                    shader_pipelines,
                    camera_layout,
                    model_layout,
                    surface_format,
                    config,
                    material,
                    true,
                );
                let vertices: Vec<PointVertex> = geometry
                    .positions
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let color = vertex_color(geometry, i, Color::WHITE);
                        PointVertex::new(p, color, 1.0)
                    })
                    .collect();
                draws.push(make_raw_draw(
                    &gpu,
                    model_layout,
                    PipelineRef::Custom(hash),
                    bytemuck::cast_slice(&vertices),
                    vertices.len() as u32,
                    None,
                    world,
                    Color::WHITE,
                    [1.0, material.point_size, 0.0, 0.0],
                ));
            }
            Object::Line {
                geometry,
                material,
                segments,
            } => {
                if geometry.is_empty() {
                    return;
                }
                let vertices: Vec<LineVertex> = geometry
                    .positions
                    .iter()
                    .enumerate()
                    .map(|(i, p)| LineVertex::new(p, vertex_color(geometry, i, material.color)))
                    .collect();
                let kind = if *segments {
                    PipelineKind::LineList
                } else {
                    PipelineKind::LineStrip
                };
                draws.push(make_raw_draw(
                    &gpu,
                    model_layout,
                    PipelineRef::Builtin(kind),
                    bytemuck::cast_slice(&vertices),
                    vertices.len() as u32,
                    None,
                    world,
                    Color::WHITE,
                    [1.0, 1.0, 0.0, 0.0],
                ));
            }
            Object::Axes { size } => {
                let vertices = axes_vertices(*size);
                draws.push(make_raw_draw(
                    &gpu,
                    model_layout,
                    PipelineRef::Builtin(PipelineKind::LineList),
                    bytemuck::cast_slice(&vertices),
                    vertices.len() as u32,
                    None,
                    world,
                    Color::WHITE,
                    [1.0, 1.0, 0.0, 0.0],
                ));
            }
            Object::Light(light) => {
                if light_count < MAX_LIGHTS {
                    lights.lights[light_count] = light_uniform(light, world);
                    light_count += 1;
                }
            }
        });

        lights.count[0] = light_count as u32;
        (draws, lights)
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_depth_view(
    gpu: &GpuContext,
    surface_config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: surface_config.width,
            height: surface_config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[allow(clippy::too_many_arguments)]
fn build_pipeline(
    gpu: &GpuContext,
    label: &str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    vertex_module: &wgpu::ShaderModule,
    fragment_module: &wgpu::ShaderModule,
    buffers: &[wgpu::VertexBufferLayout],
    topology: wgpu::PrimitiveTopology,
    polygon_mode: wgpu::PolygonMode,
    surface_format: wgpu::TextureFormat,
    config: &RenderConfig,
) -> wgpu::RenderPipeline {
    let layout = gpu
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

    gpu.device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: vertex_module,
                entry_point: "vs_main",
                buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: fragment_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: if config.enable_alpha_blending {
                        Some(wgpu::BlendState::ALPHA_BLENDING)
                    } else {
                        Some(wgpu::BlendState::REPLACE)
                    },
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode,
                conservative: false,
            },
            depth_stencil: if config.enable_depth_test {
                Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                })
            } else {
                None
            },
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        })
}

/// Compile (or reuse) the pipeline for a custom shader material
#[allow(clippy::too_many_arguments)]
fn ensure_shader_pipeline(
    gpu: &GpuContext,
    cache: &mut HashMap<u64, wgpu::RenderPipeline>,
    camera_layout: &wgpu::BindGroupLayout,
    model_layout: &wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
    config: &RenderConfig,
    material: &ShaderMaterial,
    points: bool,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    material.vertex_source.hash(&mut hasher);
    material.fragment_source.hash(&mut hasher);
    points.hash(&mut hasher);
    let hash = hasher.finish();

    if !cache.contains_key(&hash) {
        let vertex_module = gpu.create_shader_module("Custom Vertex Shader", &material.vertex_source);
        let fragment_module =
            gpu.create_shader_module("Custom Fragment Shader", &material.fragment_source);
        let (buffers, topology): (Vec<wgpu::VertexBufferLayout>, _) = if points {
            (vec![PointVertex::desc()], wgpu::PrimitiveTopology::PointList)
        } else {
            (vec![MeshVertex::desc()], wgpu::PrimitiveTopology::TriangleList)
        };
        let pipeline = build_pipeline(
            gpu,
            "Custom Shader Pipeline",
            &[camera_layout, model_layout],
            &vertex_module,
            &fragment_module,
            &buffers,
            topology,
            wgpu::PolygonMode::Fill,
            surface_format,
            config,
        );
        cache.insert(hash, pipeline);
    }
    hash
}

fn model_bind_group(
    gpu: &GpuContext,
    layout: &wgpu::BindGroupLayout,
    world: &Transform3D,
    color: Color,
    params: [f32; 4],
) -> wgpu::BindGroup {
    let uniform = ModelUniform {
        model: world.matrix.into(),
        color: color.to_array(),
        params,
    };
    let buffer = gpu.create_buffer_init("Model Buffer", &[uniform], wgpu::BufferUsages::UNIFORM);
    gpu.create_bind_group(
        "model_bind_group",
        layout,
        &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    )
}

fn make_mesh_draw(
    gpu: &GpuContext,
    model_layout: &wgpu::BindGroupLayout,
    pipeline: PipelineRef,
    geometry: &Geometry,
    world: &Transform3D,
    color: Color,
    params: [f32; 4],
) -> PreparedDraw {
    let vertices = mesh_vertices(geometry);
    let index = geometry.indices.as_ref().map(|indices| {
        let buffer = gpu.create_buffer_init("Index Buffer", indices, wgpu::BufferUsages::INDEX);
        (buffer, indices.len() as u32)
    });
    let vertex_buffer = gpu.create_buffer_init(
        "Mesh Vertex Buffer",
        &vertices,
        wgpu::BufferUsages::VERTEX,
    );
    PreparedDraw {
        pipeline,
        vertex_buffer,
        index,
        vertex_count: vertices.len() as u32,
        model_bind_group: model_bind_group(gpu, model_layout, world, color, params),
    }
}

#[allow(clippy::too_many_arguments)]
fn make_raw_draw(
    gpu: &GpuContext,
    model_layout: &wgpu::BindGroupLayout,
    pipeline: PipelineRef,
    vertex_bytes: &[u8],
    vertex_count: u32,
    index: Option<(wgpu::Buffer, u32)>,
    world: &Transform3D,
    color: Color,
    params: [f32; 4],
) -> PreparedDraw {
    let vertex_buffer =
        gpu.create_buffer_init("Vertex Buffer", vertex_bytes, wgpu::BufferUsages::VERTEX);
    PreparedDraw {
        pipeline,
        vertex_buffer,
        index,
        vertex_count,
        model_bind_group: model_bind_group(gpu, model_layout, world, color, params),
    }
}

fn vertex_color(geometry: &Geometry, index: usize, fallback: Color) -> Color {
    geometry
        .colors
        .as_ref()
        .and_then(|colors| colors.get(index).copied())
        .unwrap_or(fallback)
}

fn mesh_vertices(geometry: &Geometry) -> Vec<MeshVertex> {
    geometry
        .positions
        .iter()
        .enumerate()
        .map(|(i, position)| {
            let normal = geometry
                .normals
                .as_ref()
                .and_then(|normals| normals.get(i))
                .map_or([0.0, 0.0, 1.0], |n| [n.x, n.y, n.z]);
            MeshVertex::new(position, normal, vertex_color(geometry, i, Color::WHITE))
        })
        .collect()
}

/// RGB line-list gizmo for the three coordinate axes
fn axes_vertices(size: f32) -> Vec<LineVertex> {
    let origin = quickscene_core::Point3f::origin();
    vec![
        LineVertex::new(&origin, Color::RED),
        LineVertex::new(&quickscene_core::Point3f::new(size, 0.0, 0.0), Color::RED),
        LineVertex::new(&origin, Color::GREEN),
        LineVertex::new(&quickscene_core::Point3f::new(0.0, size, 0.0), Color::GREEN),
        LineVertex::new(&origin, Color::BLUE),
        LineVertex::new(&quickscene_core::Point3f::new(0.0, 0.0, size), Color::BLUE),
    ]
}

/// Spot and directional lights aim from their world position toward the
/// world origin, matching the facade's default light placement; a light at
/// the origin falls back to its node's -Z axis.
fn light_uniform(light: &Light, world: &Transform3D) -> LightUniform {
    let position = world.position();
    let direction = if position.coords.norm() > 1e-6 {
        (-position.coords).normalize()
    } else {
        let d = world.transform_vector(&Vector3f::new(0.0, 0.0, -1.0));
        if d.norm() > 1e-6 {
            d.normalize()
        } else {
            Vector3f::new(0.0, 0.0, -1.0)
        }
    };
    let (kind, cone_cos) = match light.kind {
        LightKind::Spot { angle } => (0.0, angle.cos()),
        LightKind::Point => (1.0, 0.0),
        LightKind::Directional => (2.0, 0.0),
        LightKind::Ambient => (3.0, 0.0),
    };
    LightUniform {
        position: [position.x, position.y, position.z, kind],
        color: [light.color.r, light.color.g, light.color.b, light.intensity],
        direction: [direction.x, direction.y, direction.z, cone_cos],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickscene_core::Point3f;

    #[test]
    fn axes_gizmo_spans_three_axes() {
        let vertices = axes_vertices(2.0);
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[1].position, [2.0, 0.0, 0.0]);
        assert_eq!(vertices[3].position, [0.0, 2.0, 0.0]);
        assert_eq!(vertices[5].position, [0.0, 0.0, 2.0]);
    }

    #[test]
    fn mesh_vertices_default_normal_and_color() {
        let geometry = Geometry::from_positions(vec![Point3f::origin()]);
        let vertices = mesh_vertices(&geometry);
        assert_eq!(vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertices[0].color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn spot_light_aims_at_origin() {
        let world = Transform3D::translation_xyz(10.0, 10.0, 10.0);
        let uniform = light_uniform(&Light::spot(), &world);
        assert_eq!(uniform.position[3], 0.0);
        let d = Vector3f::new(uniform.direction[0], uniform.direction[1], uniform.direction[2]);
        assert!((d.normalize() + Vector3f::new(1.0, 1.0, 1.0).normalize()).norm() < 1e-5);
    }
}
