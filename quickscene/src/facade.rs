//! The scene facade
//!
//! One object owning the scene graph, camera, renderer, controls, frame loop
//! and GUI, with factory helpers for the common objects. Construction is the
//! single entry point: the returned facade is fully initialized and, unless
//! rendering was disabled, its frame loop is already running.

use quickscene_core::{
    Error, Geometry, Light, LineMaterial, MeshMaterial, NodeId, Object, PerspectiveCamera,
    PointsMaterial, Result, Scene, ShaderMaterial, Transform3D, Vector3f,
};
use quickscene_gpu::{
    assemble_mesh_program, assemble_points_program, RenderConfig, StageFragments,
};
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::backend::{RenderBackend, WgpuBackend};
use crate::config::{ControlsConfig, SceneConfig};
use crate::controls::OrbitControls;
use crate::frame::FrameLoop;
use crate::gui::{self, BindOptions, Gui, Panel, SharedParams};
use crate::stats::FrameStats;
use crate::tween::{Tween, TweenSet};

/// Slot fragments and point size for a custom shader material
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderOptions {
    pub vertex: StageFragments,
    pub fragment: StageFragments,
    pub point_size: f32,
}

impl Default for ShaderOptions {
    fn default() -> Self {
        Self {
            vertex: StageFragments::default(),
            fragment: StageFragments::default(),
            point_size: 1.0,
        }
    }
}

type AnimateFn = Box<dyn FnMut(&mut Scene, f32)>;

/// Scene, camera, renderer and per-frame machinery behind one handle
pub struct SceneFacade {
    scene: Scene,
    camera: PerspectiveCamera,
    backend: Box<dyn RenderBackend>,
    controls: Option<OrbitControls>,
    frame: FrameLoop,
    stats: Option<FrameStats>,
    panel: Option<Panel>,
    tweens: TweenSet,
    animate: Option<AnimateFn>,
    gui: Option<Gui>,
    window: Option<Arc<Window>>,
    event_loop: Option<EventLoop<()>>,
}

impl SceneFacade {
    /// Build a fully initialized facade from the configuration
    ///
    /// Opens a window and the wgpu renderer unless a backend was injected.
    /// Headless facades (injected backend) carry no window or event loop and
    /// cannot [`run`](Self::run), but every other operation works.
    pub fn new(config: SceneConfig) -> Result<Self> {
        let SceneConfig {
            width,
            height,
            title,
            backend,
            camera,
            controls,
            clear_color,
            stats,
            panel,
            render,
        } = config;

        let (window, event_loop, mut backend) = match backend {
            Some(backend) => (None, None, backend),
            None => {
                let event_loop = EventLoop::new()
                    .map_err(|e| Error::Window(format!("event loop creation failed: {e}")))?;
                let mut builder = WindowBuilder::new()
                    .with_title(title.as_deref().unwrap_or("quickscene"));
                if let (Some(w), Some(h)) = (width, height) {
                    builder = builder.with_inner_size(PhysicalSize::new(w, h));
                }
                let window = Arc::new(
                    builder
                        .build(&event_loop)
                        .map_err(|e| Error::Window(format!("window creation failed: {e}")))?,
                );
                let backend: Box<dyn RenderBackend> = Box::new(WgpuBackend::new(
                    Arc::clone(&window),
                    RenderConfig {
                        clear_color,
                        ..RenderConfig::default()
                    },
                )?);
                (Some(window), Some(event_loop), backend)
            }
        };

        // Omitted dimensions fall back to the mount's measured size.
        let (measured_w, measured_h) = backend.size();
        let w = width.unwrap_or(measured_w).max(1);
        let h = height.unwrap_or(measured_h).max(1);
        backend.resize(w, h);
        backend.set_clear_color(clear_color);

        let camera =
            camera.unwrap_or_else(|| PerspectiveCamera::with_aspect(w as f32 / h as f32));
        let controls = match controls {
            ControlsConfig::Default => Some(OrbitControls::from_camera(&camera)),
            ControlsConfig::Disabled => None,
            ControlsConfig::Custom(custom) => Some(custom),
        };
        let gui = match &window {
            Some(window) if stats || panel => Some(Gui::new(window)),
            _ => None,
        };

        let mut facade = Self {
            scene: Scene::new(),
            camera,
            backend,
            controls,
            frame: FrameLoop::new(render),
            stats: stats.then(FrameStats::new),
            panel: panel.then(Panel::new),
            tweens: TweenSet::new(),
            animate: None,
            gui,
            window,
            event_loop,
        };
        facade.sync_camera_node();
        Ok(facade)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }

    pub fn controls(&self) -> Option<&OrbitControls> {
        self.controls.as_ref()
    }

    pub fn controls_mut(&mut self) -> Option<&mut OrbitControls> {
        self.controls.as_mut()
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame
    }

    pub fn frame_loop_mut(&mut self) -> &mut FrameLoop {
        &mut self.frame
    }

    pub fn stats(&self) -> Option<&FrameStats> {
        self.stats.as_ref()
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    /// Per-frame callback run after controls and tweens
    pub fn set_animate(&mut self, f: impl FnMut(&mut Scene, f32) + 'static) {
        self.animate = Some(Box::new(f));
    }

    pub fn clear_animate(&mut self) {
        self.animate = None;
    }

    /// Queue a tween for per-frame advancement
    pub fn add_tween(&mut self, tween: Tween) {
        self.tweens.add(tween);
    }

    pub fn tweens(&self) -> &TweenSet {
        &self.tweens
    }

    /// Bind parameters to the slider panel; a no-op when the panel is
    /// disabled
    pub fn bind_panel(
        &mut self,
        params: &SharedParams,
        keys: Option<&[&str]>,
        options: BindOptions,
    ) {
        if let Some(panel) = &mut self.panel {
            panel.bind(params, keys, options);
        }
    }

    /// Resize the drawable and keep the camera's aspect in step
    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        self.backend.resize(width, height);
        self.camera.set_aspect(width as f32 / height as f32);
    }

    // ----- object factories -------------------------------------------------

    /// Add a mesh; defaults to a wireframe unit cube
    pub fn shape(
        &mut self,
        geometry: Option<Geometry>,
        material: Option<MeshMaterial>,
    ) -> NodeId {
        self.scene.add(Object::Mesh {
            geometry: geometry.unwrap_or_else(Geometry::unit_cube),
            material: material.unwrap_or_default(),
        })
    }

    /// Add a point cloud; defaults to unit-cube corners at size 0.1
    pub fn points(
        &mut self,
        geometry: Option<Geometry>,
        material: Option<PointsMaterial>,
    ) -> NodeId {
        self.scene.add(Object::Points {
            geometry: geometry.unwrap_or_else(Geometry::unit_cube),
            material: material.unwrap_or_default(),
        })
    }

    /// Add a polyline through the geometry's positions in order
    pub fn line(
        &mut self,
        geometry: Option<Geometry>,
        material: Option<LineMaterial>,
    ) -> NodeId {
        self.scene.add(Object::Line {
            geometry: geometry.unwrap_or_else(Geometry::unit_cube),
            material: material.unwrap_or_default(),
            segments: false,
        })
    }

    /// Add disjoint line segments from consecutive position pairs
    pub fn line_segments(
        &mut self,
        geometry: Option<Geometry>,
        material: Option<LineMaterial>,
    ) -> NodeId {
        self.scene.add(Object::Line {
            geometry: geometry.unwrap_or_else(Geometry::unit_cube),
            material: material.unwrap_or_default(),
            segments: true,
        })
    }

    /// Add a light at the conventional (10, 10, 10) key-light position
    pub fn light(&mut self, light: Option<Light>) -> NodeId {
        let id = self.scene.add(Object::Light(light.unwrap_or_default()));
        self.scene
            .set_transform(id, Transform3D::translation_xyz(10.0, 10.0, 10.0));
        id
    }

    /// Add a head-light parented to the camera node
    pub fn camera_light(&mut self, light: Option<Light>) -> NodeId {
        let camera_node = self.scene.camera_node();
        self.scene
            .add_child(camera_node, Object::Light(light.unwrap_or_default()))
    }

    /// Add a coordinate-axes gizmo, default size 1
    pub fn axes(&mut self, size: Option<f32>) -> NodeId {
        self.scene.add(Object::Axes {
            size: size.unwrap_or(1.0),
        })
    }

    /// Add a group of small marker cubes, one per vector tip
    pub fn vectors(&mut self, vectors: &[Vector3f], marker_scale: Option<f32>) -> NodeId {
        let scale = marker_scale.unwrap_or(0.1);
        let group = self.scene.add(Object::Group);
        for v in vectors {
            let marker = self.scene.add_child(
                group,
                Object::Mesh {
                    geometry: Geometry::unit_cube(),
                    material: MeshMaterial::default(),
                },
            );
            let transform =
                Transform3D::translation(*v) * Transform3D::uniform_scaling(scale);
            self.scene.set_transform(marker, transform);
        }
        group
    }

    /// Add a mesh drawn with a caller-assembled shader program
    pub fn shader_shape(&mut self, geometry: Option<Geometry>, options: ShaderOptions) -> NodeId {
        let program = assemble_mesh_program(&options.vertex, &options.fragment);
        self.scene.add(Object::ShaderMesh {
            geometry: geometry.unwrap_or_else(Geometry::unit_cube),
            material: ShaderMaterial {
                vertex_source: program.vertex,
                fragment_source: program.fragment,
                point_size: options.point_size,
            },
        })
    }

    /// Add points drawn with a caller-assembled shader program
    pub fn shader_points(&mut self, geometry: Option<Geometry>, options: ShaderOptions) -> NodeId {
        let program = assemble_points_program(&options.vertex, &options.fragment);
        self.scene.add(Object::ShaderPoints {
            geometry: geometry.unwrap_or_else(Geometry::unit_cube),
            material: ShaderMaterial {
                vertex_source: program.vertex,
                fragment_source: program.fragment,
                point_size: options.point_size,
            },
        })
    }

    /// Batch-insert pre-built objects under the root, no default substitution
    pub fn add(&mut self, objects: impl IntoIterator<Item = Object>) -> Vec<NodeId> {
        objects
            .into_iter()
            .map(|object| self.scene.add(object))
            .collect()
    }

    // ----- frame advance ----------------------------------------------------

    /// Advance one frame: stats, tweens, controls, then the animate callback
    ///
    /// Returns the frame delta in seconds, or `None` while the loop is
    /// stopped.
    pub fn update(&mut self) -> Option<f32> {
        let dt = self.frame.tick()?;
        if let Some(stats) = &mut self.stats {
            stats.tick(dt);
        }
        self.tweens.update(dt);
        if let Some(controls) = &mut self.controls {
            controls.update(&mut self.camera);
        }
        self.sync_camera_node();
        if let Some(animate) = &mut self.animate {
            animate(&mut self.scene, dt);
        }
        Some(dt)
    }

    /// Advance and draw one frame; a stopped loop draws nothing
    pub fn render_frame(&mut self) -> Result<()> {
        if self.update().is_none() {
            return Ok(());
        }
        let overlay = match (&mut self.gui, &self.window) {
            (Some(gui_state), Some(window)) => {
                let panel = &mut self.panel;
                let stats = &self.stats;
                Some(gui_state.frame(window, |ctx| {
                    if let Some(panel) = panel.as_mut() {
                        panel.show(ctx);
                    }
                    if let Some(stats) = stats.as_ref() {
                        gui::show_stats(ctx, stats);
                    }
                }))
            }
            _ => None,
        };
        self.backend.render(&self.scene, &self.camera, overlay)
    }

    /// Drive the window event loop until close, consuming the facade
    pub fn run(mut self) -> Result<()> {
        let event_loop = self.event_loop.take().ok_or_else(|| {
            Error::Window("headless facade has no event loop to run".to_string())
        })?;
        let window = self
            .window
            .clone()
            .ok_or_else(|| Error::Window("headless facade has no window".to_string()))?;

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Poll);
                let Event::WindowEvent { event, .. } = event else {
                    return;
                };
                let consumed = self
                    .gui
                    .as_mut()
                    .map_or(false, |gui_state| gui_state.on_event(&window, &event));
                match event {
                    WindowEvent::CloseRequested => target.exit(),
                    WindowEvent::Resized(size) => self.resize(size.width, size.height),
                    WindowEvent::RedrawRequested => {
                        if let Err(e) = self.render_frame() {
                            eprintln!("Render error: {e}");
                        }
                        window.request_redraw();
                    }
                    other => {
                        if !consumed {
                            if let Some(controls) = &mut self.controls {
                                controls.handle_event(&other);
                            }
                        }
                    }
                }
            })
            .map_err(|e| Error::Window(format!("event loop error: {e}")))
    }

    /// Mirror the camera's pose onto the scene's camera node so head-lights
    /// follow it
    fn sync_camera_node(&mut self) {
        let mut transform = Transform3D::identity();
        transform.set_position(self.camera.position);
        let camera_node = self.scene.camera_node();
        self.scene.set_transform(camera_node, transform);
    }
}
