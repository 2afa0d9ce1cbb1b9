//! Facade construction options

use quickscene_core::{Color, PerspectiveCamera};

use crate::backend::RenderBackend;
use crate::controls::OrbitControls;

/// Camera-control selection for a new facade
#[derive(Default)]
pub enum ControlsConfig {
    /// Orbit controls initialized from the camera pose
    #[default]
    Default,
    /// No camera controls
    Disabled,
    /// A pre-configured controller
    Custom(OrbitControls),
}

/// Options for [`SceneFacade::new`](crate::facade::SceneFacade::new)
///
/// Everything is optional: the zero-configuration default opens a window,
/// places the camera at the standard standoff, enables orbit controls and
/// starts rendering immediately.
pub struct SceneConfig {
    /// Drawable width in pixels; defaults to the backend's size
    pub width: Option<u32>,
    /// Drawable height in pixels; defaults to the backend's size
    pub height: Option<u32>,
    /// Window title
    pub title: Option<String>,
    /// Renderer substitute; `None` opens a window with the wgpu backend
    pub backend: Option<Box<dyn RenderBackend>>,
    /// Starting camera; `None` uses the default standoff camera
    pub camera: Option<PerspectiveCamera>,
    pub controls: ControlsConfig,
    pub clear_color: Color,
    /// Track and display frame timings
    pub stats: bool,
    /// Create the slider panel
    pub panel: bool,
    /// Whether the frame loop starts running
    pub render: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            title: None,
            backend: None,
            camera: None,
            controls: ControlsConfig::default(),
            clear_color: Color::BLACK,
            stats: false,
            panel: false,
            render: true,
        }
    }
}

impl SceneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_backend(mut self, backend: Box<dyn RenderBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_camera(mut self, camera: PerspectiveCamera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_controls(mut self, controls: OrbitControls) -> Self {
        self.controls = ControlsConfig::Custom(controls);
        self
    }

    pub fn without_controls(mut self) -> Self {
        self.controls = ControlsConfig::Disabled;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_stats(mut self, stats: bool) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_panel(mut self, panel: bool) -> Self {
        self.panel = panel;
        self
    }

    /// Set whether the frame loop starts running
    pub fn with_render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }
}
