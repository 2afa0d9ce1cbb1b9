//! Scene composition facade over the quickscene renderer
//!
//! One call builds a window, a GPU renderer, a scene graph, a default camera
//! with orbit controls and a running frame loop:
//!
//! ```no_run
//! use quickscene::{scene, SceneConfig};
//!
//! let mut facade = scene(SceneConfig::new().with_title("demo"))?;
//! facade.shape(None, None);
//! facade.camera_light(None);
//! facade.run()?;
//! # Ok::<(), quickscene::Error>(())
//! ```
//!
//! Every piece is replaceable: inject a [`RenderBackend`] to run headless,
//! swap the camera or controls, stop and restart the [`FrameLoop`], or drive
//! frames manually with [`SceneFacade::update`] and
//! [`SceneFacade::render_frame`].

pub mod backend;
pub mod config;
pub mod controls;
pub mod facade;
pub mod frame;
pub mod gui;
pub mod stats;
pub mod tween;

pub use backend::{RenderBackend, WgpuBackend};
pub use config::{ControlsConfig, SceneConfig};
pub use controls::OrbitControls;
pub use facade::{SceneFacade, ShaderOptions};
pub use frame::{Clock, FrameLoop, ManualClock, SystemClock};
pub use gui::{shared_params, BindOptions, Panel, Params, SharedParams, SliderBinding};
pub use stats::FrameStats;
pub use tween::{Easing, Tween, TweenSet};

pub use quickscene_core::*;
pub use quickscene_gpu as gpu;
pub use quickscene_gpu::{Fragment, OverlayFrame, RenderConfig, StageFragments};

/// Build a [`SceneFacade`] from the configuration
pub fn scene(config: SceneConfig) -> Result<SceneFacade> {
    SceneFacade::new(config)
}
