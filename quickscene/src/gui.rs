//! Parameter panel and egui frame plumbing
//!
//! Demos tune named scalar parameters through sliders. The model lives here:
//! a [`Params`] table shared behind `Rc<RefCell<_>>`, bound to a [`Panel`]
//! of slider rows. The [`Gui`] type owns the egui context and winit state
//! and turns one panel pass into an [`OverlayFrame`] for the renderer. The
//! panel model works without a window, so headless tests can inspect
//! bindings directly.

use quickscene_gpu::OverlayFrame;
use std::cell::RefCell;
use std::rc::Rc;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::stats::FrameStats;

/// Ordered name -> value table of tunable parameters
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: Vec<(String, f32)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, inserting it at the end when new
    pub fn set(&mut self, key: impl Into<String>, value: f32) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shared handle letting the panel and the caller see the same values
pub type SharedParams = Rc<RefCell<Params>>;

/// Wrap a parameter table for sharing with the panel
pub fn shared_params(params: Params) -> SharedParams {
    Rc::new(RefCell::new(params))
}

/// Callback fired when a slider changes a parameter
pub type ChangeCallback = Rc<dyn Fn(&str, f32)>;

/// Per-bind slider configuration
///
/// `names` and `on_changes` are positional: the i-th entry applies to the
/// i-th bound key. A key without a positional callback falls back to the
/// shared `on_change`.
pub struct BindOptions {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub names: Vec<String>,
    pub on_changes: Vec<ChangeCallback>,
    pub on_change: Option<ChangeCallback>,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            min: -10.0,
            max: 10.0,
            step: 0.1,
            names: Vec::new(),
            on_changes: Vec::new(),
            on_change: None,
        }
    }
}

/// One slider row in the panel
pub struct SliderBinding {
    pub params: SharedParams,
    pub key: String,
    /// Display label; `None` shows the key itself
    pub label: Option<String>,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub on_change: Option<ChangeCallback>,
}

impl SliderBinding {
    fn show(&self, ui: &mut egui::Ui) {
        let mut value = self.params.borrow().get(&self.key).unwrap_or(0.0);
        let label = self.label.as_deref().unwrap_or(&self.key);
        let response = ui.add(
            egui::Slider::new(&mut value, self.min..=self.max)
                .step_by(self.step as f64)
                .text(label),
        );
        if response.changed() {
            self.params.borrow_mut().set(self.key.clone(), value);
            if let Some(on_change) = &self.on_change {
                on_change(&self.key, value);
            }
        }
    }
}

/// Slider panel bound to shared parameter tables
pub struct Panel {
    pub title: String,
    bindings: Vec<SliderBinding>,
}

impl Panel {
    pub fn new() -> Self {
        Self {
            title: "controls".to_string(),
            bindings: Vec::new(),
        }
    }

    /// Bind parameters as slider rows
    ///
    /// `keys` selects and orders the bound parameters; `None` binds every
    /// key in the table in insertion order.
    pub fn bind(&mut self, params: &SharedParams, keys: Option<&[&str]>, options: BindOptions) {
        let keys: Vec<String> = match keys {
            Some(keys) => keys.iter().map(|k| k.to_string()).collect(),
            None => params.borrow().keys().map(str::to_string).collect(),
        };
        for (index, key) in keys.into_iter().enumerate() {
            let on_change = options
                .on_changes
                .get(index)
                .cloned()
                .or_else(|| options.on_change.clone());
            self.bindings.push(SliderBinding {
                params: Rc::clone(params),
                key,
                label: options.names.get(index).cloned(),
                min: options.min,
                max: options.max,
                step: options.step,
                on_change,
            });
        }
    }

    pub fn bindings(&self) -> &[SliderBinding] {
        &self.bindings
    }

    /// Draw the panel window
    pub fn show(&mut self, ctx: &egui::Context) {
        egui::Window::new(&self.title)
            .resizable(false)
            .show(ctx, |ui| {
                for binding in &self.bindings {
                    binding.show(ui);
                }
            });
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw the frame-timing readout window
pub fn show_stats(ctx: &egui::Context, stats: &FrameStats) {
    egui::Window::new("stats")
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
        .show(ctx, |ui| {
            ui.label(format!("{:.0} fps", stats.fps()));
            ui.label(format!("{:.2} ms", stats.frame_time_ms()));
            ui.label(format!("frame {}", stats.frame_count()));
        });
}

/// egui context plus winit input state for one window
pub struct Gui {
    ctx: egui::Context,
    state: egui_winit::State,
}

impl Gui {
    pub fn new(window: &Window) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
        );
        Self { ctx, state }
    }

    /// Feed a window event; returns whether egui consumed it
    pub fn on_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run one GUI pass and tessellate it into an overlay frame
    pub fn frame(
        &mut self,
        window: &Window,
        run: impl FnOnce(&egui::Context),
    ) -> OverlayFrame {
        let input = self.state.take_egui_input(window);
        let output = self.ctx.run(input, run);
        self.state
            .handle_platform_output(window, output.platform_output);
        let primitives = self
            .ctx
            .tessellate(output.shapes, output.pixels_per_point);
        OverlayFrame {
            primitives,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_keep_insertion_order() {
        let mut params = Params::new();
        params.set("z", 1.0);
        params.set("a", 2.0);
        params.set("z", 3.0);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["z", "a"]);
        assert_eq!(params.get("z"), Some(3.0));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn bind_all_keys_in_order() {
        let params = shared_params({
            let mut p = Params::new();
            p.set("x", 0.0);
            p.set("y", 1.0);
            p
        });
        let mut panel = Panel::new();
        panel.bind(&params, None, BindOptions::default());
        let keys: Vec<_> = panel.bindings().iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["x", "y"]);
        assert_eq!(panel.bindings()[0].min, -10.0);
        assert_eq!(panel.bindings()[0].max, 10.0);
        assert_eq!(panel.bindings()[0].step, 0.1);
    }

    #[test]
    fn positional_names_apply_in_order() {
        let params = shared_params({
            let mut p = Params::new();
            p.set("x", 0.0);
            p.set("y", 0.0);
            p
        });
        let mut panel = Panel::new();
        panel.bind(
            &params,
            None,
            BindOptions {
                names: vec!["Alpha".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(panel.bindings()[0].label.as_deref(), Some("Alpha"));
        assert_eq!(panel.bindings()[1].label, None);
    }

    #[test]
    fn positional_callback_falls_back_to_shared() {
        use std::cell::RefCell;
        let hits: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let params = shared_params({
            let mut p = Params::new();
            p.set("x", 0.0);
            p.set("y", 0.0);
            p
        });
        let positional = {
            let hits = Rc::clone(&hits);
            Rc::new(move |key: &str, _| hits.borrow_mut().push(format!("pos:{key}")))
                as ChangeCallback
        };
        let shared = {
            let hits = Rc::clone(&hits);
            Rc::new(move |key: &str, _| hits.borrow_mut().push(format!("shared:{key}")))
                as ChangeCallback
        };
        let mut panel = Panel::new();
        panel.bind(
            &params,
            None,
            BindOptions {
                on_changes: vec![positional],
                on_change: Some(shared),
                ..Default::default()
            },
        );
        for binding in panel.bindings() {
            if let Some(cb) = &binding.on_change {
                cb(&binding.key, 1.0);
            }
        }
        assert_eq!(&*hits.borrow(), &["pos:x".to_string(), "shared:y".to_string()]);
    }

    #[test]
    fn subset_binding_selects_keys() {
        let params = shared_params({
            let mut p = Params::new();
            p.set("x", 0.0);
            p.set("y", 0.0);
            p.set("z", 0.0);
            p
        });
        let mut panel = Panel::new();
        panel.bind(&params, Some(&["z", "x"]), BindOptions::default());
        let keys: Vec<_> = panel.bindings().iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["z", "x"]);
    }
}
