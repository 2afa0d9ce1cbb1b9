//! Headless facade tests using a recording backend

use quickscene::{
    scene, BindOptions, Color, Geometry, ManualClock, MeshMaterial, Object, OverlayFrame,
    Params, PerspectiveCamera, RenderBackend, Result, Scene, SceneConfig, SceneFacade,
    shared_params,
};
use approx::assert_relative_eq;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Default)]
struct RenderLog {
    frames: Rc<Cell<u32>>,
    last_camera_pos: Rc<Cell<(f32, f32, f32)>>,
    last_node_count: Rc<Cell<usize>>,
}

struct RecordingBackend {
    size: (u32, u32),
    clear_color: Color,
    log: RenderLog,
}

impl RecordingBackend {
    fn new(width: u32, height: u32) -> (Self, RenderLog) {
        let log = RenderLog::default();
        (
            Self {
                size: (width, height),
                clear_color: Color::BLACK,
                log: log.clone(),
            },
            log,
        )
    }
}

impl RenderBackend for RecordingBackend {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width.max(1), height.max(1));
    }

    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        _overlay: Option<OverlayFrame>,
    ) -> Result<()> {
        self.log.frames.set(self.log.frames.get() + 1);
        self.log
            .last_camera_pos
            .set((camera.position.x, camera.position.y, camera.position.z));
        self.log.last_node_count.set(scene.len());
        Ok(())
    }
}

fn headless(config: SceneConfig) -> (SceneFacade, RenderLog) {
    let (backend, log) = RecordingBackend::new(640, 480);
    let facade = scene(config.with_backend(Box::new(backend))).expect("facade init");
    (facade, log)
}

#[test]
fn omitted_size_falls_back_to_backend_measurement() {
    let (facade, _) = headless(SceneConfig::new());
    assert_eq!(facade.backend().size(), (640, 480));
    assert_relative_eq!(facade.camera().aspect, 640.0 / 480.0);
}

#[test]
fn explicit_size_overrides_the_backend() {
    let (facade, _) = headless(SceneConfig::new().with_size(800, 600));
    assert_eq!(facade.backend().size(), (800, 600));
    assert_relative_eq!(facade.camera().aspect, 800.0 / 600.0);
    assert!(facade.frame_loop().is_running());
    assert_relative_eq!(facade.camera().position.z, 5.0);
}

#[test]
fn resize_updates_backend_and_camera_aspect() {
    let (mut facade, _) = headless(SceneConfig::new());
    facade.resize(1000, 500);
    assert_eq!(facade.backend().size(), (1000, 500));
    assert_relative_eq!(facade.camera().aspect, 2.0);
}

#[test]
fn injected_camera_is_kept() {
    let camera = PerspectiveCamera::new(
        quickscene::Point3f::new(1.0, 2.0, 3.0),
        quickscene::Point3f::origin(),
        1.0,
        1.0,
        0.1,
        100.0,
    );
    let (facade, _) = headless(SceneConfig::new().with_camera(camera));
    assert_relative_eq!(facade.camera().position.x, 1.0);
    assert_relative_eq!(facade.camera().position.z, 3.0);
}

#[test]
fn shape_defaults_to_wireframe_unit_cube_under_root() {
    let (mut facade, _) = headless(SceneConfig::new());
    let id = facade.shape(None, None);
    assert_eq!(facade.scene().parent(id), Some(facade.scene().root()));
    match facade.scene().object(id) {
        Some(Object::Mesh { geometry, material }) => {
            assert_eq!(geometry.positions.len(), 24);
            assert!(material.wireframe);
        }
        other => panic!("expected mesh, got {other:?}"),
    }
}

#[test]
fn light_sits_at_the_key_light_position() {
    let (mut facade, _) = headless(SceneConfig::new());
    let id = facade.light(None);
    assert_eq!(facade.scene().parent(id), Some(facade.scene().root()));
    let world = facade.scene().world_transform(id);
    let p = world.transform_point(&quickscene::Point3f::origin());
    assert_relative_eq!(p.x, 10.0);
    assert_relative_eq!(p.y, 10.0);
    assert_relative_eq!(p.z, 10.0);
}

#[test]
fn camera_light_parents_to_the_camera_node() {
    let (mut facade, _) = headless(SceneConfig::new());
    let id = facade.camera_light(None);
    assert_eq!(facade.scene().parent(id), Some(facade.scene().camera_node()));
    // The camera node mirrors the camera pose, so the head-light starts at
    // the default standoff.
    let world = facade.scene().world_transform(id);
    let p = world.transform_point(&quickscene::Point3f::origin());
    assert_relative_eq!(p.z, 5.0);
}

#[test]
fn vectors_builds_a_group_of_scaled_markers() {
    let (mut facade, _) = headless(SceneConfig::new());
    let tips = [
        quickscene::Vector3f::new(1.0, 0.0, 0.0),
        quickscene::Vector3f::new(0.0, 2.0, 0.0),
    ];
    let group = facade.vectors(&tips, None);
    let children = facade.scene().children(group).to_vec();
    assert_eq!(children.len(), 2);
    let world = facade.scene().world_transform(children[1]);
    let p = world.transform_point(&quickscene::Point3f::origin());
    assert_relative_eq!(p.y, 2.0);
    // Marker scale shrinks the cube.
    let corner = world.transform_point(&quickscene::Point3f::new(0.5, 0.5, 0.5));
    assert_relative_eq!(corner.y - p.y, 0.05, epsilon = 1e-6);
}

#[test]
fn batch_add_inserts_without_substitution() {
    let (mut facade, _) = headless(SceneConfig::new());
    let before = facade.scene().children(facade.scene().root()).len();
    let ids = facade.add([
        Object::Group,
        Object::Mesh {
            geometry: Geometry::plane(2.0, 2.0),
            material: MeshMaterial::lit(Color::RED),
        },
    ]);
    assert_eq!(ids.len(), 2);
    let after = facade.scene().children(facade.scene().root()).len();
    assert_eq!(after - before, 2);
    assert!(matches!(facade.scene().object(ids[0]), Some(Object::Group)));
}

#[test]
fn shader_shape_assembles_a_program() {
    let (mut facade, _) = headless(SceneConfig::new());
    let id = facade.shader_shape(None, quickscene::ShaderOptions::default());
    match facade.scene().object(id) {
        Some(Object::ShaderMesh { material, .. }) => {
            assert!(material.vertex_source.contains("fn vs_main"));
            assert!(material.fragment_source.contains("fn fs_main"));
        }
        other => panic!("expected shader mesh, got {other:?}"),
    }
}

#[test]
fn stopped_loop_skips_updates_and_draws_nothing() {
    let (mut facade, log) = headless(SceneConfig::new().with_render(false));
    assert!(!facade.frame_loop().is_running());
    assert_eq!(facade.update(), None);
    facade.render_frame().expect("render");
    assert_eq!(log.frames.get(), 0);

    facade.frame_loop_mut().start();
    assert!(facade.update().is_some());
    facade.render_frame().expect("render");
    assert_eq!(log.frames.get(), 1);
}

#[test]
fn manual_clock_makes_frame_deltas_deterministic() {
    let (mut facade, _) = headless(SceneConfig::new());
    let clock = ManualClock::new();
    let time = clock.handle();
    facade.frame_loop_mut().set_clock(Box::new(clock));

    assert_relative_eq!(facade.update().unwrap(), 0.0);
    time.set(0.5);
    assert_relative_eq!(facade.update().unwrap(), 0.5);
    time.set(0.75);
    assert_relative_eq!(facade.update().unwrap(), 0.25);
}

#[test]
fn animate_callback_sees_the_scene_and_delta() {
    let (mut facade, _) = headless(SceneConfig::new());
    let clock = ManualClock::new();
    let time = clock.handle();
    facade.frame_loop_mut().set_clock(Box::new(clock));

    let deltas: Rc<RefCell<Vec<f32>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&deltas);
    facade.set_animate(move |scene, dt| {
        sink.borrow_mut().push(dt);
        scene.add(Object::Group);
    });

    facade.update();
    time.set(0.1);
    facade.update();
    let deltas = deltas.borrow();
    assert_eq!(deltas.len(), 2);
    assert_relative_eq!(deltas[1], 0.1, epsilon = 1e-6);
    // The callback mutated the scene once per frame.
    assert_eq!(facade.scene().len(), 4);
}

#[test]
fn render_always_uses_the_current_camera() {
    let (mut facade, log) = headless(SceneConfig::new().without_controls());
    facade.render_frame().expect("render");
    assert_relative_eq!(log.last_camera_pos.get().2, 5.0);

    facade.camera_mut().position = quickscene::Point3f::new(0.0, 0.0, 9.0);
    facade.render_frame().expect("render");
    assert_relative_eq!(log.last_camera_pos.get().2, 9.0);
}

#[test]
fn render_sees_scene_mutations_between_frames() {
    let (mut facade, log) = headless(SceneConfig::new());
    facade.render_frame().expect("render");
    let base = log.last_node_count.get();
    facade.shape(None, None);
    facade.render_frame().expect("render");
    assert_eq!(log.last_node_count.get(), base + 1);
}

#[test]
fn tweens_advance_with_the_frame_loop() {
    let (mut facade, _) = headless(SceneConfig::new());
    let clock = ManualClock::new();
    let time = clock.handle();
    facade.frame_loop_mut().set_clock(Box::new(clock));

    let value = Rc::new(Cell::new(0.0f32));
    let sink = Rc::clone(&value);
    facade.add_tween(
        quickscene::Tween::new(0.0, 1.0, 2.0).on_update(move |v| sink.set(v)),
    );

    facade.update();
    time.set(1.0);
    facade.update();
    assert_relative_eq!(value.get(), 0.5);
    assert_eq!(facade.tweens().len(), 1);

    time.set(3.0);
    facade.update();
    assert_relative_eq!(value.get(), 1.0);
    assert!(facade.tweens().is_empty());
}

#[test]
fn panel_bindings_use_positional_names() {
    let (mut facade, _) = headless(SceneConfig::new().with_panel(true));
    let params = shared_params({
        let mut p = Params::new();
        p.set("a", 0.0);
        p.set("b", 0.0);
        p
    });
    facade.bind_panel(
        &params,
        Some(&["a", "b"]),
        BindOptions {
            names: vec!["Alpha".to_string()],
            ..Default::default()
        },
    );
    let panel = facade.panel().expect("panel enabled");
    assert_eq!(panel.bindings().len(), 2);
    assert_eq!(panel.bindings()[0].label.as_deref(), Some("Alpha"));
    assert_eq!(panel.bindings()[1].label, None);
}

#[test]
fn bind_panel_is_a_no_op_when_disabled() {
    let (mut facade, _) = headless(SceneConfig::new());
    let params = shared_params(Params::new());
    facade.bind_panel(&params, None, BindOptions::default());
    assert!(facade.panel().is_none());
}

#[test]
fn headless_facade_cannot_run_an_event_loop() {
    let (facade, _) = headless(SceneConfig::new());
    assert!(facade.run().is_err());
}

#[test]
fn stats_record_frames_when_enabled() {
    let (mut facade, _) = headless(SceneConfig::new().with_stats(true));
    facade.update();
    facade.update();
    assert_eq!(facade.stats().expect("stats enabled").frame_count(), 2);
}

#[test]
fn controls_keep_an_injected_standoff() {
    let camera = PerspectiveCamera::new(
        quickscene::Point3f::new(0.0, 0.0, 8.0),
        quickscene::Point3f::origin(),
        1.0,
        1.0,
        0.1,
        100.0,
    );
    let (mut facade, _) = headless(SceneConfig::new().with_camera(camera));
    facade.update();
    assert_relative_eq!(facade.camera().position.z, 8.0, epsilon = 1e-4);
}
