//! Spinning wireframe cube with a head-light and a speed slider

use anyhow::Result;
use nalgebra::UnitQuaternion;
use quickscene::{
    scene, shared_params, BindOptions, Params, SceneConfig, Transform3D, Vector3f,
};

fn main() -> Result<()> {
    let mut facade = scene(
        SceneConfig::new()
            .with_title("quickscene: spinning cube")
            .with_size(1200, 800)
            .with_stats(true)
            .with_panel(true),
    )?;

    let cube = facade.shape(None, None);
    facade.camera_light(None);
    facade.axes(None);

    let params = shared_params({
        let mut p = Params::new();
        p.set("speed", 1.0);
        p
    });
    facade.bind_panel(
        &params,
        Some(&["speed"]),
        BindOptions {
            min: 0.0,
            max: 5.0,
            names: vec!["Spin speed".to_string()],
            ..Default::default()
        },
    );

    let mut angle = 0.0f32;
    let speed_params = params.clone();
    facade.set_animate(move |scene, dt| {
        let speed = speed_params.borrow().get("speed").unwrap_or(1.0);
        angle += dt * speed;
        let rotation = UnitQuaternion::from_axis_angle(&Vector3f::y_axis(), angle)
            * UnitQuaternion::from_axis_angle(&Vector3f::x_axis(), angle * 0.7);
        scene.set_transform(cube, Transform3D::rotation(rotation));
    });

    facade.run()?;
    Ok(())
}
