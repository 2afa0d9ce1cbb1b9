//! Colored spiral point field, lifted into place by a tween

use anyhow::Result;
use quickscene::{
    scene, Color, Easing, Geometry, Point3f, PointsMaterial, SceneConfig, Transform3D, Tween,
};
use std::cell::Cell;
use std::rc::Rc;

fn spiral(count: usize) -> Geometry {
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    for i in 0..count {
        let t = i as f32 / count as f32;
        let angle = t * 20.0 * std::f32::consts::PI;
        let radius = 2.0 * t;
        positions.push(Point3f::new(
            radius * angle.cos(),
            4.0 * t - 2.0,
            radius * angle.sin(),
        ));
        colors.push(Color::rgb(t, 0.3, 1.0 - t));
    }
    let mut geometry = Geometry::from_positions(positions);
    geometry.set_colors(colors);
    geometry
}

fn main() -> Result<()> {
    let mut facade = scene(
        SceneConfig::new()
            .with_title("quickscene: point field")
            .with_stats(true),
    )?;

    let field = facade.points(
        Some(spiral(4000)),
        Some(PointsMaterial {
            size: 2.0,
            color: Color::WHITE,
        }),
    );
    facade.axes(Some(2.5));

    // Drop the field in from above over the first two seconds.
    let lift = Rc::new(Cell::new(6.0f32));
    let sink = Rc::clone(&lift);
    facade.add_tween(
        Tween::new(6.0, 0.0, 2.0)
            .with_easing(Easing::QuadInOut)
            .on_update(move |y| sink.set(y)),
    );
    let height = Rc::clone(&lift);
    facade.set_animate(move |scene, _dt| {
        scene.set_transform(field, Transform3D::translation_xyz(0.0, height.get(), 0.0));
    });

    facade.run()?;
    Ok(())
}
