//! Custom vertex displacement through the shader slot model

use anyhow::Result;
use quickscene::{scene, Geometry, SceneConfig, ShaderOptions, StageFragments};

fn main() -> Result<()> {
    let mut facade = scene(SceneConfig::new().with_title("quickscene: shader wave"))?;

    let vertex = StageFragments::default()
        .with_init(vec![
            "let wave = sin(in.position.x * 4.0) * 0.2;",
        ])
        .with_main(vec![
            "let displaced = vec3<f32>(in.position.x, in.position.y + wave, in.position.z);",
            "let world = model.model * vec4<f32>(displaced, 1.0);",
            "out.world_pos = world.xyz;",
            "out.normal = normalize((model.model * vec4<f32>(in.normal, 0.0)).xyz);",
            "out.clip_position = camera.view_proj * world;",
        ]);
    let fragment = StageFragments::default().with_main(vec![
        "return vec4<f32>(0.3 + 0.7 * abs(in.world_pos.y), 0.5, 1.0 - abs(in.world_pos.y), 1.0);",
    ]);

    facade.shader_shape(
        Some(Geometry::plane(4.0, 4.0)),
        ShaderOptions {
            vertex,
            fragment,
            point_size: 1.0,
        },
    );
    facade.axes(None);

    facade.run()?;
    Ok(())
}
