//! Built-in WGSL programs for the standard pipelines
//!
//! Bind group conventions, shared with the template model in
//! [`crate::template`]: camera at group 0 binding 0, lights at group 0
//! binding 1 (mesh pipeline only), per-draw model data at group 1 binding 0.

/// Shader for solid and wireframe mesh rendering with lambert lighting
pub const MESH_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    view_pos: vec4<f32>,
};

struct Model {
    model: mat4x4<f32>,
    color: vec4<f32>,
    params: vec4<f32>,
};

struct Light {
    position: vec4<f32>,
    color: vec4<f32>,
    direction: vec4<f32>,
};

struct Lights {
    items: array<Light, 8>,
    count: vec4<u32>,
};

@group(0) @binding(0) var<uniform> camera: Camera;
@group(0) @binding(1) var<uniform> lights: Lights;
@group(1) @binding(0) var<uniform> model: Model;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = model.model * vec4<f32>(in.position, 1.0);
    out.world_pos = world.xyz;
    out.normal = normalize((model.model * vec4<f32>(in.normal, 0.0)).xyz);
    out.color = in.color * model.color;
    out.clip_position = camera.view_proj * world;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // params.x == 1.0 marks unlit materials (wireframe, basic)
    if (model.params.x > 0.5) {
        return in.color;
    }
    var lit = vec3<f32>(0.0);
    let n = normalize(in.normal);
    for (var i = 0u; i < lights.count.x; i = i + 1u) {
        let light = lights.items[i];
        let kind = light.position.w;
        let tint = light.color.rgb * light.color.a;
        if (kind > 2.5) {
            lit += tint;
        } else if (kind > 1.5) {
            lit += tint * max(dot(n, normalize(-light.direction.xyz)), 0.0);
        } else {
            let to_light = light.position.xyz - in.world_pos;
            var factor = max(dot(n, normalize(to_light)), 0.0);
            if (kind < 0.5) {
                let cone = dot(normalize(-to_light), normalize(light.direction.xyz));
                factor = factor * select(0.0, 1.0, cone > light.direction.w);
            }
            lit += tint * factor;
        }
    }
    return vec4<f32>(in.color.rgb * lit, in.color.a);
}
"#;

/// Shader for point-cloud rendering
pub const POINT_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    view_pos: vec4<f32>,
};

struct Model {
    model: mat4x4<f32>,
    color: vec4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0) var<uniform> camera: Camera;
@group(1) @binding(0) var<uniform> model: Model;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) size: f32,
    @location(2) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) size: f32,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = camera.view_proj * model.model * vec4<f32>(in.position, 1.0);
    out.color = in.color * model.color;
    out.size = in.size * model.params.y;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Shader for line and line-segment rendering
pub const LINE_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    view_pos: vec4<f32>,
};

struct Model {
    model: mat4x4<f32>,
    color: vec4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0) var<uniform> camera: Camera;
@group(1) @binding(0) var<uniform> model: Model;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = camera.view_proj * model.model * vec4<f32>(in.position, 1.0);
    out.color = in.color * model.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
