//! Slot-based WGSL program assembly
//!
//! Custom shader materials are built from a fixed, ordered list of sections
//! per stage: boilerplate text interleaved with three named injection slots
//! (declarations, init statements, position/size computation). Callers fill
//! slots with [`Fragment`]s; an absent declarations/init slot contributes
//! empty text, an absent main slot falls back to the built-in stage body.
//! Assembly is pure text substitution: identical fragments always produce
//! byte-identical programs.

use serde::{Deserialize, Serialize};

/// The three injection points per program stage, in assembly order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotId {
    /// Module-level declarations (bindings, structs, helper functions)
    Declarations,
    /// Statements at the top of the entry point
    Init,
    /// The position/size (vertex) or color (fragment) computation
    Main,
}

/// A caller-supplied piece of WGSL source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Fragment {
    /// No source supplied; the slot uses its default text
    #[default]
    Absent,
    Source(String),
}

impl Fragment {
    /// Build a fragment from individual lines, joined with newlines
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let joined = lines
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .join("\n");
        Fragment::Source(joined)
    }

    fn resolve<'a>(&'a self, default: &'a str) -> &'a str {
        match self {
            Fragment::Absent => default,
            Fragment::Source(source) => source,
        }
    }
}

impl From<&str> for Fragment {
    fn from(source: &str) -> Self {
        Fragment::Source(source.to_string())
    }
}

impl From<String> for Fragment {
    fn from(source: String) -> Self {
        Fragment::Source(source)
    }
}

impl From<Vec<&str>> for Fragment {
    fn from(lines: Vec<&str>) -> Self {
        Fragment::lines(lines)
    }
}

impl From<&[&str]> for Fragment {
    fn from(lines: &[&str]) -> Self {
        Fragment::lines(lines.iter().copied())
    }
}

/// Slot contents for one program stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageFragments {
    pub declarations: Fragment,
    pub init: Fragment,
    pub main: Fragment,
}

impl StageFragments {
    pub fn with_declarations(mut self, fragment: impl Into<Fragment>) -> Self {
        self.declarations = fragment.into();
        self
    }

    pub fn with_init(mut self, fragment: impl Into<Fragment>) -> Self {
        self.init = fragment.into();
        self
    }

    pub fn with_main(mut self, fragment: impl Into<Fragment>) -> Self {
        self.main = fragment.into();
        self
    }

    fn slot(&self, id: SlotId) -> &Fragment {
        match id {
            SlotId::Declarations => &self.declarations,
            SlotId::Init => &self.init,
            SlotId::Main => &self.main,
        }
    }
}

enum Section {
    Text(&'static str),
    Slot(SlotId),
}

struct StageTemplate {
    sections: &'static [Section],
    /// Built-in body substituted when the main slot is absent
    default_main: &'static str,
}

impl StageTemplate {
    fn assemble(&self, fragments: &StageFragments) -> String {
        let mut out = String::new();
        for section in self.sections {
            match section {
                Section::Text(text) => out.push_str(text),
                Section::Slot(id) => {
                    let default = match id {
                        SlotId::Main => self.default_main,
                        _ => "",
                    };
                    let text = fragments.slot(*id).resolve(default);
                    if !text.is_empty() {
                        out.push_str(text);
                        if !text.ends_with('\n') {
                            out.push('\n');
                        }
                    }
                }
            }
        }
        out
    }
}

/// An assembled WGSL program pair
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderProgram {
    pub vertex: String,
    pub fragment: String,
}

const COMMON_BINDINGS: &str = "\
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

";

const MESH_IO: &str = "\
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

";

const POINTS_IO: &str = "\
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

";

const MESH_VERTEX: StageTemplate = StageTemplate {
    sections: &[
        Section::Text(COMMON_BINDINGS),
        Section::Text(MESH_IO),
        Section::Slot(SlotId::Declarations),
        Section::Text(
            "@vertex\n\
             fn vs_main(in: VertexInput) -> VertexOutput {\n\
             \x20   var out: VertexOutput;\n\
             \x20   out.color = in.color * model.color;\n",
        ),
        Section::Slot(SlotId::Init),
        Section::Slot(SlotId::Main),
        Section::Text("    return out;\n}\n"),
    ],
    default_main: "\
\x20   let world = model.model * vec4<f32>(in.position, 1.0);
\x20   out.world_pos = world.xyz;
\x20   out.normal = normalize((model.model * vec4<f32>(in.normal, 0.0)).xyz);
\x20   out.clip_position = camera.view_proj * world;
",
};

const POINTS_VERTEX: StageTemplate = StageTemplate {
    sections: &[
        Section::Text(COMMON_BINDINGS),
        Section::Text(POINTS_IO),
        Section::Slot(SlotId::Declarations),
        Section::Text(
            "@vertex\n\
             fn vs_main(in: VertexInput) -> VertexOutput {\n\
             \x20   var out: VertexOutput;\n\
             \x20   out.color = in.color * model.color;\n",
        ),
        Section::Slot(SlotId::Init),
        Section::Slot(SlotId::Main),
        Section::Text("    return out;\n}\n"),
    ],
    default_main: "\
\x20   out.clip_position = camera.view_proj * model.model * vec4<f32>(in.position, 1.0);
\x20   out.size = in.size * model.params.y;
",
};

const MESH_FRAGMENT: StageTemplate = StageTemplate {
    sections: &[
        Section::Text(COMMON_BINDINGS),
        Section::Text(MESH_IO),
        Section::Slot(SlotId::Declarations),
        Section::Text(
            "@fragment\n\
             fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {\n",
        ),
        Section::Slot(SlotId::Init),
        Section::Slot(SlotId::Main),
        Section::Text("}\n"),
    ],
    default_main: "    return in.color;\n",
};

const POINTS_FRAGMENT: StageTemplate = StageTemplate {
    sections: &[
        Section::Text(COMMON_BINDINGS),
        Section::Text(POINTS_IO),
        Section::Slot(SlotId::Declarations),
        Section::Text(
            "@fragment\n\
             fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {\n",
        ),
        Section::Slot(SlotId::Init),
        Section::Slot(SlotId::Main),
        Section::Text("}\n"),
    ],
    default_main: "    return in.color;\n",
};

/// Assemble the WGSL pair for a custom mesh material
pub fn assemble_mesh_program(
    vertex: &StageFragments,
    fragment: &StageFragments,
) -> ShaderProgram {
    ShaderProgram {
        vertex: MESH_VERTEX.assemble(vertex),
        fragment: MESH_FRAGMENT.assemble(fragment),
    }
}

/// Assemble the WGSL pair for a custom points material
pub fn assemble_points_program(
    vertex: &StageFragments,
    fragment: &StageFragments,
) -> ShaderProgram {
    ShaderProgram {
        vertex: POINTS_VERTEX.assemble(vertex),
        fragment: POINTS_FRAGMENT.assemble(fragment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembly_is_idempotent() {
        let vertex = StageFragments::default()
            .with_declarations("fn wobble(p: vec3<f32>) -> vec3<f32> { return p; }")
            .with_main("    out.clip_position = camera.view_proj * vec4<f32>(wobble(in.position), 1.0);");
        let fragment = StageFragments::default();
        let a = assemble_mesh_program(&vertex, &fragment);
        let b = assemble_mesh_program(&vertex, &fragment);
        assert_eq!(a, b);
    }

    #[test]
    fn absent_main_uses_builtin_body() {
        let program = assemble_mesh_program(&StageFragments::default(), &StageFragments::default());
        assert!(program.vertex.contains("camera.view_proj * world"));
        assert!(program.fragment.contains("return in.color;"));
    }

    #[test]
    fn custom_main_replaces_builtin_body() {
        let vertex = StageFragments::default().with_main("    out.clip_position = vec4<f32>(in.position, 1.0);");
        let program = assemble_mesh_program(&vertex, &StageFragments::default());
        assert!(program.vertex.contains("out.clip_position = vec4<f32>(in.position, 1.0);"));
        assert!(!program.vertex.contains("camera.view_proj * world"));
    }

    #[test]
    fn line_fragments_join_with_newlines() {
        let fragment = Fragment::lines(["let a = 1.0;", "let b = 2.0;"]);
        assert_eq!(
            fragment,
            Fragment::Source("let a = 1.0;\nlet b = 2.0;".to_string())
        );
        let vertex = StageFragments::default().with_init(vec!["let a = 1.0;", "let b = 2.0;"]);
        let program = assemble_points_program(&vertex, &StageFragments::default());
        assert!(program.vertex.contains("let a = 1.0;\nlet b = 2.0;\n"));
    }

    #[test]
    fn absent_optional_slots_contribute_nothing() {
        let bare = assemble_points_program(&StageFragments::default(), &StageFragments::default());
        let with_decl = assemble_points_program(
            &StageFragments::default().with_declarations("fn helper() -> f32 { return 1.0; }"),
            &StageFragments::default(),
        );
        assert!(with_decl.vertex.len() > bare.vertex.len());
        assert!(!bare.vertex.contains("helper"));
    }

    #[test]
    fn points_default_main_scales_size() {
        let program =
            assemble_points_program(&StageFragments::default(), &StageFragments::default());
        assert!(program.vertex.contains("in.size * model.params.y"));
    }
}
