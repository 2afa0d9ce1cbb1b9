//! Id-addressed scene graph
//!
//! The scene owns every node; callers hold copyable [`NodeId`]s. Two nodes
//! exist from the start: the root group and a camera node parented to the
//! root. The camera node mirrors the facade camera's pose each frame so that
//! objects parented to it (head-lights) follow camera movement.

use crate::geometry::Geometry;
use crate::light::Light;
use crate::material::{LineMaterial, MeshMaterial, PointsMaterial, ShaderMaterial};
use crate::transform::Transform3D;

/// Opaque handle to a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// The renderable payload of a scene node
#[derive(Debug, Clone)]
pub enum Object {
    /// Invisible grouping node
    Group,
    /// Solid triangle mesh
    Mesh {
        geometry: Geometry,
        material: MeshMaterial,
    },
    /// Point-cloud renderable
    Points {
        geometry: Geometry,
        material: PointsMaterial,
    },
    /// Polyline (`segments == false`) or disjoint segment list
    Line {
        geometry: Geometry,
        material: LineMaterial,
        segments: bool,
    },
    /// Mesh drawn with a caller-assembled shader program
    ShaderMesh {
        geometry: Geometry,
        material: ShaderMaterial,
    },
    /// Points drawn with a caller-assembled shader program
    ShaderPoints {
        geometry: Geometry,
        material: ShaderMaterial,
    },
    /// Light source; pose comes from the node transform
    Light(Light),
    /// Coordinate-axes gizmo of the given size
    Axes { size: f32 },
}

#[derive(Debug, Clone)]
struct Node {
    object: Object,
    transform: Transform3D,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    visible: bool,
    alive: bool,
}

/// Hierarchical container of renderable objects and lights
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
    root: NodeId,
    camera_node: NodeId,
}

impl Scene {
    /// Create a scene with its root and camera nodes
    pub fn new() -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            camera_node: NodeId(0),
        };
        scene.root = scene.push_node(Object::Group, None);
        scene.camera_node = scene.push_node(Object::Group, Some(scene.root));
        scene
    }

    fn push_node(&mut self, object: Object, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            object,
            transform: Transform3D::identity(),
            parent,
            children: Vec::new(),
            visible: true,
            alive: true,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// The root group node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The dedicated camera node, always a child of the root
    pub fn camera_node(&self) -> NodeId {
        self.camera_node
    }

    /// Add an object as a child of the root
    pub fn add(&mut self, object: Object) -> NodeId {
        self.push_node(object, Some(self.root))
    }

    /// Add an object as a child of an existing node
    pub fn add_child(&mut self, parent: NodeId, object: Object) -> NodeId {
        debug_assert!(self.is_alive(parent), "parent node was removed");
        self.push_node(object, Some(parent))
    }

    /// Detach a node and its descendants from the scene
    ///
    /// The root and the camera node cannot be removed. Ids are not reused;
    /// accessors on a removed id return `None`.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || id == self.camera_node || !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.nodes[id.0].parent {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            self.nodes[current.0].alive = false;
            self.nodes[current.0].parent = None;
            stack.extend(self.nodes[current.0].children.drain(..));
        }
    }

    /// Whether the id refers to a live node
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).map_or(false, |n| n.alive)
    }

    /// Number of live nodes, including root and camera node
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.alive).count()
    }

    /// Whether the scene holds nothing besides root and camera node
    pub fn is_empty(&self) -> bool {
        self.len() == 2
    }

    /// Parent of a node, `None` for the root or removed nodes
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.live(id).and_then(|n| n.parent)
    }

    /// Children of a node
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.live(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Borrow a node's object
    pub fn object(&self, id: NodeId) -> Option<&Object> {
        self.live(id).map(|n| &n.object)
    }

    /// Mutably borrow a node's object
    pub fn object_mut(&mut self, id: NodeId) -> Option<&mut Object> {
        self.live_mut(id).map(|n| &mut n.object)
    }

    /// A node's local transform
    pub fn transform(&self, id: NodeId) -> Option<Transform3D> {
        self.live(id).map(|n| n.transform)
    }

    /// Overwrite a node's local transform
    pub fn set_transform(&mut self, id: NodeId, transform: Transform3D) {
        if let Some(node) = self.live_mut(id) {
            node.transform = transform;
        }
    }

    /// Show or hide a subtree
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.live_mut(id) {
            node.visible = visible;
        }
    }

    /// Product of all ancestor transforms down to (and including) the node
    pub fn world_transform(&self, id: NodeId) -> Transform3D {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.live(node_id) {
                Some(node) => {
                    chain.push(node.transform);
                    current = node.parent;
                }
                None => return Transform3D::identity(),
            }
        }
        chain
            .into_iter()
            .rev()
            .fold(Transform3D::identity(), |acc, t| acc * t)
    }

    /// Pre-order walk over visible live nodes with accumulated world
    /// transforms
    pub fn visit<F: FnMut(NodeId, &Object, &Transform3D)>(&self, mut f: F) {
        self.visit_inner(self.root, Transform3D::identity(), &mut f);
    }

    fn visit_inner<F: FnMut(NodeId, &Object, &Transform3D)>(
        &self,
        id: NodeId,
        parent_world: Transform3D,
        f: &mut F,
    ) {
        let node = match self.live(id) {
            Some(n) if n.visible => n,
            _ => return,
        };
        let world = parent_world * node.transform;
        f(id, &node.object, &world);
        for &child in &node.children {
            self.visit_inner(child, world, f);
        }
    }

    fn live(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).filter(|n| n.alive)
    }

    fn live_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).filter(|n| n.alive)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point3f;
    use approx::assert_relative_eq;

    #[test]
    fn new_scene_holds_root_and_camera_node() {
        let scene = Scene::new();
        assert_eq!(scene.len(), 2);
        assert!(scene.is_empty());
        assert_eq!(scene.parent(scene.camera_node()), Some(scene.root()));
        assert_eq!(scene.parent(scene.root()), None);
    }

    #[test]
    fn add_parents_to_root() {
        let mut scene = Scene::new();
        let id = scene.add(Object::Group);
        assert_eq!(scene.parent(id), Some(scene.root()));
        assert!(scene.children(scene.root()).contains(&id));
    }

    #[test]
    fn remove_detaches_whole_subtree() {
        let mut scene = Scene::new();
        let group = scene.add(Object::Group);
        let child = scene.add_child(group, Object::Group);
        let grandchild = scene.add_child(child, Object::Group);
        scene.remove(group);
        assert!(!scene.is_alive(group));
        assert!(!scene.is_alive(child));
        assert!(!scene.is_alive(grandchild));
        assert!(!scene.children(scene.root()).contains(&group));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn root_and_camera_node_cannot_be_removed() {
        let mut scene = Scene::new();
        scene.remove(scene.root());
        scene.remove(scene.camera_node());
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn world_transform_composes_ancestors() {
        let mut scene = Scene::new();
        let group = scene.add(Object::Group);
        let child = scene.add_child(group, Object::Group);
        scene.set_transform(group, Transform3D::translation_xyz(1.0, 0.0, 0.0));
        scene.set_transform(child, Transform3D::translation_xyz(0.0, 2.0, 0.0));
        let world = scene.world_transform(child);
        let p = world.transform_point(&Point3f::origin());
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
    }

    #[test]
    fn visit_skips_hidden_subtrees() {
        let mut scene = Scene::new();
        let group = scene.add(Object::Group);
        scene.add_child(group, Object::Group);
        scene.set_visible(group, false);
        let mut seen = 0;
        scene.visit(|_, _, _| seen += 1);
        // Root and camera node only.
        assert_eq!(seen, 2);
    }
}
