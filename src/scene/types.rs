//! Scene object data types.
//!
//! Geometry uses plain arrays (`[f32; 3]`) in data types; transforms use the
//! `nalgebra`-backed aliases from [`crate::math`].

use crate::math::Mat4;
use crate::scene::ObjectId;
use std::fmt;

/// The kind of payload a [`SceneObject`] carries.
///
/// Displayed lowercase in user-facing messages ("Active object must be a
/// mesh!").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Mesh,
    Armature,
    Empty,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mesh => write!(f, "mesh"),
            Self::Armature => write!(f, "armature"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Object payload: mesh data, armature data, or nothing.
#[derive(Debug, Clone)]
pub enum ObjectData {
    Mesh(MeshData),
    Armature(ArmatureData),
    Empty,
}

/// A single object in the scene graph.
///
/// The host evaluates and owns the world transform; `matrix_world` is a
/// snapshot of it. `matrix_parent_inverse` is the correction transform stored
/// on a child so that re-parenting does not visually move it.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Object name, unique within the owning [`Scene`](crate::scene::Scene).
    pub name: String,
    /// Parent object, if any.
    pub parent: Option<ObjectId>,
    /// Host-evaluated world transform snapshot.
    pub matrix_world: Mat4,
    /// Parent-inverse correction applied below the parent transform.
    pub matrix_parent_inverse: Mat4,
    /// Hidden objects cannot enter edit-capable modes.
    pub hidden: bool,
    /// Mesh or armature payload.
    pub data: ObjectData,
    /// Modifier stack, in evaluation order.
    pub modifiers: Vec<Modifier>,
}

impl SceneObject {
    /// Creates a mesh object with identity transforms and no modifiers.
    pub fn mesh(name: impl Into<String>, data: MeshData) -> Self {
        Self::new(name, ObjectData::Mesh(data))
    }

    /// Creates an armature object with identity transforms.
    pub fn armature(name: impl Into<String>, data: ArmatureData) -> Self {
        Self::new(name, ObjectData::Armature(data))
    }

    /// Creates an empty object.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, ObjectData::Empty)
    }

    fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            parent: None,
            matrix_world: Mat4::identity(),
            matrix_parent_inverse: Mat4::identity(),
            hidden: false,
            data,
            modifiers: Vec::new(),
        }
    }

    /// Set the parent object.
    #[must_use]
    pub fn with_parent(mut self, parent: ObjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the world transform snapshot.
    #[must_use]
    pub fn with_matrix_world(mut self, matrix_world: Mat4) -> Self {
        self.matrix_world = matrix_world;
        self
    }

    /// Set the hidden flag.
    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the modifier stack.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The kind of this object's payload.
    pub fn kind(&self) -> ObjectKind {
        match &self.data {
            ObjectData::Mesh(_) => ObjectKind::Mesh,
            ObjectData::Armature(_) => ObjectKind::Armature,
            ObjectData::Empty => ObjectKind::Empty,
        }
    }

    /// Mesh payload, if this is a mesh object.
    pub fn mesh_data(&self) -> Option<&MeshData> {
        match &self.data {
            ObjectData::Mesh(m) => Some(m),
            _ => None,
        }
    }

    /// Mutable mesh payload, if this is a mesh object.
    pub fn mesh_data_mut(&mut self) -> Option<&mut MeshData> {
        match &mut self.data {
            ObjectData::Mesh(m) => Some(m),
            _ => None,
        }
    }

    /// Armature payload, if this is an armature object.
    pub fn armature_data(&self) -> Option<&ArmatureData> {
        match &self.data {
            ObjectData::Armature(a) => Some(a),
            _ => None,
        }
    }

    /// Mutable armature payload, if this is an armature object.
    pub fn armature_data_mut(&mut self) -> Option<&mut ArmatureData> {
        match &mut self.data {
            ObjectData::Armature(a) => Some(a),
            _ => None,
        }
    }

    /// Iterates the Armature-kind modifiers on this object.
    pub fn armature_modifiers(&self) -> impl Iterator<Item = &Modifier> {
        self.modifiers.iter().filter(|m| m.is_armature())
    }
}

/// A modifier on a [`SceneObject`]'s stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    /// Modifier name, host-assigned.
    pub name: String,
    /// Modifier behavior and its parameters.
    pub kind: ModifierKind,
}

/// Modifier behavior. Only the Armature kind matters to this crate; the
/// others exist so that mixed stacks are representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifierKind {
    /// Binds the mesh to an armature object for skinning.
    Armature { object: Option<ObjectId> },
    Mirror,
    Subdivision,
}

impl Modifier {
    /// Creates an Armature modifier with the host's default name.
    pub fn armature(object: Option<ObjectId>) -> Self {
        Self {
            name: "Armature".to_string(),
            kind: ModifierKind::Armature { object },
        }
    }

    /// Whether this is an Armature-kind modifier.
    pub fn is_armature(&self) -> bool {
        matches!(self.kind, ModifierKind::Armature { .. })
    }

    /// The bound armature object, if this is an Armature modifier.
    pub fn armature_object(&self) -> Option<ObjectId> {
        match self.kind {
            ModifierKind::Armature { object } => object,
            _ => None,
        }
    }
}

/// A named vertex group.
///
/// Identity is the position in the owning mesh's ordered group sequence.
/// Indices shift when a group is removed, so they are order-dependent and
/// must never be cached across a structural mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexGroup {
    /// Group name, unique within its mesh.
    pub name: String,
}

/// One (group, weight) pair on a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexWeight {
    /// Index into the owning mesh's vertex-group sequence.
    pub group: usize,
    /// Weight in [0, 1]; strictly positive means "assigned".
    pub weight: f32,
}

/// A mesh vertex with its weight assignments.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Position [x, y, z] in object space.
    pub position: [f32; 3],
    /// Weight pairs; every `group` index must exist in the owning mesh.
    pub weights: Vec<VertexWeight>,
}

impl Vertex {
    /// Creates an unweighted vertex at `position`.
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            weights: Vec::new(),
        }
    }
}

/// Mesh payload: vertices plus the ordered vertex-group sequence.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Ordered group sequence; a group's index is its position here.
    pub vertex_groups: Vec<VertexGroup>,
    /// Mesh vertices.
    pub vertices: Vec<Vertex>,
}

impl MeshData {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vertices.
    #[must_use]
    pub fn with_vertices(mut self, vertices: Vec<Vertex>) -> Self {
        self.vertices = vertices;
        self
    }

    /// Fresh name-to-index lookup over the current group sequence.
    pub fn vertex_group_index(&self, name: &str) -> Option<usize> {
        self.vertex_groups.iter().position(|g| g.name == name)
    }

    /// Appends a vertex group and returns its index.
    pub fn add_vertex_group(&mut self, name: impl Into<String>) -> usize {
        self.vertex_groups.push(VertexGroup { name: name.into() });
        self.vertex_groups.len() - 1
    }

    /// Returns the index of the named group, creating it if absent.
    pub fn ensure_vertex_group(&mut self, name: &str) -> usize {
        match self.vertex_group_index(name) {
            Some(index) => index,
            None => self.add_vertex_group(name),
        }
    }

    /// Removes the group at `index` and restores the weight-pair invariant:
    /// pairs referencing the removed index are dropped, pairs referencing
    /// higher indices shift down by one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range, like `Vec::remove`.
    pub fn remove_vertex_group(&mut self, index: usize) {
        self.vertex_groups.remove(index);
        for vertex in &mut self.vertices {
            vertex.weights.retain(|w| w.group != index);
            for w in &mut vertex.weights {
                if w.group > index {
                    w.group -= 1;
                }
            }
        }
    }

    /// Replace-or-insert the weight pair for `group` on vertex `vertex`.
    /// The weight is clamped to [0, 1].
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range.
    pub fn set_weight(&mut self, vertex: usize, group: usize, weight: f32) {
        let weight = weight.clamp(0.0, 1.0);
        let weights = &mut self.vertices[vertex].weights;
        match weights.iter_mut().find(|w| w.group == group) {
            Some(pair) => pair.weight = weight,
            None => weights.push(VertexWeight { group, weight }),
        }
    }

    /// The weight of `group` on vertex `vertex`, if the pair is assigned.
    pub fn weight(&self, vertex: usize, group: usize) -> Option<f32> {
        self.vertices
            .get(vertex)?
            .weights
            .iter()
            .find(|w| w.group == group)
            .map(|w| w.weight)
    }
}

/// A bone in an armature.
///
/// The parent edge is name-keyed; the armature owns all bones and the host
/// guarantees the edges form a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bone {
    /// Bone name, unique within the armature.
    pub name: String,
    /// Parent bone name, if any.
    pub parent: Option<String>,
}

impl Bone {
    /// Creates a root bone.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    /// Set the parent bone name.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// Armature payload: an ordered forest of named bones.
#[derive(Debug, Clone, Default)]
pub struct ArmatureData {
    /// Bones in host order; names unique within the armature.
    pub bones: Vec<Bone>,
}

impl ArmatureData {
    /// Creates an empty armature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bones.
    #[must_use]
    pub fn with_bones(mut self, bones: Vec<Bone>) -> Self {
        self.bones = bones;
        self
    }

    /// Looks up a bone by name.
    pub fn bone(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|b| b.name == name)
    }

    /// Whether a bone with `name` exists.
    pub fn has_bone(&self, name: &str) -> bool {
        self.bone(name).is_some()
    }

    /// Appends a bone.
    pub fn add_bone(&mut self, bone: Bone) {
        self.bones.push(bone);
    }

    /// Bone names in armature order.
    pub fn bone_names(&self) -> Vec<String> {
        self.bones.iter().map(|b| b.name.clone()).collect()
    }

    /// Removes the named bone. Idempotent: returns `false` when absent.
    ///
    /// Children of a removed bone are NOT reparented; their parent name
    /// dangles. Accepted trade-off of name-matching pruning.
    pub fn remove_bone(&mut self, name: &str) -> bool {
        match self.bones.iter().position(|b| b.name == name) {
            Some(index) => {
                self.bones.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_kind_display_is_lowercase() {
        assert_eq!(ObjectKind::Mesh.to_string(), "mesh");
        assert_eq!(ObjectKind::Armature.to_string(), "armature");
        assert_eq!(ObjectKind::Empty.to_string(), "empty");
    }

    #[test]
    fn mesh_object_builder() {
        let obj = SceneObject::mesh("Body", MeshData::new())
            .with_hidden(true)
            .with_modifiers(vec![Modifier::armature(None)]);
        assert_eq!(obj.kind(), ObjectKind::Mesh);
        assert!(obj.hidden);
        assert!(obj.parent.is_none());
        assert_eq!(obj.armature_modifiers().count(), 1);
    }

    #[test]
    fn armature_modifier_accessors() {
        let modifier = Modifier::armature(None);
        assert_eq!(modifier.name, "Armature");
        assert!(modifier.is_armature());
        assert_eq!(modifier.armature_object(), None);

        let mirror = Modifier {
            name: "Mirror".to_string(),
            kind: ModifierKind::Mirror,
        };
        assert!(!mirror.is_armature());
        assert_eq!(mirror.armature_object(), None);
    }

    #[test]
    fn ensure_vertex_group_reuses_existing() {
        let mut mesh = MeshData::new();
        let hip = mesh.add_vertex_group("Hip");
        assert_eq!(mesh.ensure_vertex_group("Hip"), hip);
        assert_eq!(mesh.ensure_vertex_group("Spine"), 1);
        assert_eq!(mesh.vertex_groups.len(), 2);
    }

    #[test]
    fn set_weight_replaces_and_clamps() {
        let mut mesh = MeshData::new().with_vertices(vec![Vertex::at([0.0, 0.0, 0.0])]);
        mesh.add_vertex_group("Hip");
        mesh.set_weight(0, 0, 0.5);
        mesh.set_weight(0, 0, 2.0);
        assert_eq!(mesh.weight(0, 0), Some(1.0));
        assert_eq!(mesh.vertices[0].weights.len(), 1);
        mesh.set_weight(0, 0, -3.0);
        assert_eq!(mesh.weight(0, 0), Some(0.0));
    }

    #[test]
    fn remove_vertex_group_shifts_weight_indices() {
        let mut mesh = MeshData::new().with_vertices(vec![Vertex::at([0.0, 0.0, 0.0])]);
        mesh.add_vertex_group("A");
        mesh.add_vertex_group("B");
        mesh.add_vertex_group("C");
        mesh.set_weight(0, 0, 0.1);
        mesh.set_weight(0, 1, 0.2);
        mesh.set_weight(0, 2, 0.3);

        mesh.remove_vertex_group(1);

        assert_eq!(mesh.vertex_group_index("A"), Some(0));
        assert_eq!(mesh.vertex_group_index("C"), Some(1));
        // B's pair dropped, C's pair shifted down to the new index.
        assert_eq!(mesh.vertices[0].weights.len(), 2);
        assert_eq!(mesh.weight(0, 0), Some(0.1));
        assert_eq!(mesh.weight(0, 1), Some(0.3));
    }

    #[test]
    fn remove_bone_is_idempotent() {
        let mut armature = ArmatureData::new().with_bones(vec![
            Bone::new("Hip"),
            Bone::new("Spine").with_parent("Hip"),
        ]);
        assert!(armature.remove_bone("Spine"));
        assert!(!armature.remove_bone("Spine"));
        assert_eq!(armature.bone_names(), vec!["Hip".to_string()]);
    }

    #[test]
    fn removed_bone_children_keep_dangling_parent() {
        let mut armature = ArmatureData::new().with_bones(vec![
            Bone::new("Hip"),
            Bone::new("Spine").with_parent("Hip"),
            Bone::new("Head").with_parent("Spine"),
        ]);
        assert!(armature.remove_bone("Spine"));
        let head = armature.bone("Head").unwrap();
        assert_eq!(head.parent.as_deref(), Some("Spine"));
        assert!(!armature.has_bone("Spine"));
    }
}
