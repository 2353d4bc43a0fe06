//! Scene arena and host-level primitives.

use crate::math::{transform_point, Vec3};
use crate::ops::OpError;
use crate::scene::{ObjectData, SceneObject};

/// Handle to an object in a [`Scene`].
///
/// Objects are never removed from the arena by this crate, so handles stay
/// valid for the life of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) usize);

/// Arena of scene objects plus the host-level primitives the operators call.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object, making its name unique with a `.001`-style numeric
    /// suffix on collision. Returns the handle.
    pub fn add_object(&mut self, mut object: SceneObject) -> ObjectId {
        object.name = self.unique_name(&object.name);
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    /// Looks up an object by handle.
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    /// Looks up an object by handle, mutably.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    /// Iterates all objects with their handles.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().enumerate().map(|(i, o)| (ObjectId(i), o))
    }

    /// Looks up an object handle by name.
    pub fn object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().position(|o| o.name == name).map(ObjectId)
    }

    /// Deep-copies an object under a fresh unique name.
    ///
    /// The copy keeps the original's parent link; detaching it is the
    /// caller's choice. Returns `None` for a dangling handle.
    pub fn duplicate_object(&mut self, id: ObjectId) -> Option<ObjectId> {
        let copy = self.object(id)?.clone();
        let new_id = self.add_object(copy);
        log::debug!(
            "duplicated '{}' as '{}'",
            self.objects[id.0].name,
            self.objects[new_id.0].name
        );
        Some(new_id)
    }

    /// The host's generic attribute-transfer primitive configured for
    /// weight-group data.
    ///
    /// For every destination vertex, finds the nearest source vertex under
    /// the object (world) transforms and copies its weight for every source
    /// group, replace-style including zeros. Groups are matched source to
    /// destination by NAME; missing destination groups are created. Returns
    /// the number of source groups transferred.
    ///
    /// A source mesh with zero vertices transfers group shells only.
    pub fn transfer_vertex_group_weights(
        &mut self,
        src: ObjectId,
        dst: ObjectId,
    ) -> Result<usize, OpError> {
        let src_obj = self.object(src).ok_or(OpError::ObjectNotFound)?;
        let ObjectData::Mesh(src_mesh) = &src_obj.data else {
            return Err(OpError::NotAMesh {
                object: src_obj.name.clone(),
            });
        };
        let src_name = src_obj.name.clone();
        let group_names: Vec<String> = src_mesh
            .vertex_groups
            .iter()
            .map(|g| g.name.clone())
            .collect();
        let src_world = src_obj.matrix_world;
        let src_points: Vec<Vec3> = src_mesh
            .vertices
            .iter()
            .map(|v| transform_point(&src_world, v.position))
            .collect();
        let src_vertices = src_mesh.vertices.clone();

        let dst_obj = self.object_mut(dst).ok_or(OpError::ObjectNotFound)?;
        let dst_name = dst_obj.name.clone();
        let dst_world = dst_obj.matrix_world;
        let ObjectData::Mesh(dst_mesh) = &mut dst_obj.data else {
            return Err(OpError::NotAMesh { object: dst_name });
        };

        // Destination layers matched by name, created when missing.
        let group_map: Vec<usize> = group_names
            .iter()
            .map(|name| dst_mesh.ensure_vertex_group(name))
            .collect();

        if src_vertices.is_empty() {
            log::warn!(
                "'{src_name}' has no vertices; transferred group shells only to '{dst_name}'"
            );
            return Ok(group_names.len());
        }

        for vi in 0..dst_mesh.vertices.len() {
            let p = transform_point(&dst_world, dst_mesh.vertices[vi].position);
            let mut nearest = 0usize;
            let mut best = f32::INFINITY;
            for (i, sp) in src_points.iter().enumerate() {
                let d = (p - sp).norm_squared();
                if d < best {
                    best = d;
                    nearest = i;
                }
            }
            for (src_index, &dst_index) in group_map.iter().enumerate() {
                let weight = src_vertices[nearest]
                    .weights
                    .iter()
                    .find(|w| w.group == src_index)
                    .map(|w| w.weight)
                    .unwrap_or(0.0);
                dst_mesh.set_weight(vi, dst_index, weight);
            }
        }

        log::debug!(
            "transferred {} vertex groups from '{src_name}' to '{dst_name}'",
            group_names.len()
        );
        Ok(group_names.len())
    }

    fn unique_name(&self, base: &str) -> String {
        if self.object_by_name(base).is_none() {
            return base.to_string();
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}.{n:03}");
            if self.object_by_name(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Mat4;
    use crate::scene::{MeshData, Modifier, Vertex};

    fn weighted_mesh() -> MeshData {
        let mut mesh = MeshData::new().with_vertices(vec![
            Vertex::at([0.0, 0.0, 0.0]),
            Vertex::at([1.0, 0.0, 0.0]),
        ]);
        mesh.add_vertex_group("Hip");
        mesh.add_vertex_group("Spine");
        mesh.set_weight(0, 0, 1.0);
        mesh.set_weight(1, 1, 0.75);
        mesh
    }

    #[test]
    fn name_collision_gets_numeric_suffix() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::empty("Cube"));
        let second = scene.add_object(SceneObject::empty("Cube"));
        let third = scene.add_object(SceneObject::empty("Cube"));
        assert_eq!(scene.object(second).unwrap().name, "Cube.001");
        assert_eq!(scene.object(third).unwrap().name, "Cube.002");
    }

    #[test]
    fn duplicate_keeps_parent_and_renames() {
        let mut scene = Scene::new();
        let root = scene.add_object(SceneObject::empty("Root"));
        let child = scene.add_object(SceneObject::empty("Child").with_parent(root));
        let copy = scene.duplicate_object(child).unwrap();
        let copy_obj = scene.object(copy).unwrap();
        assert_eq!(copy_obj.name, "Child.001");
        assert_eq!(copy_obj.parent, Some(root));
        // Original untouched.
        assert_eq!(scene.object(child).unwrap().name, "Child");
    }

    #[test]
    fn transfer_matches_groups_by_name() {
        let mut scene = Scene::new();
        let src = scene.add_object(SceneObject::mesh("Body", weighted_mesh()));
        // Destination already has "Spine" first, so index orders differ.
        let mut dst_mesh = MeshData::new().with_vertices(vec![Vertex::at([0.0, 0.0, 0.0])]);
        dst_mesh.add_vertex_group("Spine");
        let dst = scene.add_object(SceneObject::mesh("Shirt", dst_mesh));

        let transferred = scene.transfer_vertex_group_weights(src, dst).unwrap();
        assert_eq!(transferred, 2);

        let dst_mesh = scene.object(dst).unwrap().mesh_data().unwrap();
        // "Hip" created after the pre-existing "Spine".
        assert_eq!(dst_mesh.vertex_group_index("Spine"), Some(0));
        assert_eq!(dst_mesh.vertex_group_index("Hip"), Some(1));
        // Nearest source vertex to the origin is v0: Hip=1.0, Spine absent -> 0.
        assert_eq!(dst_mesh.weight(0, 1), Some(1.0));
        assert_eq!(dst_mesh.weight(0, 0), Some(0.0));
    }

    #[test]
    fn transfer_uses_world_transforms_for_correspondence() {
        let mut scene = Scene::new();
        let src = scene.add_object(SceneObject::mesh("Body", weighted_mesh()));
        // The destination vertex sits at local origin but its object is
        // translated next to source v1 in world space.
        let dst_mesh = {
            let mut mesh = MeshData::new().with_vertices(vec![Vertex::at([0.0, 0.0, 0.0])]);
            mesh.add_vertex_group("Hip");
            mesh
        };
        let dst = scene.add_object(
            SceneObject::mesh("Shirt", dst_mesh)
                .with_matrix_world(Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0))),
        );

        scene.transfer_vertex_group_weights(src, dst).unwrap();
        let dst_mesh = scene.object(dst).unwrap().mesh_data().unwrap();
        // Nearest is source v1: Hip absent -> 0, Spine=0.75.
        let spine = dst_mesh.vertex_group_index("Spine").unwrap();
        let hip = dst_mesh.vertex_group_index("Hip").unwrap();
        assert_eq!(dst_mesh.weight(0, spine), Some(0.75));
        assert_eq!(dst_mesh.weight(0, hip), Some(0.0));
    }

    #[test]
    fn transfer_from_empty_source_creates_shells_only() {
        let mut scene = Scene::new();
        let mut src_mesh = MeshData::new();
        src_mesh.add_vertex_group("Hip");
        src_mesh.add_vertex_group("Spine");
        let src = scene.add_object(SceneObject::mesh("Body", src_mesh));
        let dst = scene.add_object(SceneObject::mesh(
            "Shirt",
            MeshData::new().with_vertices(vec![Vertex::at([0.0, 0.0, 0.0])]),
        ));

        let transferred = scene.transfer_vertex_group_weights(src, dst).unwrap();
        assert_eq!(transferred, 2);
        let dst_mesh = scene.object(dst).unwrap().mesh_data().unwrap();
        assert_eq!(dst_mesh.vertex_groups.len(), 2);
        assert!(dst_mesh.vertices[0].weights.is_empty());
    }

    #[test]
    fn transfer_to_non_mesh_fails() {
        let mut scene = Scene::new();
        let src = scene.add_object(SceneObject::mesh("Body", weighted_mesh()));
        let dst = scene.add_object(
            SceneObject::empty("Anchor").with_modifiers(vec![Modifier::armature(None)]),
        );
        let err = scene.transfer_vertex_group_weights(src, dst).unwrap_err();
        assert!(matches!(err, OpError::NotAMesh { object } if object == "Anchor"));
    }
}
