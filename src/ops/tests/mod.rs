use crate::scene::{
    ArmatureData, Bone, MeshData, Modifier, ObjectId, Scene, SceneContext, SceneObject, Vertex,
};

mod prop_test;

/// A mesh parented and bound to a three-bone armature.
///
/// Groups: "Hip" weighted on v0, "Spine" present but zero weight everywhere.
/// Bones: Hip, Spine, Head. Selection and active are left empty.
fn rigged_scene() -> (Scene, SceneContext, ObjectId, ObjectId) {
    let mut scene = Scene::new();
    let armature = scene.add_object(SceneObject::armature(
        "Rig",
        ArmatureData::new().with_bones(vec![
            Bone::new("Hip"),
            Bone::new("Spine").with_parent("Hip"),
            Bone::new("Head").with_parent("Spine"),
        ]),
    ));

    let mut mesh = MeshData::new().with_vertices(vec![
        Vertex::at([0.0, 0.0, 0.0]),
        Vertex::at([0.0, 1.0, 0.0]),
    ]);
    mesh.add_vertex_group("Hip");
    mesh.add_vertex_group("Spine");
    mesh.set_weight(0, 0, 1.0);
    mesh.set_weight(1, 1, 0.0);

    let body = scene.add_object(
        SceneObject::mesh("Body", mesh)
            .with_parent(armature)
            .with_modifiers(vec![Modifier::armature(Some(armature))]),
    );

    (scene, SceneContext::new(), body, armature)
}

/// An unrigged mesh suitable as a transfer target.
fn plain_target(scene: &mut Scene, name: &str) -> ObjectId {
    scene.add_object(SceneObject::mesh(
        name,
        MeshData::new().with_vertices(vec![Vertex::at([0.0, 0.1, 0.0])]),
    ))
}
