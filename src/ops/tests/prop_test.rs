use crate::ops::{prune_unused_bones, prune_unused_groups, used_vertex_groups};
use crate::scene::{ArmatureData, Bone, MeshData, Scene, SceneContext, SceneObject, Vertex};
use proptest::prelude::*;
use std::collections::HashSet;

/// Meshes with 1..8 groups and arbitrary weight pairs, including zero
/// weights and groups no vertex references.
fn arb_mesh() -> impl Strategy<Value = MeshData> {
    (1usize..8).prop_flat_map(|group_count| {
        proptest::collection::vec(
            proptest::collection::vec((0..group_count, 0.0f32..=1.0), 0..4),
            0..16,
        )
        .prop_map(move |assignments| {
            let mut mesh = MeshData::new();
            for g in 0..group_count {
                mesh.add_vertex_group(format!("G{g}"));
            }
            mesh.vertices = assignments
                .iter()
                .map(|_| Vertex::at([0.0, 0.0, 0.0]))
                .collect();
            for (vi, pairs) in assignments.iter().enumerate() {
                for &(group, weight) in pairs {
                    mesh.set_weight(vi, group, weight);
                }
            }
            mesh
        })
    })
}

fn arb_names() -> impl Strategy<Value = HashSet<String>> {
    proptest::collection::hash_set("[A-E][0-9]", 0..12)
}

proptest! {
    /// After pruning, every remaining group is used: the usage set equals
    /// the full new index range, and a second prune removes nothing.
    #[test]
    fn prune_leaves_only_used_groups(mut mesh in arb_mesh()) {
        prune_unused_groups(&mut mesh);
        let used = used_vertex_groups(&mesh);
        let full_range: HashSet<usize> = (0..mesh.vertex_groups.len()).collect();
        prop_assert_eq!(used, full_range);
        prop_assert!(prune_unused_groups(&mut mesh).is_empty());
    }

    /// Pruning never invalidates a weight pair's group index.
    #[test]
    fn prune_keeps_weight_pairs_in_range(mut mesh in arb_mesh()) {
        prune_unused_groups(&mut mesh);
        let group_count = mesh.vertex_groups.len();
        for vertex in &mesh.vertices {
            for pair in &vertex.weights {
                prop_assert!(pair.group < group_count);
            }
        }
    }

    /// Bone pruning removes exactly the bones whose name is not in the used
    /// set, preserves the rest in order, and a repeat run deletes nothing.
    #[test]
    fn bone_prune_is_exact_and_idempotent(
        bone_names in arb_names(),
        used in arb_names(),
    ) {
        let mut scene = Scene::new();
        let bones: Vec<Bone> = bone_names.iter().cloned().map(Bone::new).collect();
        let armature = scene.add_object(SceneObject::armature(
            "Rig",
            ArmatureData::new().with_bones(bones.clone()),
        ));
        let mut ctx = SceneContext::new();

        let deleted = prune_unused_bones(&mut scene, &mut ctx, armature, &used).unwrap();
        let expected_deleted = bones.iter().filter(|b| !used.contains(&b.name)).count();
        prop_assert_eq!(deleted, expected_deleted);

        let expected_remaining: Vec<String> = bones
            .iter()
            .filter(|b| used.contains(&b.name))
            .map(|b| b.name.clone())
            .collect();
        let remaining = scene
            .object(armature)
            .unwrap()
            .armature_data()
            .unwrap()
            .bone_names();
        prop_assert_eq!(remaining, expected_remaining);

        let deleted_again = prune_unused_bones(&mut scene, &mut ctx, armature, &used).unwrap();
        prop_assert_eq!(deleted_again, 0);
    }
}
