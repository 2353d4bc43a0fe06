//! Vertex-group usage analysis and pruning.

use crate::ops::validate::{self, ValidationError};
use crate::ops::{OpError, OpReport, Operator};
use crate::scene::{MeshData, Scene, SceneContext};
use std::collections::HashSet;

/// Collects the set of vertex-group indices with at least one strictly
/// positive weight on at least one vertex.
///
/// Deterministic and order-independent. No side effects.
pub fn used_vertex_groups(mesh: &MeshData) -> HashSet<usize> {
    let mut used = HashSet::new();
    for vertex in &mesh.vertices {
        for pair in &vertex.weights {
            if pair.weight > 0.0 {
                used.insert(pair.group);
            }
        }
    }
    used
}

/// Removes every vertex group that carries no weight.
///
/// Groups are visited in strictly descending index order, since each removal
/// shifts every later group's index down by one. Each deletion re-resolves
/// the group by name into a fresh lookup immediately before removing, so no
/// cached index is used after a mutation.
///
/// Returns the removed group names in deletion order (descending original
/// index); empty when nothing was removed.
pub fn prune_unused_groups(mesh: &mut MeshData) -> Vec<String> {
    let used = used_vertex_groups(mesh);
    let mut unused: Vec<String> = mesh
        .vertex_groups
        .iter()
        .enumerate()
        .filter(|(index, _)| !used.contains(index))
        .map(|(_, group)| group.name.clone())
        .collect();
    unused.reverse();

    let mut removed = Vec::with_capacity(unused.len());
    for name in unused {
        if let Some(index) = mesh.vertex_group_index(&name) {
            mesh.remove_vertex_group(index);
            removed.push(name);
        }
    }
    if !removed.is_empty() {
        log::debug!("pruned {} zero-weight vertex groups", removed.len());
    }
    removed
}

/// Removes all zero-weight vertex groups from the active mesh.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteUnusedVertexGroups;

impl Operator for DeleteUnusedVertexGroups {
    fn description(&self) -> &str {
        "Remove all vertex groups from the active object that have no weight assignments"
    }

    fn poll(&self, scene: &Scene, ctx: &SceneContext) -> Result<(), ValidationError> {
        crate::ops::poll_active_mesh_with_groups(scene, ctx)?;
        let obj = ctx
            .active
            .and_then(|id| scene.object(id))
            .ok_or(ValidationError::NoActiveObject)?;
        validate::validate_armature_modifier(obj, None)?;
        validate::validate_interaction_mode(ctx)
    }

    fn execute(&self, scene: &mut Scene, ctx: &mut SceneContext) -> Result<OpReport, OpError> {
        self.poll(scene, ctx)?;
        let active = ctx.active.ok_or(ValidationError::NoActiveObject)?;
        let mesh = scene
            .object_mut(active)
            .and_then(|obj| obj.mesh_data_mut())
            .ok_or(OpError::ObjectNotFound)?;
        let removed = prune_unused_groups(mesh);
        let message = if removed.is_empty() {
            "No zero-weight vertex groups found.".to_string()
        } else {
            format!("Removed {} zero-weight vertex groups!", removed.len())
        };
        Ok(OpReport { message })
    }
}
