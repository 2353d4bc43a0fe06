//! Bone pruning and the guarded bone-delete workflow.

use crate::ops::validate::{self, ValidationError};
use crate::ops::{OpError, OpReport, Operator};
use crate::scene::{InteractionMode, ModeGuard, ModifierKind, ObjectId, Scene, SceneContext};
use std::collections::HashSet;

/// Deletes every bone of `armature` whose name is not in `used_names`.
///
/// Runs inside a scoped edit-mode transition: the prior interaction mode is
/// restored on every exit path. Bone names to delete are collected before
/// any deletion, and each delete looks the bone up by name again, silently
/// skipping bones that are already gone. Returns the count actually deleted.
///
/// Children of a deleted bone are NOT reparented; that is the host's
/// armature-hierarchy concern.
pub fn prune_unused_bones(
    scene: &mut Scene,
    ctx: &mut SceneContext,
    armature: ObjectId,
    used_names: &HashSet<String>,
) -> Result<usize, OpError> {
    let obj = scene.object(armature).ok_or(OpError::ObjectNotFound)?;
    if obj.hidden {
        return Err(OpError::HiddenObject {
            object: obj.name.clone(),
        });
    }

    let _guard = ModeGuard::enter(ctx, InteractionMode::EditArmature);

    let data = scene
        .object_mut(armature)
        .and_then(|obj| obj.armature_data_mut())
        .ok_or(OpError::ObjectNotFound)?;
    let to_delete: Vec<String> = data
        .bones
        .iter()
        .filter(|bone| !used_names.contains(&bone.name))
        .map(|bone| bone.name.clone())
        .collect();

    let mut deleted = 0usize;
    for name in &to_delete {
        if data.remove_bone(name) {
            deleted += 1;
        } else {
            log::debug!("bone '{name}' already gone, skipping");
        }
    }
    log::debug!("deleted {deleted} unused bones");
    Ok(deleted)
}

/// Outcome of the bone-delete workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoneDeleteReport {
    /// The armature that was pruned (the duplicate, when one was made).
    pub armature: ObjectId,
    /// Number of bones deleted.
    pub deleted: usize,
}

/// The guarded destructive workflow behind "Delete Unused Bones".
///
/// Re-validates at execute time, forces the armature visible, optionally
/// duplicates it first (detaching the duplicate and re-binding the mesh to
/// it, leaving the original untouched), then prunes every bone whose name
/// matches no CURRENT vertex-group name on the mesh. All named groups count
/// as used here, even at zero weight; group deletion is an independent
/// operation.
pub fn delete_unused_bones(
    scene: &mut Scene,
    ctx: &mut SceneContext,
    duplicate_armature: bool,
) -> Result<BoneDeleteReport, OpError> {
    let mesh_id = ctx.active.ok_or(ValidationError::NoActiveObject)?;
    let mesh_obj = scene.object(mesh_id).ok_or(OpError::ObjectNotFound)?;
    validate::validate_armature_parent_and_modifier(scene, mesh_obj)?;
    let mut armature = mesh_obj.parent.ok_or(ValidationError::NotParentedToArmature)?;

    // Edit-mode entry requires visibility.
    if let Some(obj) = scene.object_mut(armature) {
        obj.hidden = false;
    }

    if duplicate_armature {
        let duplicate = scene
            .duplicate_object(armature)
            .ok_or(OpError::ObjectNotFound)?;
        if let Some(obj) = scene.object_mut(duplicate) {
            obj.parent = None;
        }
        let mesh_obj = scene.object_mut(mesh_id).ok_or(OpError::ObjectNotFound)?;
        mesh_obj.parent = Some(duplicate);
        for modifier in &mut mesh_obj.modifiers {
            if let ModifierKind::Armature { object } = &mut modifier.kind {
                *object = Some(duplicate);
            }
        }
        armature = duplicate;
    }

    let used_names: HashSet<String> = scene
        .object(mesh_id)
        .and_then(|obj| obj.mesh_data())
        .ok_or(OpError::ObjectNotFound)?
        .vertex_groups
        .iter()
        .map(|g| g.name.clone())
        .collect();

    ctx.select_only(&[armature], Some(armature));
    let deleted = prune_unused_bones(scene, ctx, armature, &used_names)?;
    Ok(BoneDeleteReport { armature, deleted })
}

/// Deletes all bones with no corresponding vertex group on the active mesh.
#[derive(Debug, Clone, Copy)]
pub struct DeleteUnusedBones {
    /// Duplicate the armature before deleting bones.
    pub duplicate_armature: bool,
}

impl Default for DeleteUnusedBones {
    fn default() -> Self {
        Self {
            duplicate_armature: true,
        }
    }
}

impl Operator for DeleteUnusedBones {
    fn description(&self) -> &str {
        "Delete all bones that do not have a corresponding vertex group"
    }

    fn poll(&self, scene: &Scene, ctx: &SceneContext) -> Result<(), ValidationError> {
        crate::ops::poll_active_mesh_with_groups(scene, ctx)?;
        let obj = ctx
            .active
            .and_then(|id| scene.object(id))
            .ok_or(ValidationError::NoActiveObject)?;
        validate::validate_armature_parent_and_modifier(scene, obj)?;
        validate::validate_interaction_mode(ctx)
    }

    fn execute(&self, scene: &mut Scene, ctx: &mut SceneContext) -> Result<OpReport, OpError> {
        self.poll(scene, ctx)?;
        let report = delete_unused_bones(scene, ctx, self.duplicate_armature)?;
        Ok(OpReport {
            message: format!("Deleted {} unused bones.", report.deleted),
        })
    }
}
