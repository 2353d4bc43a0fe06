//! Transfer orchestration: re-parent targets to the active mesh's armature
//! and copy vertex-group weights onto them.

use crate::ops::validate::{self, ValidationError};
use crate::ops::{OpError, OpReport, Operator};
use crate::scene::{ModifierKind, ObjectId, ObjectKind, Scene, SceneContext, SceneObject};

/// Outcome of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReport {
    /// Name of the source (active) mesh.
    pub source: String,
    /// Number of targets processed.
    pub transferred: usize,
}

/// Makes `obj` carry exactly one Armature modifier bound to `armature`.
///
/// Zero existing Armature modifiers: a new one is created. Exactly one: its
/// object reference is overwritten. Returns `false` when two or more exist;
/// that case is never auto-resolved.
pub fn ensure_single_armature_modifier(obj: &mut SceneObject, armature: ObjectId) -> bool {
    match obj.armature_modifiers().count() {
        0 => {
            obj.modifiers
                .push(crate::scene::Modifier::armature(Some(armature)));
            log::debug!("created a new armature modifier for '{}'", obj.name);
            true
        }
        1 => {
            for modifier in &mut obj.modifiers {
                if let ModifierKind::Armature { object } = &mut modifier.kind {
                    *object = Some(armature);
                }
            }
            log::debug!("updated existing armature modifier for '{}'", obj.name);
            true
        }
        _ => false,
    }
}

/// Re-parents every selected target to the active mesh's armature and copies
/// the active mesh's vertex-group weights onto it.
///
/// Targets are the selected objects minus the active one, in selection
/// order, processed one at a time. Each target is fully committed before the
/// next is touched; a target with multiple Armature modifiers aborts the
/// whole operation, and already-processed targets keep their changes.
///
/// The selection is cleared on every outcome, success or abort.
pub fn transfer_vertex_groups(
    scene: &mut Scene,
    ctx: &mut SceneContext,
) -> Result<TransferReport, OpError> {
    validate::validate_selection(ctx, 2, true)?;
    validate::validate_active_object(scene, ctx, ObjectKind::Mesh, true)?;
    let active = ctx.active.ok_or(ValidationError::NoActiveObject)?;
    let active_obj = scene.object(active).ok_or(OpError::ObjectNotFound)?;
    validate::validate_armature_parent_and_modifier(scene, active_obj)?;
    validate::validate_interaction_mode(ctx)?;

    let source = active_obj.name.clone();
    let armature = active_obj
        .parent
        .ok_or(ValidationError::NotParentedToArmature)?;
    let armature_world = scene
        .object(armature)
        .ok_or(OpError::ObjectNotFound)?
        .matrix_world;
    let parent_inverse = armature_world
        .try_inverse()
        .ok_or(OpError::NonInvertibleTransform)?;

    let targets: Vec<ObjectId> = ctx
        .selected
        .iter()
        .copied()
        .filter(|&id| id != active)
        .collect();

    let mut transferred = 0usize;
    for target in targets {
        let target_obj = scene.object_mut(target).ok_or(OpError::ObjectNotFound)?;
        if !ensure_single_armature_modifier(target_obj, armature) {
            let object = target_obj.name.clone();
            ctx.deselect_all();
            return Err(OpError::MultipleArmatureModifiers {
                object,
                transferred,
            });
        }

        // Re-parent with the parent-inverse correction so the rendered pose
        // is preserved despite the parent change.
        target_obj.parent = Some(armature);
        target_obj.matrix_parent_inverse = parent_inverse;

        ctx.select_only(&[active, target], Some(active));
        if let Err(err) = scene.transfer_vertex_group_weights(active, target) {
            ctx.deselect_all();
            return Err(err);
        }
        transferred += 1;
    }

    log::info!("transferred vertex groups from '{source}' to {transferred} objects");
    ctx.deselect_all();
    Ok(TransferReport {
        source,
        transferred,
    })
}

/// Transfers vertex groups and armature binding from the active mesh to
/// every other selected object.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferVertexGroupsFromActive;

impl Operator for TransferVertexGroupsFromActive {
    fn description(&self) -> &str {
        "Transfer vertex groups and armatures from active object to selected object(s)"
    }

    fn poll(&self, scene: &Scene, ctx: &SceneContext) -> Result<(), ValidationError> {
        validate::validate_selection(ctx, 2, true)?;
        crate::ops::poll_active_mesh_with_groups(scene, ctx)?;
        let obj = ctx
            .active
            .and_then(|id| scene.object(id))
            .ok_or(ValidationError::NoActiveObject)?;
        validate::validate_armature_parent_and_modifier(scene, obj)?;
        validate::validate_interaction_mode(ctx)
    }

    fn execute(&self, scene: &mut Scene, ctx: &mut SceneContext) -> Result<OpReport, OpError> {
        let report = transfer_vertex_groups(scene, ctx)?;
        Ok(OpReport {
            message: format!(
                "Vertex groups transferred from '{}' to {} objects",
                report.source, report.transferred
            ),
        })
    }
}
