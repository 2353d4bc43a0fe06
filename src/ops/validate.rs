//! Precondition validators.
//!
//! Independent predicate checks over the object graph, run before any
//! mutation is allowed. Each returns the FIRST failing check; failures are
//! not accumulated. All checks are pure reads.
//!
//! Every mutating operator re-runs its poll chain at execute time, because
//! host state can change between gate and execute.

use crate::scene::{InteractionMode, ObjectId, ObjectKind, Scene, SceneContext, SceneObject};
use thiserror::Error;

/// A failed precondition. The `Display` text is the user-facing reason shown
/// as a disabled-control tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No active object!")]
    NoActiveObject,
    #[error("Active object must be a {kind}!")]
    WrongActiveKind { kind: ObjectKind },
    #[error("Active object must have vertex groups!")]
    NoVertexGroups,
    #[error("You must select at least {min_objects} objects.")]
    NotEnoughSelected { min_objects: usize },
    #[error("Active object must be among the selected objects.")]
    ActiveNotSelected,
    #[error("Object must have exactly one armature modifier.")]
    NotExactlyOneArmatureModifier,
    #[error("Armature modifier has no object assigned.")]
    ArmatureModifierUnassigned,
    #[error("Armature modifier does not point to the required armature.")]
    ArmatureModifierMismatch,
    #[error("Object must be parented to an armature.")]
    NotParentedToArmature,
    #[error("This operation only works in object mode! Current mode is: '{mode}'")]
    WrongInteractionMode { mode: InteractionMode },
}

/// Checks that there is an active object of the required kind, optionally
/// with at least one vertex group.
pub fn validate_active_object(
    scene: &Scene,
    ctx: &SceneContext,
    kind: ObjectKind,
    require_vertex_groups: bool,
) -> Result<(), ValidationError> {
    let obj = ctx
        .active
        .and_then(|id| scene.object(id))
        .ok_or(ValidationError::NoActiveObject)?;
    if obj.kind() != kind {
        return Err(ValidationError::WrongActiveKind { kind });
    }
    if require_vertex_groups
        && obj
            .mesh_data()
            .is_none_or(|mesh| mesh.vertex_groups.is_empty())
    {
        return Err(ValidationError::NoVertexGroups);
    }
    Ok(())
}

/// Checks the selection size and, optionally, that the active object is
/// among the selected objects.
pub fn validate_selection(
    ctx: &SceneContext,
    min_objects: usize,
    require_active_in_selection: bool,
) -> Result<(), ValidationError> {
    if ctx.selected.len() < min_objects {
        return Err(ValidationError::NotEnoughSelected { min_objects });
    }
    if require_active_in_selection {
        match ctx.active {
            Some(active) if ctx.is_selected(active) => {}
            _ => return Err(ValidationError::ActiveNotSelected),
        }
    }
    Ok(())
}

/// Checks that `obj` carries exactly one Armature-kind modifier with an
/// assigned armature, optionally required to be a specific one.
pub fn validate_armature_modifier(
    obj: &SceneObject,
    required_armature: Option<ObjectId>,
) -> Result<(), ValidationError> {
    let mut armature_modifiers = obj.armature_modifiers();
    let modifier = armature_modifiers
        .next()
        .ok_or(ValidationError::NotExactlyOneArmatureModifier)?;
    if armature_modifiers.next().is_some() {
        return Err(ValidationError::NotExactlyOneArmatureModifier);
    }
    let bound = modifier
        .armature_object()
        .ok_or(ValidationError::ArmatureModifierUnassigned)?;
    if let Some(required) = required_armature {
        if bound != required {
            return Err(ValidationError::ArmatureModifierMismatch);
        }
    }
    Ok(())
}

/// Checks that `obj` is parented to an armature object and that its single
/// Armature modifier points at that same armature.
pub fn validate_armature_parent_and_modifier(
    scene: &Scene,
    obj: &SceneObject,
) -> Result<(), ValidationError> {
    let parent = obj
        .parent
        .filter(|&id| {
            scene
                .object(id)
                .is_some_and(|p| p.kind() == ObjectKind::Armature)
        })
        .ok_or(ValidationError::NotParentedToArmature)?;
    validate_armature_modifier(obj, Some(parent))
}

/// Checks that the host is in baseline object mode.
pub fn validate_interaction_mode(ctx: &SceneContext) -> Result<(), ValidationError> {
    if ctx.mode != InteractionMode::Object {
        return Err(ValidationError::WrongInteractionMode { mode: ctx.mode });
    }
    Ok(())
}
