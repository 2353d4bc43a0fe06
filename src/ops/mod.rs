//! Operators over the scene graph.
//!
//! Each operator has two phases, mirroring the host's poll/execute command
//! dispatch:
//!
//! - [`Operator::poll`] — pure precondition check; a failure is the message
//!   the host shows as a disabled-control tooltip. Never mutates.
//! - [`Operator::execute`] — re-validates (host state can change between
//!   gate and execute), then mutates the scene. Returns an [`OpReport`] info
//!   message or an [`OpError`].
//!
//! All failures are terminal for the invocation; there are no retries and
//! nothing here is fatal to the host process.

pub mod bones;
pub mod transfer;
pub mod validate;
pub mod vertex_groups;

#[cfg(test)]
mod tests;

use crate::scene::{ObjectKind, Scene, SceneContext};
use thiserror::Error;
use validate::ValidationError;

/// Successful operator outcome: a short info message for the host to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpReport {
    pub message: String,
}

/// Execution failure. The invocation is cancelled; mutations already applied
/// to earlier targets in a batch are NOT rolled back.
#[derive(Debug, Error)]
pub enum OpError {
    /// A precondition re-check failed at execute time.
    #[error(transparent)]
    Precondition(#[from] ValidationError),
    /// A transfer target has two or more Armature modifiers. `transferred`
    /// is the number of targets already committed before the abort.
    #[error("'{object}' has multiple armature modifiers. Only one is allowed.")]
    MultipleArmatureModifiers { object: String, transferred: usize },
    /// Edit-mode entry requires the object to be visible.
    #[error("'{object}' is hidden and cannot be edited.")]
    HiddenObject { object: String },
    /// The armature's world matrix cannot be inverted for the parent-inverse
    /// correction.
    #[error("Armature world transform is not invertible.")]
    NonInvertibleTransform,
    /// A handle did not resolve to a live object.
    #[error("Object not found in scene.")]
    ObjectNotFound,
    /// A mesh operation was pointed at a non-mesh object.
    #[error("'{object}' is not a mesh object.")]
    NotAMesh { object: String },
}

/// A host-invocable command over the scene graph.
pub trait Operator {
    /// Short human-readable description for menus and tooltips.
    fn description(&self) -> &str;

    /// Gating precondition check. Pure; the error's `Display` text is the
    /// disabled-control tooltip.
    fn poll(&self, scene: &Scene, ctx: &SceneContext) -> Result<(), ValidationError>;

    /// Runs the operation. Must re-validate its preconditions first.
    fn execute(&self, scene: &mut Scene, ctx: &mut SceneContext) -> Result<OpReport, OpError>;
}

pub use bones::{delete_unused_bones, prune_unused_bones, BoneDeleteReport, DeleteUnusedBones};
pub use transfer::{
    ensure_single_armature_modifier, transfer_vertex_groups, TransferReport,
    TransferVertexGroupsFromActive,
};
pub use vertex_groups::{prune_unused_groups, used_vertex_groups, DeleteUnusedVertexGroups};

/// Shared poll chain fragment: active object is a mesh with vertex groups.
fn poll_active_mesh_with_groups(
    scene: &Scene,
    ctx: &SceneContext,
) -> Result<(), ValidationError> {
    validate::validate_active_object(scene, ctx, ObjectKind::Mesh, true)
}
