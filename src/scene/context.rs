//! Explicit host interaction state.
//!
//! Rather than reading the active object, selection, and interaction mode
//! from ambient host globals, they are a value threaded through every entry
//! point, so operations are deterministic and testable without a live host.

use crate::scene::ObjectId;
use std::fmt;

/// Host interaction mode. Structural bone edits require
/// [`EditArmature`](Self::EditArmature); everything else in this crate runs
/// in [`Object`](Self::Object) mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Object,
    EditMesh,
    EditArmature,
    Pose,
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object => write!(f, "OBJECT"),
            Self::EditMesh => write!(f, "EDIT_MESH"),
            Self::EditArmature => write!(f, "EDIT_ARMATURE"),
            Self::Pose => write!(f, "POSE"),
        }
    }
}

/// Active object, selection set, and current interaction mode.
#[derive(Debug, Clone, Default)]
pub struct SceneContext {
    /// The operative object, if any. May or may not be in `selected`.
    pub active: Option<ObjectId>,
    /// Selected objects, in selection order.
    pub selected: Vec<ObjectId>,
    /// Current interaction mode.
    pub mode: InteractionMode,
}

impl SceneContext {
    /// Creates a context with no active object, empty selection, object mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is among the selected objects.
    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected.contains(&id)
    }

    /// Replaces the selection with exactly `ids` and sets the active object.
    pub fn select_only(&mut self, ids: &[ObjectId], active: Option<ObjectId>) {
        self.selected.clear();
        self.selected.extend_from_slice(ids);
        self.active = active;
    }

    /// Deselects everything. The active object is left as-is, matching host
    /// behavior where deselection does not clear the operative object.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }
}

/// Scoped interaction-mode transition.
///
/// Enters the requested mode on construction and restores the prior mode on
/// drop, on every exit path: normal return, `?` propagation, or panic
/// unwind. Leaving the host in edit mode after a failure would corrupt UI
/// state for unrelated subsequent actions.
#[derive(Debug)]
pub struct ModeGuard<'a> {
    ctx: &'a mut SceneContext,
    prior: InteractionMode,
}

impl<'a> ModeGuard<'a> {
    /// Switches `ctx` to `mode`, remembering the prior mode.
    pub fn enter(ctx: &'a mut SceneContext, mode: InteractionMode) -> Self {
        let prior = ctx.mode;
        ctx.mode = mode;
        log::debug!("entering {mode} mode (was {prior})");
        Self { ctx, prior }
    }

    /// The guarded context, for operations that run inside the mode.
    pub fn ctx(&mut self) -> &mut SceneContext {
        self.ctx
    }
}

impl Drop for ModeGuard<'_> {
    fn drop(&mut self) {
        log::debug!("restoring {} mode", self.prior);
        self.ctx.mode = self.prior;
    }
}
