//! Host-agnostic object-graph data model.
//!
//! These types are host-agnostic: any content-creation host can populate them
//! from its own scene graph, and tests build them programmatically.
//!
//! - [`Scene`] — arena of scene objects plus the host-level primitives
//!   (duplication, weight transfer) the operators call
//! - [`SceneObject`] / [`ObjectData`] — a named object with parent link,
//!   world transform, modifiers, and mesh or armature payload
//! - [`MeshData`] / [`VertexGroup`] / [`Vertex`] / [`VertexWeight`] — mesh
//!   side of the skinning relationship
//! - [`ArmatureData`] / [`Bone`] — armature side, joined to vertex groups by
//!   exact bone name
//! - [`SceneContext`] / [`InteractionMode`] / [`ModeGuard`] — explicit host
//!   state (active object, selection, interaction mode) threaded through
//!   every operation

mod context;
mod graph;
mod types;

pub use context::{InteractionMode, ModeGuard, SceneContext};
pub use graph::{ObjectId, Scene};
pub use types::{
    ArmatureData, Bone, MeshData, Modifier, ModifierKind, ObjectData, ObjectKind, SceneObject,
    Vertex, VertexGroup, VertexWeight,
};
