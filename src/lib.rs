//! # rigfit
//!
//! Vertex-group transfer and armature cleanup for skeletal meshes.
//!
//! The crate propagates per-bone weight assignments ("vertex groups") from an
//! active mesh to sibling meshes, re-parenting them to the shared armature,
//! and prunes the object graph afterwards: vertex groups that carry no weight,
//! and armature bones that no remaining vertex group references.
//!
//! Host panels, menus, and command registration live outside this crate. A
//! host drives the [`ops::Operator`] implementations with an explicit
//! [`scene::Scene`] and [`scene::SceneContext`], displays poll failures as
//! disabled-control tooltips, and presents execute outcomes to the user.

pub mod math;
pub mod ops;
pub mod scene;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
