//! Ember script bindings -- the script-side half of the engine's ECS
//! boundary.
//!
//! Scripts never own entity or component storage. They hold an opaque
//! [`EntityId`](entity::EntityId) and reach engine state through two kinds of
//! accessor:
//!
//! - **Mirrored** accessors ([`TransformComponent`](transform::TransformComponent),
//!   [`CameraComponent`](camera::CameraComponent)) round-trip a plain-old-data
//!   struct through the boundary on every access, so a read is never served
//!   from a cache the engine may have invalidated.
//! - **Proxy** accessors ([`RigidBodyComponent`](rigid_body::RigidBodyComponent))
//!   hold only a physics handle and forward every operation to a native
//!   function keyed by it.
//!
//! The native side is reached through the [`EngineBoundary`](boundary::EngineBoundary)
//! trait; production code adopts the engine's function-pointer table via
//! [`FfiBoundary`](ffi::FfiBoundary), while tests drive the same trait with an
//! in-memory double. All boundary calls are synchronous and fallible; no
//! operation retries, and a failed call leaves script-visible state untouched.

#![deny(unsafe_code)]

pub mod boundary;
pub mod camera;
pub mod entity;
#[allow(unsafe_code)]
pub mod ffi;
pub mod input;
pub mod mirrored;
pub mod registry;
pub mod rigid_body;
pub mod transform;

use entity::EntityId;
use registry::{ComponentKind, ComponentTypeId};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by binding operations.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The entity has no component of the requested kind. Indicates a script
    /// logic error; never retried.
    #[error("entity {entity} has no {kind:?} component")]
    ComponentNotFound {
        entity: EntityId,
        kind: ComponentKind,
    },

    /// A component type id outside the binding contract was used.
    #[error("component type id {type_id:?} is not part of the binding contract")]
    UnknownComponentType { type_id: ComponentTypeId },

    /// A component reference outlived its component. The entity or component
    /// was destroyed after the accessor was constructed.
    #[error("component reference (slot {slot}, generation {generation}) is stale")]
    StaleComponentRef { slot: u32, generation: u32 },

    /// A native boundary call reported failure.
    #[error("native call '{call}' failed with status {code}")]
    Native { call: &'static str, code: i32 },

    /// The engine offered a boundary table from a different contract version.
    #[error("boundary ABI version mismatch: bindings expect {expected}, engine provides {found}")]
    AbiVersionMismatch { expected: u32, found: u32 },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::boundary::{BodyHandle, ComponentRef, EngineBoundary};
    pub use crate::camera::{Camera, CameraComponent};
    pub use crate::entity::{Entity, EntityId, ScriptComponent, ScriptContext};
    pub use crate::input::Input;
    pub use crate::registry::{AccessKind, ComponentKind, ComponentTypeId};
    pub use crate::rigid_body::RigidBodyComponent;
    pub use crate::transform::TransformComponent;
    pub use crate::ScriptError;
    pub use glam::{Mat4, Quat, Vec2, Vec3};
}
