//! The seam between the bindings and the native engine.
//!
//! [`EngineBoundary`] is the one Rust-side contract over the boundary
//! functions. Production code adopts the engine's function-pointer table via
//! [`FfiBoundary`](crate::ffi::FfiBoundary); tests implement the trait with an
//! in-memory double. Every method is synchronous, non-reentrant, and
//! fallible.

use std::fmt;

use ember_abi::RawComponentRef;
use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::registry::ComponentTypeId;
use crate::ScriptError;

// ---------------------------------------------------------------------------
// ComponentRef
// ---------------------------------------------------------------------------

/// A validity-scoped reference to engine-owned component storage.
///
/// The engine bumps the slot's generation when the component is destroyed,
/// so using a retained reference after destruction fails with
/// [`ScriptError::StaleComponentRef`] instead of touching freed memory.
/// References are cheap values; accessors hold one and never outlive-check
/// it themselves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentRef {
    slot: u32,
    generation: u32,
}

impl ComponentRef {
    /// Construct from slot and generation.
    #[inline]
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// The slot index.
    #[inline]
    pub const fn slot(self) -> u32 {
        self.slot
    }

    /// The generation the slot had when this reference was issued.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Convert to the wire form.
    #[inline]
    pub const fn to_raw(self) -> RawComponentRef {
        RawComponentRef {
            slot: self.slot,
            generation: self.generation,
        }
    }

    /// Construct from the wire form.
    #[inline]
    pub const fn from_raw(raw: RawComponentRef) -> Self {
        Self {
            slot: raw.slot,
            generation: raw.generation,
        }
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentRef({}v{})", self.slot, self.generation)
    }
}

// ---------------------------------------------------------------------------
// BodyHandle
// ---------------------------------------------------------------------------

/// Opaque handle into the physics simulation. Keys every proxy call.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(u64);

impl BodyHandle {
    /// Reconstruct from the raw wire value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw wire value.
    #[inline]
    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyHandle({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// EngineBoundary
// ---------------------------------------------------------------------------

/// The native boundary as seen by the bindings.
///
/// Implementations must complete each call before returning; the engine's
/// own systems are not reentered during a call. The bindings take no locks
/// around these calls and never assume two calls observe the same state --
/// native systems may mutate components in between.
pub trait EngineBoundary: Send + Sync {
    // -- entity/component lifecycle --------------------------------------

    /// Look up the component reference for `(entity, type_id)`.
    /// `Ok(None)` when the entity has no such component.
    fn component_ref(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<Option<ComponentRef>, ScriptError>;

    /// Attach a component of `type_id` to `entity` (or find the existing
    /// one) and return its reference. `Ok(None)` when the engine could not
    /// produce the component.
    fn attach_component(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<Option<ComponentRef>, ScriptError>;

    /// Whether the entity currently has the component.
    fn has_component(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<bool, ScriptError>;

    /// Detach the component. References issued for it become stale.
    fn detach_component(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<(), ScriptError>;

    // -- mirrored struct transport ---------------------------------------

    /// Copy the component's current bytes into `out`. `out.len()` must equal
    /// the component's wire size.
    fn read_component(&self, r: ComponentRef, out: &mut [u8]) -> Result<(), ScriptError>;

    /// Overwrite the component's bytes from `data`.
    fn write_component(&self, r: ComponentRef, data: &[u8]) -> Result<(), ScriptError>;

    // -- camera derived-state recompute ----------------------------------

    /// Recompute the camera's direction vectors from yaw/pitch.
    fn recompute_camera_vectors(&self, r: ComponentRef) -> Result<(), ScriptError>;

    /// Recompute the camera's view matrix.
    fn recompute_camera_view(&self, r: ComponentRef) -> Result<(), ScriptError>;

    /// Recompute the camera's projection matrix from the clip planes.
    fn recompute_camera_projection(&self, r: ComponentRef) -> Result<(), ScriptError>;

    /// Recompute the combined view-projection matrix. The engine also does
    /// this as a consequence of the other recomputes; the bindings never
    /// trigger it on their own.
    fn recompute_camera_view_projection(&self, r: ComponentRef) -> Result<(), ScriptError>;

    // -- physics, keyed by body handle -----------------------------------

    fn body_mass(&self, body: BodyHandle) -> Result<f32, ScriptError>;
    fn set_body_mass(&self, body: BodyHandle, mass: f32) -> Result<(), ScriptError>;
    fn move_body_kinematic(
        &self,
        body: BodyHandle,
        target_position: Vec3,
        target_rotation: Quat,
        seconds: f32,
    ) -> Result<(), ScriptError>;
    fn add_body_force(&self, body: BodyHandle, force: Vec3) -> Result<(), ScriptError>;
    fn add_body_torque(&self, body: BodyHandle, torque: Vec3) -> Result<(), ScriptError>;
    fn add_body_impulse(&self, body: BodyHandle, impulse: Vec3) -> Result<(), ScriptError>;
    fn add_body_angular_impulse(&self, body: BodyHandle, impulse: Vec3)
        -> Result<(), ScriptError>;
    fn set_body_linear_velocity(
        &self,
        body: BodyHandle,
        velocity: Vec3,
    ) -> Result<(), ScriptError>;
    fn set_body_angular_velocity(
        &self,
        body: BodyHandle,
        velocity: Vec3,
    ) -> Result<(), ScriptError>;
    fn body_linear_velocity(&self, body: BodyHandle) -> Result<Vec3, ScriptError>;
    fn body_angular_velocity(&self, body: BodyHandle) -> Result<Vec3, ScriptError>;

    // -- input ------------------------------------------------------------

    fn mouse_position(&self) -> Result<Vec2, ScriptError>;
    fn set_mouse_position(&self, pos: Vec2) -> Result<(), ScriptError>;
    fn mouse_button_pressed(&self, button: u32) -> Result<bool, ScriptError>;
    fn key_down(&self, key: u32) -> Result<bool, ScriptError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
