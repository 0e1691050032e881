//! Ember boundary ABI -- the fixed contract between script bindings and the
//! native engine.
//!
//! The engine hands the script domain one [`BoundaryTable`] at load time.
//! Every entry is a synchronous native function keyed by an entity id, a
//! component type id, or a physics handle, and every entry reports success or
//! failure through a status code. There is exactly one version of this
//! contract; [`ABI_VERSION`] is bumped whenever an entry is added, removed,
//! or changes shape, and the bindings refuse a table with a mismatched
//! version.
//!
//! Component payloads cross the boundary as the `#[repr(C)]` [`Pod`] structs
//! in [`data`], moved whole through `read_component`/`write_component`.
//!
//! [`Pod`]: bytemuck::Pod

pub mod data;

pub use data::{
    CameraComponentData, CameraState, RawComponentRef, RawQuat, RawVec2, RawVec3, RigidBodyData,
    TransformData,
};

// ---------------------------------------------------------------------------
// Version and status codes
// ---------------------------------------------------------------------------

/// Version of this contract. Checked once when the table is adopted.
pub const ABI_VERSION: u32 = 1;

/// The call succeeded.
pub const STATUS_OK: i32 = 0;
/// The entity has no component of the requested type.
pub const STATUS_NOT_FOUND: i32 = -1;
/// The component reference's generation no longer matches its slot.
pub const STATUS_STALE_REF: i32 = -2;
/// The component type id is not part of the contract.
pub const STATUS_UNKNOWN_TYPE: i32 = -3;
/// The engine failed internally.
pub const STATUS_INTERNAL: i32 = -4;

// ---------------------------------------------------------------------------
// BoundaryTable
// ---------------------------------------------------------------------------

/// The boundary-function table, resolved once at script-domain load.
///
/// All functions return a status code; results travel through out-pointers
/// that are written only on [`STATUS_OK`] (except where documented).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct BoundaryTable {
    /// Must equal [`ABI_VERSION`].
    pub abi_version: u32,

    // -- entity/component lifecycle --------------------------------------

    /// Look up the component reference for `(entity, type_id)`. Writes the
    /// reference on success; returns [`STATUS_NOT_FOUND`] if absent.
    pub component_ref:
        unsafe extern "C" fn(entity: u64, type_id: u32, out_ref: *mut RawComponentRef) -> i32,
    /// Attach a component of `type_id` to `entity` (or find the existing
    /// one) and write its reference.
    pub attach_component:
        unsafe extern "C" fn(entity: u64, type_id: u32, out_ref: *mut RawComponentRef) -> i32,
    /// Write nonzero to `out_has` when the component exists.
    pub has_component:
        unsafe extern "C" fn(entity: u64, type_id: u32, out_has: *mut u32) -> i32,
    /// Detach the component. References issued for it become stale.
    pub detach_component: unsafe extern "C" fn(entity: u64, type_id: u32) -> i32,

    // -- mirrored struct transport ---------------------------------------

    /// Copy the component's bytes into `out[..len]`. `len` must equal the
    /// component's wire size.
    pub read_component:
        unsafe extern "C" fn(r: RawComponentRef, out: *mut u8, len: usize) -> i32,
    /// Overwrite the component's bytes from `data[..len]`.
    pub write_component:
        unsafe extern "C" fn(r: RawComponentRef, data: *const u8, len: usize) -> i32,

    // -- camera derived-state recompute ----------------------------------

    pub camera_recompute_vectors: unsafe extern "C" fn(r: RawComponentRef) -> i32,
    pub camera_recompute_view: unsafe extern "C" fn(r: RawComponentRef) -> i32,
    pub camera_recompute_projection: unsafe extern "C" fn(r: RawComponentRef) -> i32,
    pub camera_recompute_view_projection: unsafe extern "C" fn(r: RawComponentRef) -> i32,

    // -- physics, keyed by body handle -----------------------------------

    pub body_mass: unsafe extern "C" fn(body: u64, out_mass: *mut f32) -> i32,
    pub body_set_mass: unsafe extern "C" fn(body: u64, mass: f32) -> i32,
    pub body_move_kinematic: unsafe extern "C" fn(
        body: u64,
        target_position: RawVec3,
        target_rotation: RawQuat,
        seconds: f32,
    ) -> i32,
    pub body_add_force: unsafe extern "C" fn(body: u64, force: RawVec3) -> i32,
    pub body_add_torque: unsafe extern "C" fn(body: u64, torque: RawVec3) -> i32,
    pub body_add_impulse: unsafe extern "C" fn(body: u64, impulse: RawVec3) -> i32,
    pub body_add_angular_impulse: unsafe extern "C" fn(body: u64, impulse: RawVec3) -> i32,
    pub body_set_linear_velocity: unsafe extern "C" fn(body: u64, velocity: RawVec3) -> i32,
    pub body_set_angular_velocity: unsafe extern "C" fn(body: u64, velocity: RawVec3) -> i32,
    pub body_linear_velocity: unsafe extern "C" fn(body: u64, out: *mut RawVec3) -> i32,
    pub body_angular_velocity: unsafe extern "C" fn(body: u64, out: *mut RawVec3) -> i32,

    // -- input ------------------------------------------------------------

    pub mouse_position: unsafe extern "C" fn(out: *mut RawVec2) -> i32,
    pub set_mouse_position: unsafe extern "C" fn(pos: RawVec2) -> i32,
    pub mouse_button_pressed: unsafe extern "C" fn(button: u32, out_pressed: *mut u32) -> i32,
    pub key_down: unsafe extern "C" fn(key: u32, out_down: *mut u32) -> i32,
}

impl std::fmt::Debug for BoundaryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundaryTable")
            .field("abi_version", &self.abi_version)
            .finish_non_exhaustive()
    }
}
