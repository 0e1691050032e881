//! Wire-format data structures shared with the native engine.
//!
//! Every struct here is `#[repr(C)]` and [`Pod`]: the engine reads and writes
//! the exact same bytes through the boundary transport functions. Matrices
//! are flat `[f32; 16]` column-major arrays and vectors are [`RawVec3`], so
//! no struct carries target-dependent SIMD alignment padding.
//!
//! Script-facing code converts these to `glam` types at the edge; nothing
//! above the ABI works with raw arrays directly.

use bytemuck_derive::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw math types
// ---------------------------------------------------------------------------

/// A 2-component vector in wire layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct RawVec2 {
    pub x: f32,
    pub y: f32,
}

/// A 3-component vector in wire layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct RawVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// An `xyzw` quaternion in wire layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct RawQuat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl From<Vec2> for RawVec2 {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<RawVec2> for Vec2 {
    fn from(v: RawVec2) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<Vec3> for RawVec3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<RawVec3> for Vec3 {
    fn from(v: RawVec3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Quat> for RawQuat {
    fn from(q: Quat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

impl From<RawQuat> for Quat {
    fn from(q: RawQuat) -> Self {
        Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

// ---------------------------------------------------------------------------
// RawComponentRef
// ---------------------------------------------------------------------------

/// Wire form of a component reference: an index into the engine's component
/// slot table plus the generation the slot had when the reference was issued.
///
/// The engine bumps the generation when the slot is destroyed, so a stale
/// reference is detected by comparison rather than dereferencing freed memory.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct RawComponentRef {
    pub slot: u32,
    pub generation: u32,
}

// ---------------------------------------------------------------------------
// Component wire structs
// ---------------------------------------------------------------------------

/// Transform component as stored by the engine.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct TransformData {
    pub translation: RawVec3,
    /// Euler angles in degrees.
    pub rotation: RawVec3,
    pub scale: RawVec3,
}

impl Default for TransformData {
    fn default() -> Self {
        Self {
            translation: RawVec3::default(),
            rotation: RawVec3::default(),
            scale: RawVec3 {
                x: 1.0,
                y: 1.0,
                z: 1.0,
            },
        }
    }
}

/// Rigid-body motion kinds, stored as a raw `u32` so the struct stays `Pod`.
pub const BODY_MOTION_DYNAMIC: u32 = 0;
pub const BODY_MOTION_STATIC: u32 = 1;
pub const BODY_MOTION_KINEMATIC: u32 = 2;

/// Rigid-body component as stored by the engine.
///
/// The physics simulation owns the authoritative body state; this struct
/// carries the physics handle plus bookkeeping fields. Script-side writes go
/// through the handle-keyed boundary functions, never through this struct
/// alone.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct RigidBodyData {
    /// Handle into the physics simulation. Keys every proxy call.
    pub body: u64,
    /// Last-known mass. Non-authoritative; the simulation is queried for the
    /// real value.
    pub mass: f32,
    /// One of the `BODY_MOTION_*` constants.
    pub motion: u32,
}

impl Default for RigidBodyData {
    fn default() -> Self {
        Self {
            body: 0,
            mass: 1.0,
            motion: BODY_MOTION_DYNAMIC,
        }
    }
}

/// Camera component as stored by the engine: an active flag plus a reference
/// to the camera state slot.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct CameraComponentData {
    pub camera: RawComponentRef,
    /// Nonzero when this camera is the active one.
    pub active: u32,
}

/// Full camera state as stored by the engine.
///
/// The matrices and direction vectors are derived state: the engine recomputes
/// them when told to via the `camera_recompute_*` boundary functions. Script
/// code writes the driving fields (yaw/pitch, fov, clip planes) and triggers
/// the matching recompute.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct CameraState {
    pub view: [f32; 16],
    pub projection: [f32; 16],
    pub view_projection: [f32; 16],
    pub position: RawVec3,
    pub world_up: RawVec3,
    pub view_dir: RawVec3,
    pub right_dir: RawVec3,
    pub up_dir: RawVec3,
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub aspect_ratio: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array(),
            projection: Mat4::IDENTITY.to_cols_array(),
            view_projection: Mat4::IDENTITY.to_cols_array(),
            position: RawVec3::default(),
            world_up: RawVec3 {
                x: 0.0,
                y: 1.0,
                z: 0.0,
            },
            view_dir: RawVec3 {
                x: 0.0,
                y: 0.0,
                z: -1.0,
            },
            right_dir: RawVec3 {
                x: 1.0,
                y: 0.0,
                z: 0.0,
            },
            up_dir: RawVec3 {
                x: 0.0,
                y: 1.0,
                z: 0.0,
            },
            fov_degrees: 60.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            aspect_ratio: 16.0 / 9.0,
            yaw: -90.0,
            pitch: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
