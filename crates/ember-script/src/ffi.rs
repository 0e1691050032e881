//! Adapter from the engine's boundary-function table to [`EngineBoundary`].
//!
//! This is the only module in the workspace that touches `unsafe`: it calls
//! the `extern "C"` entries of an [`BoundaryTable`] and maps their status
//! codes onto [`ScriptError`]. The table is adopted once at script-domain
//! load; [`FfiBoundary::new`] rejects a table from a different ABI version.

use ember_abi::{
    BoundaryTable, RawComponentRef, RawVec2, RawVec3, ABI_VERSION, STATUS_NOT_FOUND, STATUS_OK,
    STATUS_STALE_REF,
};
use glam::{Quat, Vec2, Vec3};

use crate::boundary::{BodyHandle, ComponentRef, EngineBoundary};
use crate::entity::EntityId;
use crate::registry::ComponentTypeId;
use crate::ScriptError;

/// [`EngineBoundary`] over the engine's raw function-pointer table.
#[derive(Debug, Clone, Copy)]
pub struct FfiBoundary {
    table: BoundaryTable,
}

impl FfiBoundary {
    /// Adopt a boundary table.
    ///
    /// # Errors
    ///
    /// [`ScriptError::AbiVersionMismatch`] when the engine built the table
    /// against a different contract version.
    pub fn new(table: BoundaryTable) -> Result<Self, ScriptError> {
        if table.abi_version != ABI_VERSION {
            return Err(ScriptError::AbiVersionMismatch {
                expected: ABI_VERSION,
                found: table.abi_version,
            });
        }
        Ok(Self { table })
    }
}

/// Map a status code to a result. `r` supplies slot/generation context for
/// stale-reference failures when the call was keyed by a component ref.
fn check(call: &'static str, code: i32, r: Option<ComponentRef>) -> Result<(), ScriptError> {
    match (code, r) {
        (STATUS_OK, _) => Ok(()),
        (STATUS_STALE_REF, Some(r)) => Err(ScriptError::StaleComponentRef {
            slot: r.slot(),
            generation: r.generation(),
        }),
        (code, _) => {
            tracing::warn!(call, code, "native boundary call failed");
            Err(ScriptError::Native { call, code })
        }
    }
}

impl EngineBoundary for FfiBoundary {
    fn component_ref(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<Option<ComponentRef>, ScriptError> {
        let mut out = RawComponentRef::default();
        let code =
            unsafe { (self.table.component_ref)(entity.to_raw(), type_id.to_raw(), &mut out) };
        if code == STATUS_NOT_FOUND {
            return Ok(None);
        }
        check("component_ref", code, None)?;
        Ok(Some(ComponentRef::from_raw(out)))
    }

    fn attach_component(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<Option<ComponentRef>, ScriptError> {
        let mut out = RawComponentRef::default();
        let code =
            unsafe { (self.table.attach_component)(entity.to_raw(), type_id.to_raw(), &mut out) };
        if code == STATUS_NOT_FOUND {
            return Ok(None);
        }
        check("attach_component", code, None)?;
        Ok(Some(ComponentRef::from_raw(out)))
    }

    fn has_component(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<bool, ScriptError> {
        let mut out = 0u32;
        let code =
            unsafe { (self.table.has_component)(entity.to_raw(), type_id.to_raw(), &mut out) };
        check("has_component", code, None)?;
        Ok(out != 0)
    }

    fn detach_component(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<(), ScriptError> {
        let code = unsafe { (self.table.detach_component)(entity.to_raw(), type_id.to_raw()) };
        check("detach_component", code, None)
    }

    fn read_component(&self, r: ComponentRef, out: &mut [u8]) -> Result<(), ScriptError> {
        let code =
            unsafe { (self.table.read_component)(r.to_raw(), out.as_mut_ptr(), out.len()) };
        check("read_component", code, Some(r))
    }

    fn write_component(&self, r: ComponentRef, data: &[u8]) -> Result<(), ScriptError> {
        let code =
            unsafe { (self.table.write_component)(r.to_raw(), data.as_ptr(), data.len()) };
        check("write_component", code, Some(r))
    }

    fn recompute_camera_vectors(&self, r: ComponentRef) -> Result<(), ScriptError> {
        let code = unsafe { (self.table.camera_recompute_vectors)(r.to_raw()) };
        check("camera_recompute_vectors", code, Some(r))
    }

    fn recompute_camera_view(&self, r: ComponentRef) -> Result<(), ScriptError> {
        let code = unsafe { (self.table.camera_recompute_view)(r.to_raw()) };
        check("camera_recompute_view", code, Some(r))
    }

    fn recompute_camera_projection(&self, r: ComponentRef) -> Result<(), ScriptError> {
        let code = unsafe { (self.table.camera_recompute_projection)(r.to_raw()) };
        check("camera_recompute_projection", code, Some(r))
    }

    fn recompute_camera_view_projection(&self, r: ComponentRef) -> Result<(), ScriptError> {
        let code = unsafe { (self.table.camera_recompute_view_projection)(r.to_raw()) };
        check("camera_recompute_view_projection", code, Some(r))
    }

    fn body_mass(&self, body: BodyHandle) -> Result<f32, ScriptError> {
        let mut out = 0.0f32;
        let code = unsafe { (self.table.body_mass)(body.to_raw(), &mut out) };
        check("body_mass", code, None)?;
        Ok(out)
    }

    fn set_body_mass(&self, body: BodyHandle, mass: f32) -> Result<(), ScriptError> {
        let code = unsafe { (self.table.body_set_mass)(body.to_raw(), mass) };
        check("body_set_mass", code, None)
    }

    fn move_body_kinematic(
        &self,
        body: BodyHandle,
        target_position: Vec3,
        target_rotation: Quat,
        seconds: f32,
    ) -> Result<(), ScriptError> {
        let code = unsafe {
            (self.table.body_move_kinematic)(
                body.to_raw(),
                target_position.into(),
                target_rotation.into(),
                seconds,
            )
        };
        check("body_move_kinematic", code, None)
    }

    fn add_body_force(&self, body: BodyHandle, force: Vec3) -> Result<(), ScriptError> {
        let code = unsafe { (self.table.body_add_force)(body.to_raw(), force.into()) };
        check("body_add_force", code, None)
    }

    fn add_body_torque(&self, body: BodyHandle, torque: Vec3) -> Result<(), ScriptError> {
        let code = unsafe { (self.table.body_add_torque)(body.to_raw(), torque.into()) };
        check("body_add_torque", code, None)
    }

    fn add_body_impulse(&self, body: BodyHandle, impulse: Vec3) -> Result<(), ScriptError> {
        let code = unsafe { (self.table.body_add_impulse)(body.to_raw(), impulse.into()) };
        check("body_add_impulse", code, None)
    }

    fn add_body_angular_impulse(
        &self,
        body: BodyHandle,
        impulse: Vec3,
    ) -> Result<(), ScriptError> {
        let code =
            unsafe { (self.table.body_add_angular_impulse)(body.to_raw(), impulse.into()) };
        check("body_add_angular_impulse", code, None)
    }

    fn set_body_linear_velocity(
        &self,
        body: BodyHandle,
        velocity: Vec3,
    ) -> Result<(), ScriptError> {
        let code =
            unsafe { (self.table.body_set_linear_velocity)(body.to_raw(), velocity.into()) };
        check("body_set_linear_velocity", code, None)
    }

    fn set_body_angular_velocity(
        &self,
        body: BodyHandle,
        velocity: Vec3,
    ) -> Result<(), ScriptError> {
        let code =
            unsafe { (self.table.body_set_angular_velocity)(body.to_raw(), velocity.into()) };
        check("body_set_angular_velocity", code, None)
    }

    fn body_linear_velocity(&self, body: BodyHandle) -> Result<Vec3, ScriptError> {
        let mut out = RawVec3::default();
        let code = unsafe { (self.table.body_linear_velocity)(body.to_raw(), &mut out) };
        check("body_linear_velocity", code, None)?;
        Ok(out.into())
    }

    fn body_angular_velocity(&self, body: BodyHandle) -> Result<Vec3, ScriptError> {
        let mut out = RawVec3::default();
        let code = unsafe { (self.table.body_angular_velocity)(body.to_raw(), &mut out) };
        check("body_angular_velocity", code, None)?;
        Ok(out.into())
    }

    fn mouse_position(&self) -> Result<Vec2, ScriptError> {
        let mut out = RawVec2::default();
        let code = unsafe { (self.table.mouse_position)(&mut out) };
        check("mouse_position", code, None)?;
        Ok(out.into())
    }

    fn set_mouse_position(&self, pos: Vec2) -> Result<(), ScriptError> {
        let code = unsafe { (self.table.set_mouse_position)(pos.into()) };
        check("set_mouse_position", code, None)
    }

    fn mouse_button_pressed(&self, button: u32) -> Result<bool, ScriptError> {
        let mut out = 0u32;
        let code = unsafe { (self.table.mouse_button_pressed)(button, &mut out) };
        check("mouse_button_pressed", code, None)?;
        Ok(out != 0)
    }

    fn key_down(&self, key: u32) -> Result<bool, ScriptError> {
        let mut out = 0u32;
        let code = unsafe { (self.table.key_down)(key, &mut out) };
        check("key_down", code, None)?;
        Ok(out != 0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
