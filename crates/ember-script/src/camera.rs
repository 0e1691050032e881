//! Camera component accessor and the camera state machine.
//!
//! The camera holds four pieces of derived state -- direction vectors, view
//! matrix, projection matrix, and the combined view-projection -- with three
//! independent script-side triggers:
//!
//! - yaw/pitch change -> recompute vectors
//! - field-of-view change -> recompute view matrix
//! - near/far plane change -> recompute projection matrix
//!
//! Each setter fires exactly one recompute; the combined view-projection is
//! refreshed by the engine as a consequence, never triggered here. All field
//! access follows mirrored semantics.

use std::sync::Arc;

use ember_abi::{CameraComponentData, CameraState};
use glam::{Mat4, Vec3};

use crate::boundary::{ComponentRef, EngineBoundary};
use crate::entity::{EntityId, ScriptComponent};
use crate::mirrored::Mirrored;
use crate::registry::ComponentKind;
use crate::ScriptError;

// ---------------------------------------------------------------------------
// CameraComponent
// ---------------------------------------------------------------------------

/// Mirrored accessor over an entity's camera component: the active flag plus
/// the reference to the camera state itself.
#[derive(Debug)]
pub struct CameraComponent {
    data: Mirrored<CameraComponentData>,
}

impl ScriptComponent for CameraComponent {
    const KIND: ComponentKind = ComponentKind::Camera;

    fn bind(
        boundary: Arc<dyn EngineBoundary>,
        _entity: EntityId,
        r: ComponentRef,
    ) -> Result<Self, ScriptError> {
        Ok(Self {
            data: Mirrored::bind(boundary, r)?,
        })
    }
}

impl CameraComponent {
    /// A detached camera component with default-valued state.
    pub fn detached() -> Self {
        Self {
            data: Mirrored::detached(CameraComponentData::default()),
        }
    }

    pub fn is_active(&self) -> Result<bool, ScriptError> {
        Ok(self.data.load()?.active != 0)
    }

    pub fn set_active(&mut self, active: bool) -> Result<(), ScriptError> {
        self.data.update(|d| d.active = active as u32)
    }

    /// Bind the [`Camera`] this component points at. Detached components
    /// yield a detached camera.
    pub fn camera(&self) -> Result<Camera, ScriptError> {
        match self.data.binding() {
            Some((boundary, _)) => {
                let camera_ref = ComponentRef::from_raw(self.data.load()?.camera);
                Camera::bind(Arc::clone(boundary), camera_ref)
            }
            None => Ok(Camera::detached()),
        }
    }
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

/// Mirrored accessor over the engine's camera state.
///
/// Reached through [`CameraComponent::camera`]; not independently attachable
/// to an entity.
#[derive(Debug)]
pub struct Camera {
    state: Mirrored<CameraState>,
}

impl Camera {
    pub(crate) fn bind(
        boundary: Arc<dyn EngineBoundary>,
        r: ComponentRef,
    ) -> Result<Self, ScriptError> {
        Ok(Self {
            state: Mirrored::bind(boundary, r)?,
        })
    }

    /// A detached camera: reads and writes touch a local record only, and
    /// no recompute is triggered.
    pub fn detached() -> Self {
        Self {
            state: Mirrored::detached(CameraState::default()),
        }
    }

    // -- driving fields and their recompute triggers ----------------------

    pub fn yaw(&self) -> Result<f32, ScriptError> {
        Ok(self.state.load()?.yaw)
    }

    pub fn set_yaw(&mut self, degrees: f32) -> Result<(), ScriptError> {
        self.state.update(|s| s.yaw = degrees)?;
        self.recompute_vectors()
    }

    pub fn pitch(&self) -> Result<f32, ScriptError> {
        Ok(self.state.load()?.pitch)
    }

    pub fn set_pitch(&mut self, degrees: f32) -> Result<(), ScriptError> {
        self.state.update(|s| s.pitch = degrees)?;
        self.recompute_vectors()
    }

    pub fn field_of_view(&self) -> Result<f32, ScriptError> {
        Ok(self.state.load()?.fov_degrees)
    }

    pub fn set_field_of_view(&mut self, degrees: f32) -> Result<(), ScriptError> {
        self.state.update(|s| s.fov_degrees = degrees)?;
        self.recompute_view()
    }

    pub fn near_clip(&self) -> Result<f32, ScriptError> {
        Ok(self.state.load()?.near_plane)
    }

    pub fn set_near_clip(&mut self, distance: f32) -> Result<(), ScriptError> {
        self.state.update(|s| s.near_plane = distance)?;
        self.recompute_projection()
    }

    pub fn far_clip(&self) -> Result<f32, ScriptError> {
        Ok(self.state.load()?.far_plane)
    }

    pub fn set_far_clip(&mut self, distance: f32) -> Result<(), ScriptError> {
        self.state.update(|s| s.far_plane = distance)?;
        self.recompute_projection()
    }

    // -- derived state, always read fresh ---------------------------------

    pub fn position(&self) -> Result<Vec3, ScriptError> {
        Ok(self.state.load()?.position.into())
    }

    pub fn view_direction(&self) -> Result<Vec3, ScriptError> {
        Ok(self.state.load()?.view_dir.into())
    }

    pub fn right_direction(&self) -> Result<Vec3, ScriptError> {
        Ok(self.state.load()?.right_dir.into())
    }

    pub fn local_up_direction(&self) -> Result<Vec3, ScriptError> {
        Ok(self.state.load()?.up_dir.into())
    }

    pub fn world_up_direction(&self) -> Result<Vec3, ScriptError> {
        Ok(self.state.load()?.world_up.into())
    }

    pub fn view_matrix(&self) -> Result<Mat4, ScriptError> {
        Ok(Mat4::from_cols_array(&self.state.load()?.view))
    }

    pub fn projection_matrix(&self) -> Result<Mat4, ScriptError> {
        Ok(Mat4::from_cols_array(&self.state.load()?.projection))
    }

    pub fn view_projection_matrix(&self) -> Result<Mat4, ScriptError> {
        Ok(Mat4::from_cols_array(&self.state.load()?.view_projection))
    }

    // -- recompute plumbing ----------------------------------------------

    fn recompute_vectors(&self) -> Result<(), ScriptError> {
        match self.state.binding() {
            Some((boundary, r)) => boundary.recompute_camera_vectors(r),
            None => Ok(()),
        }
    }

    fn recompute_view(&self) -> Result<(), ScriptError> {
        match self.state.binding() {
            Some((boundary, r)) => boundary.recompute_camera_view(r),
            None => Ok(()),
        }
    }

    fn recompute_projection(&self) -> Result<(), ScriptError> {
        match self.state.binding() {
            Some((boundary, r)) => boundary.recompute_camera_projection(r),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
