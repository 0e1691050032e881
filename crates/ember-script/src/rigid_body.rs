//! Rigid-body component accessor (proxy).
//!
//! The physics simulation owns body state; this accessor holds the body
//! handle and forwards every operation through handle-keyed boundary
//! functions. Nothing is served from a cache: every getter queries the
//! simulation. The one local write -- the mass bookkeeping field in the
//! component struct -- happens only after the native write succeeds, so the
//! mirror can lag native truth but never contradict it.

use std::sync::Arc;

use ember_abi::RigidBodyData;
use glam::{Quat, Vec3};

use crate::boundary::{BodyHandle, ComponentRef, EngineBoundary};
use crate::entity::{EntityId, ScriptComponent};
use crate::mirrored::Mirrored;
use crate::registry::ComponentKind;
use crate::ScriptError;

/// Proxy accessor over an entity's rigid body.
pub struct RigidBodyComponent {
    boundary: Arc<dyn EngineBoundary>,
    body: BodyHandle,
    /// Component-struct mirror, used only for the documented mass
    /// bookkeeping and motion-kind inspection.
    data: Mirrored<RigidBodyData>,
}

impl ScriptComponent for RigidBodyComponent {
    const KIND: ComponentKind = ComponentKind::RigidBody;

    fn bind(
        boundary: Arc<dyn EngineBoundary>,
        _entity: EntityId,
        r: ComponentRef,
    ) -> Result<Self, ScriptError> {
        let data: Mirrored<RigidBodyData> = Mirrored::bind(Arc::clone(&boundary), r)?;
        let body = BodyHandle::from_raw(data.load()?.body);
        Ok(Self {
            boundary,
            body,
            data,
        })
    }
}

impl RigidBodyComponent {
    /// The physics handle this accessor forwards through.
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Mass as the simulation reports it right now.
    pub fn mass(&self) -> Result<f32, ScriptError> {
        self.boundary.body_mass(self.body)
    }

    /// Set the body's mass.
    ///
    /// The simulation is the authority: the native write goes first, and the
    /// component-struct mirror is updated only when it succeeds.
    pub fn set_mass(&mut self, mass: f32) -> Result<(), ScriptError> {
        self.boundary.set_body_mass(self.body, mass)?;
        self.data.update(|d| d.mass = mass)
    }

    /// The last mass written through this layer, from the component struct.
    /// Non-authoritative; prefer [`mass`](Self::mass).
    pub fn cached_mass(&self) -> Result<f32, ScriptError> {
        Ok(self.data.load()?.mass)
    }

    /// Motion kind from the component struct (one of the
    /// `ember_abi::BODY_MOTION_*` constants).
    pub fn motion(&self) -> Result<u32, ScriptError> {
        Ok(self.data.load()?.motion)
    }

    /// Drive a kinematic body toward a target pose over `seconds`.
    pub fn move_kinematic(
        &self,
        target_position: Vec3,
        target_rotation: Quat,
        seconds: f32,
    ) -> Result<(), ScriptError> {
        self.boundary
            .move_body_kinematic(self.body, target_position, target_rotation, seconds)
    }

    pub fn add_force(&self, force: Vec3) -> Result<(), ScriptError> {
        self.boundary.add_body_force(self.body, force)
    }

    pub fn add_torque(&self, torque: Vec3) -> Result<(), ScriptError> {
        self.boundary.add_body_torque(self.body, torque)
    }

    pub fn add_impulse(&self, impulse: Vec3) -> Result<(), ScriptError> {
        self.boundary.add_body_impulse(self.body, impulse)
    }

    pub fn add_angular_impulse(&self, impulse: Vec3) -> Result<(), ScriptError> {
        self.boundary.add_body_angular_impulse(self.body, impulse)
    }

    pub fn set_linear_velocity(&self, velocity: Vec3) -> Result<(), ScriptError> {
        self.boundary.set_body_linear_velocity(self.body, velocity)
    }

    pub fn set_angular_velocity(&self, velocity: Vec3) -> Result<(), ScriptError> {
        self.boundary.set_body_angular_velocity(self.body, velocity)
    }

    pub fn linear_velocity(&self) -> Result<Vec3, ScriptError> {
        self.boundary.body_linear_velocity(self.body)
    }

    pub fn angular_velocity(&self) -> Result<Vec3, ScriptError> {
        self.boundary.body_angular_velocity(self.body)
    }
}

impl std::fmt::Debug for RigidBodyComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RigidBodyComponent")
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
