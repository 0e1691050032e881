//! In-memory engine double implementing [`EngineBoundary`].
//!
//! Components live in a slot table with generation counters, so stale
//! references fail the same way the real engine's do. Camera and physics
//! operations are recorded for forwarding assertions, and `set_body_mass`
//! supports one-shot failure injection.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use ember_abi::{
    CameraComponentData, CameraState, RigidBodyData, TransformData, STATUS_INTERNAL,
};
use ember_script::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    RecomputeVectors(ComponentRef),
    RecomputeView(ComponentRef),
    RecomputeProjection(ComponentRef),
    RecomputeViewProjection(ComponentRef),
    SetMass(u64, f32),
    MoveKinematic(u64, Vec3, Quat, f32),
    AddForce(u64, Vec3),
    AddTorque(u64, Vec3),
    AddImpulse(u64, Vec3),
    AddAngularImpulse(u64, Vec3),
    SetLinearVelocity(u64, Vec3),
    SetAngularVelocity(u64, Vec3),
}

struct Slot {
    generation: u32,
    alive: bool,
    bytes: Vec<u8>,
}

#[derive(Default)]
struct BodyState {
    mass: f32,
    linear_velocity: Vec3,
    angular_velocity: Vec3,
}

#[derive(Default)]
struct State {
    slots: Vec<Slot>,
    components: HashMap<(u64, u32), ComponentRef>,
    bodies: HashMap<u64, BodyState>,
    next_entity: u64,
    next_body: u64,
    calls: Vec<RecordedCall>,
    fail_next_set_mass: bool,
    mouse: Vec2,
    buttons: HashSet<u32>,
    keys: HashSet<u32>,
}

impl State {
    fn alloc_slot(&mut self, bytes: Vec<u8>) -> ComponentRef {
        let slot = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            alive: true,
            bytes,
        });
        ComponentRef::new(slot, 0)
    }

    fn slot_mut(&mut self, r: ComponentRef) -> Result<&mut Slot, ScriptError> {
        let stale = ScriptError::StaleComponentRef {
            slot: r.slot(),
            generation: r.generation(),
        };
        let slot = self.slots.get_mut(r.slot() as usize).ok_or(stale)?;
        if !slot.alive || slot.generation != r.generation() {
            return Err(ScriptError::StaleComponentRef {
                slot: r.slot(),
                generation: r.generation(),
            });
        }
        Ok(slot)
    }

    fn kill_slot(&mut self, r: ComponentRef) {
        if let Some(slot) = self.slots.get_mut(r.slot() as usize) {
            slot.alive = false;
            slot.generation = slot.generation.wrapping_add(1);
        }
    }

    fn live_ref(&self, entity: EntityId, type_id: ComponentTypeId) -> Option<ComponentRef> {
        let r = *self
            .components
            .get(&(entity.to_raw(), type_id.to_raw()))?;
        let slot = self.slots.get(r.slot() as usize)?;
        (slot.alive && slot.generation == r.generation()).then_some(r)
    }
}

pub struct FakeEngine {
    state: Mutex<State>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    /// Mint a fresh entity id, as the engine would at entity creation.
    pub fn spawn(&self) -> EntityId {
        let mut state = self.state.lock().unwrap();
        state.next_entity += 1;
        EntityId::from_raw(state.next_entity)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Make the next `set_body_mass` call fail.
    pub fn fail_next_set_mass(&self) {
        self.state.lock().unwrap().fail_next_set_mass = true;
    }

    /// The simulation-side mass of a body.
    pub fn native_mass(&self, body: BodyHandle) -> f32 {
        self.state.lock().unwrap().bodies[&body.to_raw()].mass
    }

    pub fn set_key_down(&self, key: u32, down: bool) {
        let mut state = self.state.lock().unwrap();
        if down {
            state.keys.insert(key);
        } else {
            state.keys.remove(&key);
        }
    }

    pub fn set_button_pressed(&self, button: u32, pressed: bool) {
        let mut state = self.state.lock().unwrap();
        if pressed {
            state.buttons.insert(button);
        } else {
            state.buttons.remove(&button);
        }
    }

    fn record(&self, call: RecordedCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl EngineBoundary for FakeEngine {
    fn component_ref(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<Option<ComponentRef>, ScriptError> {
        if ComponentKind::from_type_id(type_id).is_none() {
            return Err(ScriptError::UnknownComponentType { type_id });
        }
        Ok(self.state.lock().unwrap().live_ref(entity, type_id))
    }

    fn attach_component(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<Option<ComponentRef>, ScriptError> {
        let kind = ComponentKind::from_type_id(type_id)
            .ok_or(ScriptError::UnknownComponentType { type_id })?;
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.live_ref(entity, type_id) {
            return Ok(Some(existing));
        }
        let bytes = match kind {
            ComponentKind::Transform => bytemuck::bytes_of(&TransformData::default()).to_vec(),
            ComponentKind::Camera => {
                let camera_ref = state.alloc_slot(bytemuck::bytes_of(&CameraState::default()).to_vec());
                bytemuck::bytes_of(&CameraComponentData {
                    camera: camera_ref.to_raw(),
                    active: 0,
                })
                .to_vec()
            }
            ComponentKind::RigidBody => {
                state.next_body += 1;
                let body = state.next_body;
                state.bodies.insert(
                    body,
                    BodyState {
                        mass: 1.0,
                        ..BodyState::default()
                    },
                );
                bytemuck::bytes_of(&RigidBodyData {
                    body,
                    ..RigidBodyData::default()
                })
                .to_vec()
            }
        };
        let r = state.alloc_slot(bytes);
        state
            .components
            .insert((entity.to_raw(), type_id.to_raw()), r);
        Ok(Some(r))
    }

    fn has_component(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<bool, ScriptError> {
        Ok(self.component_ref(entity, type_id)?.is_some())
    }

    fn detach_component(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<(), ScriptError> {
        let kind = ComponentKind::from_type_id(type_id)
            .ok_or(ScriptError::UnknownComponentType { type_id })?;
        let mut state = self.state.lock().unwrap();
        let Some(r) = state
            .components
            .remove(&(entity.to_raw(), type_id.to_raw()))
        else {
            return Ok(());
        };
        // A camera component owns its camera state slot.
        if kind == ComponentKind::Camera {
            let camera_ref = state.slot_mut(r).ok().map(|slot| {
                let data: CameraComponentData = bytemuck::pod_read_unaligned(&slot.bytes);
                ComponentRef::from_raw(data.camera)
            });
            if let Some(camera_ref) = camera_ref {
                state.kill_slot(camera_ref);
            }
        }
        state.kill_slot(r);
        Ok(())
    }

    fn read_component(&self, r: ComponentRef, out: &mut [u8]) -> Result<(), ScriptError> {
        let mut state = self.state.lock().unwrap();
        let slot = state.slot_mut(r)?;
        if slot.bytes.len() != out.len() {
            return Err(ScriptError::Native {
                call: "read_component",
                code: STATUS_INTERNAL,
            });
        }
        out.copy_from_slice(&slot.bytes);
        Ok(())
    }

    fn write_component(&self, r: ComponentRef, data: &[u8]) -> Result<(), ScriptError> {
        let mut state = self.state.lock().unwrap();
        let slot = state.slot_mut(r)?;
        if slot.bytes.len() != data.len() {
            return Err(ScriptError::Native {
                call: "write_component",
                code: STATUS_INTERNAL,
            });
        }
        slot.bytes.copy_from_slice(data);
        Ok(())
    }

    fn recompute_camera_vectors(&self, r: ComponentRef) -> Result<(), ScriptError> {
        self.state.lock().unwrap().slot_mut(r)?;
        self.record(RecordedCall::RecomputeVectors(r));
        Ok(())
    }

    fn recompute_camera_view(&self, r: ComponentRef) -> Result<(), ScriptError> {
        self.state.lock().unwrap().slot_mut(r)?;
        self.record(RecordedCall::RecomputeView(r));
        Ok(())
    }

    fn recompute_camera_projection(&self, r: ComponentRef) -> Result<(), ScriptError> {
        self.state.lock().unwrap().slot_mut(r)?;
        self.record(RecordedCall::RecomputeProjection(r));
        Ok(())
    }

    fn recompute_camera_view_projection(&self, r: ComponentRef) -> Result<(), ScriptError> {
        self.state.lock().unwrap().slot_mut(r)?;
        self.record(RecordedCall::RecomputeViewProjection(r));
        Ok(())
    }

    fn body_mass(&self, body: BodyHandle) -> Result<f32, ScriptError> {
        self.state
            .lock()
            .unwrap()
            .bodies
            .get(&body.to_raw())
            .map(|b| b.mass)
            .ok_or(ScriptError::Native {
                call: "body_mass",
                code: STATUS_INTERNAL,
            })
    }

    fn set_body_mass(&self, body: BodyHandle, mass: f32) -> Result<(), ScriptError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::SetMass(body.to_raw(), mass));
        if state.fail_next_set_mass {
            state.fail_next_set_mass = false;
            return Err(ScriptError::Native {
                call: "body_set_mass",
                code: STATUS_INTERNAL,
            });
        }
        state
            .bodies
            .get_mut(&body.to_raw())
            .ok_or(ScriptError::Native {
                call: "body_set_mass",
                code: STATUS_INTERNAL,
            })?
            .mass = mass;
        Ok(())
    }

    fn move_body_kinematic(
        &self,
        body: BodyHandle,
        target_position: Vec3,
        target_rotation: Quat,
        seconds: f32,
    ) -> Result<(), ScriptError> {
        self.record(RecordedCall::MoveKinematic(
            body.to_raw(),
            target_position,
            target_rotation,
            seconds,
        ));
        Ok(())
    }

    fn add_body_force(&self, body: BodyHandle, force: Vec3) -> Result<(), ScriptError> {
        self.record(RecordedCall::AddForce(body.to_raw(), force));
        Ok(())
    }

    fn add_body_torque(&self, body: BodyHandle, torque: Vec3) -> Result<(), ScriptError> {
        self.record(RecordedCall::AddTorque(body.to_raw(), torque));
        Ok(())
    }

    fn add_body_impulse(&self, body: BodyHandle, impulse: Vec3) -> Result<(), ScriptError> {
        self.record(RecordedCall::AddImpulse(body.to_raw(), impulse));
        Ok(())
    }

    fn add_body_angular_impulse(
        &self,
        body: BodyHandle,
        impulse: Vec3,
    ) -> Result<(), ScriptError> {
        self.record(RecordedCall::AddAngularImpulse(body.to_raw(), impulse));
        Ok(())
    }

    fn set_body_linear_velocity(
        &self,
        body: BodyHandle,
        velocity: Vec3,
    ) -> Result<(), ScriptError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(RecordedCall::SetLinearVelocity(body.to_raw(), velocity));
        if let Some(b) = state.bodies.get_mut(&body.to_raw()) {
            b.linear_velocity = velocity;
        }
        Ok(())
    }

    fn set_body_angular_velocity(
        &self,
        body: BodyHandle,
        velocity: Vec3,
    ) -> Result<(), ScriptError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(RecordedCall::SetAngularVelocity(body.to_raw(), velocity));
        if let Some(b) = state.bodies.get_mut(&body.to_raw()) {
            b.angular_velocity = velocity;
        }
        Ok(())
    }

    fn body_linear_velocity(&self, body: BodyHandle) -> Result<Vec3, ScriptError> {
        self.state
            .lock()
            .unwrap()
            .bodies
            .get(&body.to_raw())
            .map(|b| b.linear_velocity)
            .ok_or(ScriptError::Native {
                call: "body_linear_velocity",
                code: STATUS_INTERNAL,
            })
    }

    fn body_angular_velocity(&self, body: BodyHandle) -> Result<Vec3, ScriptError> {
        self.state
            .lock()
            .unwrap()
            .bodies
            .get(&body.to_raw())
            .map(|b| b.angular_velocity)
            .ok_or(ScriptError::Native {
                call: "body_angular_velocity",
                code: STATUS_INTERNAL,
            })
    }

    fn mouse_position(&self) -> Result<Vec2, ScriptError> {
        Ok(self.state.lock().unwrap().mouse)
    }

    fn set_mouse_position(&self, pos: Vec2) -> Result<(), ScriptError> {
        self.state.lock().unwrap().mouse = pos;
        Ok(())
    }

    fn mouse_button_pressed(&self, button: u32) -> Result<bool, ScriptError> {
        Ok(self.state.lock().unwrap().buttons.contains(&button))
    }

    fn key_down(&self, key: u32) -> Result<bool, ScriptError> {
        Ok(self.state.lock().unwrap().keys.contains(&key))
    }
}
