//! Transform component accessor (mirrored).

use std::sync::Arc;

use ember_abi::TransformData;
use glam::Vec3;

use crate::boundary::{ComponentRef, EngineBoundary};
use crate::entity::{EntityId, ScriptComponent};
use crate::mirrored::Mirrored;
use crate::registry::ComponentKind;
use crate::ScriptError;

/// Mirrored accessor over an entity's transform.
///
/// Each getter re-reads the full struct from engine memory; each setter
/// round-trips it, so setting one field never clobbers native changes to the
/// others.
#[derive(Debug)]
pub struct TransformComponent {
    data: Mirrored<TransformData>,
}

impl ScriptComponent for TransformComponent {
    const KIND: ComponentKind = ComponentKind::Transform;

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

impl TransformComponent {
    /// A detached transform: a plain in-memory record with no native effect.
    pub fn detached() -> Self {
        Self {
            data: Mirrored::detached(TransformData::default()),
        }
    }

    pub fn translation(&self) -> Result<Vec3, ScriptError> {
        Ok(self.data.load()?.translation.into())
    }

    pub fn set_translation(&mut self, translation: Vec3) -> Result<(), ScriptError> {
        self.data.update(|t| t.translation = translation.into())
    }

    /// Euler rotation in degrees.
    pub fn rotation(&self) -> Result<Vec3, ScriptError> {
        Ok(self.data.load()?.rotation.into())
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> Result<(), ScriptError> {
        self.data.update(|t| t.rotation = rotation.into())
    }

    pub fn scale(&self) -> Result<Vec3, ScriptError> {
        Ok(self.data.load()?.scale.into())
    }

    pub fn set_scale(&mut self, scale: Vec3) -> Result<(), ScriptError> {
        self.data.update(|t| t.scale = scale.into())
    }

    /// Snapshot of the whole struct.
    pub fn read(&self) -> Result<TransformData, ScriptError> {
        self.data.load()
    }

    /// Scoped read-mutate-commit over the whole struct, for multi-field
    /// edits that should round-trip once.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut TransformData) -> R) -> Result<R, ScriptError> {
        self.data.update(f)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
