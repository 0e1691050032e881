//! Entity handles and the script-facing entity facade.
//!
//! An [`EntityId`] is a pure lookup key: the engine mints it at entity
//! creation and the bindings never interpret its bits. The [`Entity`] facade
//! pairs an id with the boundary and exposes the four component operations,
//! constructing the right accessor kind for the requested component type.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::boundary::{ComponentRef, EngineBoundary};
use crate::input::Input;
use crate::registry::ComponentKind;
use crate::ScriptError;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// Opaque 64-bit entity identifier, globally unique for the scene's
/// lifetime. Copied freely, compared by value, owns nothing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
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

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ScriptComponent
// ---------------------------------------------------------------------------

/// A component type bindable through the entity facade.
///
/// Implementors declare their [`ComponentKind`] and know how to construct
/// themselves over a resolved component reference. Mirrored accessors wrap
/// the reference in a [`Mirrored`](crate::mirrored::Mirrored); proxy
/// accessors read their handle out of the referenced struct.
pub trait ScriptComponent: Sized {
    /// Which kind of component this accessor binds.
    const KIND: ComponentKind;

    /// Build the accessor over a resolved native reference.
    fn bind(
        boundary: Arc<dyn EngineBoundary>,
        entity: EntityId,
        r: ComponentRef,
    ) -> Result<Self, ScriptError>;
}

// ---------------------------------------------------------------------------
// ScriptContext
// ---------------------------------------------------------------------------

/// Owns the boundary resolved at script-domain load and mints facades.
#[derive(Clone)]
pub struct ScriptContext {
    boundary: Arc<dyn EngineBoundary>,
}

impl ScriptContext {
    /// Wrap an already-constructed boundary (tests pass a double here).
    pub fn new(boundary: Arc<dyn EngineBoundary>) -> Self {
        Self { boundary }
    }

    /// Adopt the engine's boundary-function table. Fails on an ABI version
    /// mismatch.
    pub fn from_table(table: ember_abi::BoundaryTable) -> Result<Self, ScriptError> {
        Ok(Self::new(Arc::new(crate::ffi::FfiBoundary::new(table)?)))
    }

    /// The facade for one entity.
    pub fn entity(&self, id: EntityId) -> Entity {
        Entity {
            id,
            boundary: Arc::clone(&self.boundary),
        }
    }

    /// The input query facade.
    pub fn input(&self) -> Input {
        Input::new(Arc::clone(&self.boundary))
    }

    /// Direct access to the boundary.
    pub fn boundary(&self) -> &Arc<dyn EngineBoundary> {
        &self.boundary
    }
}

impl fmt::Debug for ScriptContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptContext").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Script-facing facade over one entity.
///
/// Accessors returned by [`get`](Self::get)/[`add`](Self::add) are
/// constructed fresh on every call and must not be retained past the scope
/// they were fetched for: once the underlying component is destroyed they
/// fail with [`ScriptError::StaleComponentRef`].
#[derive(Clone)]
pub struct Entity {
    id: EntityId,
    boundary: Arc<dyn EngineBoundary>,
}

impl Entity {
    /// This entity's id.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Fetch an accessor for component `C`.
    ///
    /// # Errors
    ///
    /// [`ScriptError::ComponentNotFound`] when the entity has no such
    /// component.
    pub fn get<C: ScriptComponent>(&self) -> Result<C, ScriptError> {
        let type_id = C::KIND.type_id();
        tracing::debug!(entity = %self.id, kind = ?C::KIND, "get component");
        let r = self
            .boundary
            .component_ref(self.id, type_id)?
            .ok_or(ScriptError::ComponentNotFound {
                entity: self.id,
                kind: C::KIND,
            })?;
        C::bind(Arc::clone(&self.boundary), self.id, r)
    }

    /// Attach component `C` (or find the existing one) and fetch an
    /// accessor for it.
    ///
    /// # Errors
    ///
    /// [`ScriptError::ComponentNotFound`] when the engine could not produce
    /// the component.
    pub fn add<C: ScriptComponent>(&self) -> Result<C, ScriptError> {
        let type_id = C::KIND.type_id();
        tracing::debug!(entity = %self.id, kind = ?C::KIND, "add component");
        let r = self
            .boundary
            .attach_component(self.id, type_id)?
            .ok_or(ScriptError::ComponentNotFound {
                entity: self.id,
                kind: C::KIND,
            })?;
        C::bind(Arc::clone(&self.boundary), self.id, r)
    }

    /// Whether the entity currently has component `C`. Builds no accessor.
    pub fn has<C: ScriptComponent>(&self) -> Result<bool, ScriptError> {
        self.boundary.has_component(self.id, C::KIND.type_id())
    }

    /// Remove component `C`. Accessors obtained before this call become
    /// stale.
    pub fn remove<C: ScriptComponent>(&self) -> Result<(), ScriptError> {
        tracing::debug!(entity = %self.id, kind = ?C::KIND, "remove component");
        self.boundary.detach_component(self.id, C::KIND.type_id())
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity").field("id", &self.id).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
