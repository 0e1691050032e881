//! Component-type registry: the closed mapping from script component kinds
//! to the stable numeric ids the boundary functions are keyed by.
//!
//! The set of bindable component kinds is a compile-time enum, so the typed
//! facade paths ([`Entity::get`](crate::entity::Entity::get) and friends) can
//! never ask the engine about a type outside the contract. Type-erased
//! callers go through [`resolve`], which yields [`ComponentTypeId::UNKNOWN`]
//! for anything unregistered -- never a valid id belonging to another kind.

use std::any::TypeId;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ComponentTypeId
// ---------------------------------------------------------------------------

/// Stable numeric identifier for a component kind, as used on every native
/// boundary call.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentTypeId(u32);

impl ComponentTypeId {
    /// Sentinel for types outside the contract. Distinct from every valid
    /// id; callers must check for it before issuing a native call.
    pub const UNKNOWN: ComponentTypeId = ComponentTypeId(u32::MAX);

    /// Reconstruct from the raw wire value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw wire value.
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Whether this is the [`UNKNOWN`](Self::UNKNOWN) sentinel.
    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "ComponentTypeId(UNKNOWN)")
        } else {
            write!(f, "ComponentTypeId({})", self.0)
        }
    }
}

// ---------------------------------------------------------------------------
// AccessKind
// ---------------------------------------------------------------------------

/// How an accessor for a component kind reaches engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    /// The accessor round-trips the component's struct through the boundary
    /// on every access.
    Mirrored,
    /// The accessor holds a handle and forwards every operation to a native
    /// function keyed by it.
    Proxy,
}

// ---------------------------------------------------------------------------
// ComponentKind
// ---------------------------------------------------------------------------

/// The closed set of component kinds exposed to scripts.
///
/// Each kind carries its wire id and its access strategy. Adding a new
/// bindable component means adding a variant here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Transform,
    Camera,
    RigidBody,
}

impl ComponentKind {
    /// Every kind in the contract.
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::Transform,
        ComponentKind::Camera,
        ComponentKind::RigidBody,
    ];

    /// The stable wire id for this kind. Total: a kind always has an id.
    pub const fn type_id(self) -> ComponentTypeId {
        match self {
            ComponentKind::Transform => ComponentTypeId(3),
            ComponentKind::Camera => ComponentTypeId(4),
            ComponentKind::RigidBody => ComponentTypeId(11),
        }
    }

    /// The access strategy for this kind.
    pub const fn access(self) -> AccessKind {
        match self {
            ComponentKind::Transform | ComponentKind::Camera => AccessKind::Mirrored,
            ComponentKind::RigidBody => AccessKind::Proxy,
        }
    }

    /// Resolve a wire id back to its kind. `None` for ids outside the
    /// contract, including [`ComponentTypeId::UNKNOWN`].
    pub fn from_type_id(id: ComponentTypeId) -> Option<ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.type_id() == id)
    }
}

// ---------------------------------------------------------------------------
// Type-erased resolution
// ---------------------------------------------------------------------------

/// Resolve a Rust accessor type to its wire id.
///
/// Returns [`ComponentTypeId::UNKNOWN`] for any type that is not a bindable
/// accessor. The result is stable for the life of the process.
pub fn resolve<T: 'static>() -> ComponentTypeId {
    let ty = TypeId::of::<T>();
    if ty == TypeId::of::<crate::transform::TransformComponent>() {
        ComponentKind::Transform.type_id()
    } else if ty == TypeId::of::<crate::camera::CameraComponent>() {
        ComponentKind::Camera.type_id()
    } else if ty == TypeId::of::<crate::rigid_body::RigidBodyComponent>() {
        ComponentKind::RigidBody.type_id()
    } else {
        tracing::warn!(
            type_name = std::any::type_name::<T>(),
            "resolving a type outside the binding contract"
        );
        ComponentTypeId::UNKNOWN
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
