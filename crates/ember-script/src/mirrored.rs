//! Mirrored component access: full-struct round trips against engine memory.
//!
//! A [`Mirrored`] accessor never trusts a cached value. Every read fetches
//! the whole struct through the boundary and every write sends the whole
//! struct back, so mutations made by native systems between two script calls
//! are always observed on the next read, never partially. The explicit
//! [`update`](Mirrored::update) operation is the read-mutate-commit pattern
//! every field setter is built on.

use std::sync::Arc;

use bytemuck::Pod;

use crate::boundary::{ComponentRef, EngineBoundary};
use crate::ScriptError;

/// A component accessor that mirrors a `Pod` struct held in engine memory.
///
/// Constructed either *bound* (over a live [`ComponentRef`]) or *detached*
/// (a plain local value with no native effect, usable as an in-memory
/// record). This layer does not serialize concurrent access to the same
/// native location; callers sharing a component across accessors must
/// serialize themselves.
pub struct Mirrored<T: Pod> {
    binding: Option<(Arc<dyn EngineBoundary>, ComponentRef)>,
    local: T,
}

impl<T: Pod> Mirrored<T> {
    /// Bind to a live component reference, priming the local copy with the
    /// current native value.
    pub fn bind(boundary: Arc<dyn EngineBoundary>, r: ComponentRef) -> Result<Self, ScriptError> {
        let mut local = T::zeroed();
        boundary.read_component(r, bytemuck::bytes_of_mut(&mut local))?;
        Ok(Self {
            binding: Some((boundary, r)),
            local,
        })
    }

    /// A detached accessor holding `initial`. Reads and writes touch only
    /// the local value.
    pub fn detached(initial: T) -> Self {
        Self {
            binding: None,
            local: initial,
        }
    }

    /// Whether this accessor is bound to engine memory.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// The bound reference, if any.
    pub fn component_ref(&self) -> Option<ComponentRef> {
        self.binding.as_ref().map(|(_, r)| *r)
    }

    pub(crate) fn binding(&self) -> Option<(&Arc<dyn EngineBoundary>, ComponentRef)> {
        self.binding.as_ref().map(|(b, r)| (b, *r))
    }

    /// The current value: re-read from engine memory when bound, the local
    /// copy when detached.
    pub fn load(&self) -> Result<T, ScriptError> {
        match &self.binding {
            Some((boundary, r)) => {
                let mut value = T::zeroed();
                boundary.read_component(*r, bytemuck::bytes_of_mut(&mut value))?;
                Ok(value)
            }
            None => Ok(self.local),
        }
    }

    /// Replace the value: written through to engine memory when bound. The
    /// local copy is updated only after a successful native write.
    pub fn store(&mut self, value: T) -> Result<(), ScriptError> {
        if let Some((boundary, r)) = &self.binding {
            boundary.write_component(*r, bytemuck::bytes_of(&value))?;
        }
        self.local = value;
        Ok(())
    }

    /// Read the current value, mutate it in place, and commit it back.
    ///
    /// The whole struct round-trips, so untouched fields keep whatever value
    /// the engine currently holds and no field write is lost.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Result<R, ScriptError> {
        let mut value = self.load()?;
        let out = f(&mut value);
        self.store(value)?;
        Ok(out)
    }
}

impl<T: Pod + std::fmt::Debug> std::fmt::Debug for Mirrored<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mirrored")
            .field("bound", &self.is_bound())
            .field("local", &self.local)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
