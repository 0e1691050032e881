//! Input query facade: stateless forwards to the engine's input backend.

use std::fmt;
use std::sync::Arc;

use glam::Vec2;

use crate::boundary::EngineBoundary;
use crate::ScriptError;

/// Script-facing input queries. No state lives on this side; every call
/// polls the engine.
#[derive(Clone)]
pub struct Input {
    boundary: Arc<dyn EngineBoundary>,
}

impl Input {
    pub(crate) fn new(boundary: Arc<dyn EngineBoundary>) -> Self {
        Self { boundary }
    }

    pub fn mouse_position(&self) -> Result<Vec2, ScriptError> {
        self.boundary.mouse_position()
    }

    pub fn set_mouse_position(&self, pos: Vec2) -> Result<(), ScriptError> {
        self.boundary.set_mouse_position(pos)
    }

    pub fn is_mouse_button_pressed(&self, button: u32) -> Result<bool, ScriptError> {
        self.boundary.mouse_button_pressed(button)
    }

    pub fn is_key_down(&self, key: u32) -> Result<bool, ScriptError> {
        self.boundary.key_down(key)
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input").finish_non_exhaustive()
    }
}
