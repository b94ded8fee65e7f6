//! Movement input binding. The host writes the vector; the player reads it
//! only while the binding is enabled.

use glam::Vec2;

#[derive(Debug, Clone, Copy, Default)]
pub struct MovementInput {
    value: Vec2,
    enabled: bool,
}

impl MovementInput {
    pub fn set(&mut self, value: Vec2) {
        self.value = value;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The current vector, or zero while disabled.
    pub fn read(&self) -> Vec2 {
        if self.enabled {
            self.value
        } else {
            Vec2::ZERO
        }
    }
}
