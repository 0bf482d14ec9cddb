//! Pointer input for a single tick

use glam::Vec2;

use super::camera::Camera;

/// Where the pointer is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pointer {
    /// Canvas pixels, converted through the camera
    Screen(Vec2),
    /// Already in world units
    World(Vec2),
}

impl Default for Pointer {
    fn default() -> Self {
        Pointer::World(Vec2::ZERO)
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub pointer: Pointer,
    /// Primary button went down since the last tick (one-shot)
    pub pressed: bool,
}

impl InputState {
    pub fn at_world(pos: Vec2) -> Self {
        Self {
            pointer: Pointer::World(pos),
            pressed: false,
        }
    }

    pub fn at_screen(pos: Vec2) -> Self {
        Self {
            pointer: Pointer::Screen(pos),
            pressed: false,
        }
    }

    pub fn with_press(mut self) -> Self {
        self.pressed = true;
        self
    }

    pub fn pointer_world(&self, camera: &Camera) -> Vec2 {
        match self.pointer {
            Pointer::Screen(p) => camera.screen_to_world(p),
            Pointer::World(p) => p,
        }
    }
}
