//! Camera over a fixed-size canvas

use glam::Vec2;

use crate::consts::{CAMERA_SCALE, CANVAS_SIZE};

/// Maps world units (y up) to canvas pixels (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World position at the canvas centre
    pub pos: Vec2,
    /// Pixels per world unit
    pub scale: f32,
    /// Canvas size in pixels
    pub canvas: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            scale: CAMERA_SCALE,
            canvas: CANVAS_SIZE,
        }
    }
}

impl Camera {
    /// Camera centred on `pos`
    pub fn centered_on(pos: Vec2) -> Self {
        Self {
            pos,
            ..Self::default()
        }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let rel = (world - self.pos) * self.scale;
        Vec2::new(
            rel.x + self.canvas.x / 2.0 - 0.5,
            -rel.y + self.canvas.y / 2.0 - 0.5,
        )
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x - self.canvas.x / 2.0 + 0.5) / self.scale + self.pos.x,
            -(screen.y - self.canvas.y / 2.0 + 0.5) / self.scale + self.pos.y,
        )
    }

    /// Horizontal stereo position of a world point, -1 (left edge) to 1 (right edge)
    pub fn pan_of(&self, world: Vec2) -> f32 {
        (self.world_to_screen(world).x * 2.0 / self.canvas.x - 1.0).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_world_round_trip() {
        let cam = Camera::centered_on(Vec2::new(19.0, 10.0));
        let p = Vec2::new(3.25, 17.5);
        let back = cam.screen_to_world(cam.world_to_screen(p));
        assert!((back - p).length() < 1e-4);
    }

    #[test]
    fn test_y_axis_flips() {
        let cam = Camera::centered_on(Vec2::new(19.0, 10.0));
        let above = cam.world_to_screen(Vec2::new(19.0, 11.0));
        let below = cam.world_to_screen(Vec2::new(19.0, 9.0));
        assert!(above.y < below.y);
    }

    #[test]
    fn test_pan_is_centered_on_camera() {
        let cam = Camera::centered_on(Vec2::new(19.0, 10.0));
        assert!(cam.pan_of(cam.pos).abs() < 0.01);
        assert!(cam.pan_of(Vec2::new(0.0, 10.0)) < -0.9);
        assert_eq!(cam.pan_of(Vec2::new(1000.0, 10.0)), 1.0);
    }
}
