//! Brick Break - a minimal breakout game
//!
//! Core modules:
//! - `engine`: Thin host runtime (world, physics step, camera, input, particles, lifecycle)
//! - `sim`: Game content (paddle, ball, bricks, walls, round/score controller)
//! - `audio`: Sound cues and positional voice resolution
//! - `renderer`: Backend-agnostic draw lists
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod engine;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz, one physics tick per update)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions in world units
    pub const LEVEL_SIZE: Vec2 = Vec2::new(38.0, 20.0);

    /// Fixed canvas size in pixels (720p)
    pub const CANVAS_SIZE: Vec2 = Vec2::new(1280.0, 720.0);
    /// Pixels per world unit
    pub const CAMERA_SCALE: f32 = 32.0;

    /// Per-axis velocity limit applied before integration
    pub const OBJECT_MAX_SPEED: f32 = 1.0;

    /// Paddle defaults
    pub const PADDLE_Y: f32 = 1.0;
    pub const PADDLE_SIZE: Vec2 = Vec2::new(6.0, 0.5);

    /// Ball defaults
    pub const BALL_SIZE: Vec2 = Vec2::new(0.5, 0.5);
    pub const BALL_START_VELOCITY: Vec2 = Vec2::new(-0.1, -0.1);
    /// Speed multiplier applied on every contact
    pub const BALL_SPEEDUP: f32 = 1.04;
    /// Maximum ball speed (units per tick)
    pub const BALL_MAX_SPEED: f32 = 0.5;
    /// Radians of steering per unit of paddle offset
    pub const PADDLE_STEER: f32 = 0.3;
    /// Minimum upward speed when leaving the paddle
    pub const PADDLE_MIN_LAUNCH: f32 = 0.2;
    /// Ball is lost once it falls below this height
    pub const BALL_LOST_Y: f32 = -1.0;

    /// Brick grid
    pub const BRICK_SIZE: Vec2 = Vec2::new(2.0, 1.0);
    pub const BRICK_FIRST_ROW: f32 = 12.0;
    pub const BRICK_MARGIN: f32 = 2.0;

    /// Scoring
    pub const BRICK_POINTS: i64 = 1;
    pub const BALL_LOST_PENALTY: i64 = 5;

    /// Wall thickness and length
    pub const WALL_THICKNESS: f32 = 1.0;
    pub const WALL_LENGTH: f32 = 100.0;
}

/// Rotate a vector clockwise by `angle` radians.
///
/// The host's angles run clockwise, so positive steering turns a
/// downward-moving ball toward negative x.
#[inline]
pub fn rotate_cw(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(-angle).rotate(v)
}

/// Rescale `v` to `length`, keeping its direction.
///
/// A zero vector has no direction; it becomes `(0, length)`.
#[inline]
pub fn normalize_to(v: Vec2, length: f32) -> Vec2 {
    let l = v.length();
    if l > 0.0 {
        v * (length / l)
    } else {
        Vec2::new(0.0, length)
    }
}

/// Percentage of `value` between `a` and `b`, clamped to [0, 1]
#[inline]
pub fn percent(value: f32, a: f32, b: f32) -> f32 {
    if b == a {
        0.0
    } else {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    }
}
