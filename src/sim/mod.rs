//! Breakout gameplay
//!
//! Entities, the round/score controller and the level. Everything here is
//! driven by the engine at a fixed 60 Hz with a seeded RNG, so a run is
//! reproducible from its seed and input stream.

pub mod entity;
pub mod round;
pub mod state;
pub mod tick;

pub use entity::{
    Ball, Brick, Entity, EntityKind, GameEvent, Paddle, Wall, leave_paddle, shatter_burst,
};
pub use round::{Round, RoundPhase};
pub use state::{Breakout, RoundSummary, brick_grid, wall_layout};
