//! Round/score controller
//!
//! Owns the single live ball and the score. Two states:
//! `NoBall` (waiting for a press) and `BallInPlay` (until the ball drops
//! below the field). There is no win state; clearing the field is only
//! reported once.

use serde::{Deserialize, Serialize};

use super::entity::{Ball, Entity, EntityKind, GameEvent};
use crate::audio::{SoundCue, SoundEffect};
use crate::consts::*;
use crate::engine::{Collidable, EntityId, Host};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for a press to serve
    NoBall,
    /// A ball is live
    BallInPlay,
}

/// Ball lifecycle and score bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// +1 per brick, -5 per lost ball, unbounded
    pub score: i64,
    /// The only live ball, if any
    pub ball: Option<EntityId>,
    pub bricks_destroyed: u32,
    pub balls_lost: u32,
    pub balls_served: u32,
    pub paddle_hits: u32,
    /// Every brick is gone (reported once, play continues)
    pub cleared: bool,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RoundPhase {
        if self.ball.is_some() {
            RoundPhase::BallInPlay
        } else {
            RoundPhase::NoBall
        }
    }

    /// Pre-physics: retire a lost ball, then serve on press
    pub fn update(&mut self, host: &mut Host<Entity>) {
        if let Some(id) = self.ball {
            match host.world.get(id).map(|e| e.body().pos.y) {
                Some(y) if y < BALL_LOST_Y => {
                    host.world.destroy(id);
                    self.ball = None;
                    self.score -= BALL_LOST_PENALTY;
                    self.balls_lost += 1;
                    log::info!("Ball lost (-{BALL_LOST_PENALTY}), score {}", self.score);
                }
                Some(_) => {}
                None => {
                    log::warn!("Ball {id} vanished from the world");
                    self.ball = None;
                }
            }
        }

        if self.ball.is_none() && host.pressed() {
            host.play(SoundCue::new(SoundEffect::Start));
            let id = host.world.spawn(Entity::Ball(Ball::new(host.camera.pos)));
            self.ball = Some(id);
            self.balls_served += 1;
            log::info!("Ball {id} served at {}", host.camera.pos);
        }
    }

    /// Post-physics: apply this tick's hook notifications
    pub fn update_post(&mut self, host: &mut Host<Entity>) {
        for event in host.take_events() {
            self.apply(event);
        }

        if !self.cleared && host.world.count_kind(EntityKind::Brick) == 0 {
            self.cleared = true;
            log::info!("Field cleared! Score {}", self.score);
        }
    }

    pub fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::BrickDestroyed { .. } => {
                self.score += BRICK_POINTS;
                self.bricks_destroyed += 1;
            }
            GameEvent::Bounce {
                against: EntityKind::Paddle,
                ..
            } => self.paddle_hits += 1,
            GameEvent::Bounce { .. } => {}
        }
    }

    /// Score the bookkeeping says we should have
    pub fn expected_score(&self) -> i64 {
        self.bricks_destroyed as i64 * BRICK_POINTS - self.balls_lost as i64 * BALL_LOST_PENALTY
    }
}
