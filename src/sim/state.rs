//! Game state and level layout

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Brick, Entity, EntityKind, Paddle, Wall};
use super::round::{Round, RoundPhase};
use crate::consts::*;
use crate::engine::{Camera, Collidable, Color, EntityId, Host};
use crate::settings::Settings;

/// The breakout game: level layout plus the round controller
#[derive(Debug, Clone)]
pub struct Breakout {
    pub round: Round,
    pub paddle: Option<EntityId>,
    pub level_size: Vec2,
    /// Draw the score overlay
    pub show_score: bool,
    bricks_total: usize,
}

impl Default for Breakout {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Breakout {
    pub fn new(settings: &Settings) -> Self {
        Self {
            round: Round::new(),
            paddle: None,
            level_size: LEVEL_SIZE,
            show_score: settings.show_score,
            bricks_total: 0,
        }
    }

    pub fn score(&self) -> i64 {
        self.round.score
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn bricks_total(&self) -> usize {
        self.bricks_total
    }

    /// Fill the world: bricks, camera, paddle, walls
    pub fn setup_level(&mut self, host: &mut Host<Entity>) {
        for pos in brick_grid(self.level_size) {
            let color = Color::random(&mut host.rng);
            host.world
                .spawn(Entity::Brick(Brick::new(pos, BRICK_SIZE, color)));
            self.bricks_total += 1;
        }

        host.camera = Camera::centered_on(self.level_size * 0.5);

        self.paddle = Some(
            host.world
                .spawn(Entity::Paddle(Paddle::new(self.level_size.x))),
        );

        for (pos, size) in wall_layout(self.level_size) {
            host.world.spawn(Entity::Wall(Wall::new(pos, size)));
        }

        log::info!(
            "Level {}x{}: {} bricks, {} entities",
            self.level_size.x,
            self.level_size.y,
            self.bricks_total,
            host.world.len()
        );
    }

    /// Snapshot for logs and the runner's summary
    pub fn summary(&self, host: &Host<Entity>) -> RoundSummary {
        RoundSummary {
            score: self.round.score,
            phase: self.round.phase(),
            bricks_destroyed: self.round.bricks_destroyed,
            bricks_remaining: host.world.count_kind(EntityKind::Brick),
            balls_served: self.round.balls_served,
            balls_lost: self.round.balls_lost,
            paddle_hits: self.round.paddle_hits,
            cleared: self.round.cleared,
            ticks: host.tick,
        }
    }

    /// Live ball position and velocity, if one is in play
    pub fn ball_state(&self, host: &Host<Entity>) -> Option<(Vec2, Vec2)> {
        let id = self.round.ball?;
        let body = host.world.get(id)?.body();
        Some((body.pos, body.velocity))
    }
}

/// End-of-run numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub score: i64,
    pub phase: RoundPhase,
    pub bricks_destroyed: u32,
    pub bricks_remaining: usize,
    pub balls_served: u32,
    pub balls_lost: u32,
    pub paddle_hits: u32,
    pub cleared: bool,
    pub ticks: u64,
}

/// Brick centres: every 2 units across, every unit up from row 12,
/// keeping a 2-unit margin from the sides and top
pub fn brick_grid(level_size: Vec2) -> Vec<Vec2> {
    let mut cells = Vec::new();
    let mut x = BRICK_MARGIN;
    while x <= level_size.x - BRICK_MARGIN {
        let mut y = BRICK_FIRST_ROW;
        while y <= level_size.y - BRICK_MARGIN {
            cells.push(Vec2::new(x, y));
            y += BRICK_SIZE.y;
        }
        x += BRICK_SIZE.x;
    }
    cells
}

/// Left, right and top walls just outside the field. No bottom wall.
pub fn wall_layout(level_size: Vec2) -> [(Vec2, Vec2); 3] {
    let half = WALL_THICKNESS / 2.0;
    let tall = Vec2::new(WALL_THICKNESS, WALL_LENGTH);
    let wide = Vec2::new(WALL_LENGTH, WALL_THICKNESS);
    [
        (Vec2::new(-half, level_size.y / 2.0), tall),
        (Vec2::new(level_size.x + half, level_size.y / 2.0), tall),
        (Vec2::new(level_size.x / 2.0, level_size.y + half), wide),
    ]
}
