//! The four entity variants and their collision behaviour
//!
//! Every variant wraps a `Body`; `Entity` is the tagged union the world
//! stores, dispatching the `Collidable` hooks to the variant.

use glam::Vec2;

use crate::audio::{SoundCue, SoundEffect};
use crate::consts::*;
use crate::engine::{
    Body, Collidable, CollisionResponse, Color, Contact, Emitter, EmitterConfig, HookContext,
};
use crate::renderer::colors;
use crate::{normalize_to, rotate_cw};

/// Variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Paddle,
    Ball,
    Brick,
    Wall,
}

/// Notifications raised by collision hooks for the round controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The ball bounced off something (post-speedup speed)
    Bounce { against: EntityKind, speed: f32 },
    /// A brick broke at `pos`
    BrickDestroyed { pos: Vec2 },
}

type Cx = HookContext<GameEvent>;

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub body: Body,
    /// Right edge of the playfield the paddle must stay inside
    pub field_width: f32,
}

impl Paddle {
    /// Centred on the field, so it is in bounds before the first tick
    pub fn new(field_width: f32) -> Self {
        let mut body = Body::fixed(Vec2::new(field_width / 2.0, PADDLE_Y), PADDLE_SIZE);
        body.color = colors::PADDLE;
        Self { body, field_width }
    }

    /// Follow the pointer horizontally, keeping both edges on the field
    pub fn track(&mut self, pointer_x: f32) {
        let half = self.body.size.x / 2.0;
        self.body.pos.x = pointer_x.clamp(half, self.field_width - half);
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub body: Body,
}

impl Ball {
    pub fn new(pos: Vec2) -> Self {
        let mut body = Body::new(pos, BALL_SIZE);
        body.velocity = BALL_START_VELOCITY;
        body.collide = true;
        body.restitution = 1.0;
        body.color = colors::BALL;
        Self { body }
    }

    pub fn speed(&self) -> f32 {
        self.body.velocity.length()
    }

    fn on_contact(&mut self, other: &Contact<EntityKind>, cx: &mut Cx) -> CollisionResponse {
        let speed = (BALL_SPEEDUP * self.speed()).min(BALL_MAX_SPEED);
        self.body.velocity = normalize_to(self.body.velocity, speed);

        let is_paddle = other.kind == EntityKind::Paddle;
        // Already heading away from the paddle: let it pass
        if is_paddle && self.body.velocity.y > 0.0 {
            return CollisionResponse::SuppressDefaultResponse;
        }

        cx.play(SoundCue::at(SoundEffect::Bounce, self.body.pos).with_pitch(speed));
        cx.notify(GameEvent::Bounce {
            against: other.kind,
            speed,
        });

        if is_paddle {
            let offset = other.pos.x - self.body.pos.x;
            self.body.velocity = leave_paddle(self.body.velocity, offset);
            log::trace!("paddle hit offset={offset:.2} v={}", self.body.velocity);
            return CollisionResponse::SuppressDefaultResponse;
        }

        CollisionResponse::AcceptDefaultResponse
    }
}

/// Velocity of a ball leaving the paddle.
///
/// Steers by the hit offset (`paddle.x - ball.x`), then guarantees an
/// upward component of at least `PADDLE_MIN_LAUNCH`. The floor can lengthen
/// the vector; the horizontal part is trimmed so the speed cap still holds.
pub fn leave_paddle(velocity: Vec2, offset: f32) -> Vec2 {
    let mut v = rotate_cw(velocity, PADDLE_STEER * offset);
    v.y = (-v.y).max(PADDLE_MIN_LAUNCH);
    if v.length() > BALL_MAX_SPEED {
        let x = (BALL_MAX_SPEED * BALL_MAX_SPEED - v.y * v.y).max(0.0).sqrt();
        v.x = x.copysign(v.x);
    }
    v
}

/// A breakable brick
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub body: Body,
}

impl Brick {
    pub fn new(pos: Vec2, size: Vec2, color: Color) -> Self {
        let mut body = Body::fixed(pos, size);
        body.color = color;
        Self { body }
    }

    /// Break on first contact. A broken brick never scores again.
    fn on_contact(&mut self, cx: &mut Cx) -> CollisionResponse {
        if self.body.destroyed {
            return CollisionResponse::AcceptDefaultResponse;
        }
        self.body.destroyed = true;

        let pos = self.body.pos;
        cx.play(SoundCue::at(SoundEffect::Break, pos));
        cx.emit(Emitter::new(pos, 0.0, shatter_burst(self.body.size, self.body.color)));
        cx.notify(GameEvent::BrickDestroyed { pos });
        log::debug!("brick broke at ({:.1}, {:.1})", pos.x, pos.y);

        CollisionResponse::AcceptDefaultResponse
    }
}

/// Burst of the brick's colour fading to transparent
pub fn shatter_burst(size: Vec2, color: Color) -> EmitterConfig {
    EmitterConfig {
        emit_size: size,
        emit_time: 0.1,
        emit_rate: 200.0,
        cone_angle: std::f32::consts::PI,
        color_start: color,
        color_end: color.scale(1.0, 0.0),
        particle_time: 0.2,
        size_start: 0.5,
        size_end: 1.0,
        speed: 0.1,
        damping: 0.99,
        fade_rate: 0.1,
        randomness: 0.5,
        additive: true,
    }
}

/// Invisible boundary
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub body: Body,
}

impl Wall {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        let mut body = Body::fixed(pos, size);
        body.color = colors::WALL;
        Self { body }
    }
}

/// Any world entity
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Paddle(Paddle),
    Ball(Ball),
    Brick(Brick),
    Wall(Wall),
}

impl Collidable for Entity {
    type Kind = EntityKind;
    type Event = GameEvent;

    fn kind(&self) -> EntityKind {
        match self {
            Entity::Paddle(_) => EntityKind::Paddle,
            Entity::Ball(_) => EntityKind::Ball,
            Entity::Brick(_) => EntityKind::Brick,
            Entity::Wall(_) => EntityKind::Wall,
        }
    }

    fn body(&self) -> &Body {
        match self {
            Entity::Paddle(e) => &e.body,
            Entity::Ball(e) => &e.body,
            Entity::Brick(e) => &e.body,
            Entity::Wall(e) => &e.body,
        }
    }

    fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Paddle(e) => &mut e.body,
            Entity::Ball(e) => &mut e.body,
            Entity::Brick(e) => &mut e.body,
            Entity::Wall(e) => &mut e.body,
        }
    }

    fn update(&mut self, cx: &mut Cx) {
        if let Entity::Paddle(paddle) = self {
            paddle.track(cx.pointer.x);
        }
    }

    fn on_collision(&mut self, other: &Contact<EntityKind>, cx: &mut Cx) -> CollisionResponse {
        match self {
            Entity::Ball(ball) => ball.on_contact(other, cx),
            Entity::Brick(brick) => brick.on_contact(cx),
            Entity::Paddle(_) | Entity::Wall(_) => CollisionResponse::AcceptDefaultResponse,
        }
    }
}
