//! Lifecycle callbacks
//!
//! The engine calls these every tick/frame; physics and the entity
//! collision hooks run between `update` and `update_post`.

use glam::Vec2;

use super::entity::Entity;
use super::state::Breakout;
use crate::consts::CANVAS_SIZE;
use crate::engine::{Game, Host};
use crate::renderer::{DrawList, colors};

/// Size of the backdrop drawn behind the level
const BACKDROP_SIZE: f32 = 100.0;
/// Score text: distance from the top of the canvas and glyph height
const SCORE_TEXT_Y: f32 = 70.0;
const SCORE_TEXT_SIZE: f32 = 50.0;

impl Game for Breakout {
    type Entity = Entity;

    fn init(&mut self, host: &mut Host<Entity>) {
        self.setup_level(host);
    }

    fn update(&mut self, host: &mut Host<Entity>) {
        self.round.update(host);
    }

    fn update_post(&mut self, host: &mut Host<Entity>) {
        self.round.update_post(host);
    }

    fn render(&self, host: &Host<Entity>, draw: &mut DrawList) {
        draw.rect(host.camera.pos, Vec2::splat(BACKDROP_SIZE), colors::BACKGROUND);
        draw.rect(host.camera.pos, self.level_size, colors::LEVEL);
    }

    fn render_post(&self, _host: &Host<Entity>, draw: &mut DrawList) {
        if self.show_score {
            draw.text_screen(
                format!("Score {}", self.round.score),
                Vec2::new(CANVAS_SIZE.x / 2.0, SCORE_TEXT_Y),
                SCORE_TEXT_SIZE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::engine::{Collidable, Engine, EntityId, InputState};
    use crate::settings::Settings;
    use crate::sim::{EntityKind, RoundPhase};
    use proptest::prelude::*;

    fn engine() -> Engine<Breakout> {
        Engine::new(Breakout::default(), &Settings::default())
    }

    fn pointer(x: f32) -> InputState {
        InputState::at_world(Vec2::new(x, 0.0))
    }

    fn ball_id(engine: &Engine<Breakout>) -> EntityId {
        engine.game().round.ball.expect("ball in play")
    }

    /// Place the live ball and set its velocity
    fn stage_ball(engine: &mut Engine<Breakout>, pos: Vec2, velocity: Vec2) {
        let id = ball_id(engine);
        let (_, host) = engine.parts_mut();
        let body = host.world.get_mut(id).unwrap().body_mut();
        body.pos = pos;
        body.velocity = velocity;
    }

    fn ball_body(engine: &Engine<Breakout>) -> crate::engine::Body {
        let id = ball_id(engine);
        engine.host().world.get(id).unwrap().body().clone()
    }

    fn brick_at(engine: &Engine<Breakout>, pos: Vec2) -> Option<EntityId> {
        engine
            .host()
            .world
            .iter()
            .find(|(_, e)| e.kind() == EntityKind::Brick && e.body().pos == pos)
            .map(|(id, _)| id)
    }

    #[test]
    fn test_fresh_round_click_spawns_one_ball_at_center() {
        let mut engine = engine();
        assert_eq!(engine.game().phase(), RoundPhase::NoBall);

        engine.tick(pointer(19.0).with_press());
        assert_eq!(engine.game().phase(), RoundPhase::BallInPlay);
        assert_eq!(engine.host().world.count_kind(EntityKind::Ball), 1);
        assert_eq!(engine.game().score(), 0);

        // Spawned at the centre, then integrated once
        let ball = ball_body(&engine);
        assert!((ball.pos - (Vec2::new(19.0, 10.0) + BALL_START_VELOCITY)).length() < 1e-5);

        let sounds = engine.drain_sounds();
        assert_eq!(sounds.len(), 1);
        assert_eq!(sounds[0].effect, crate::audio::SoundEffect::Start);
    }

    #[test]
    fn test_ball_below_field_is_lost() {
        let mut engine = engine();
        engine.tick(pointer(19.0).with_press());
        stage_ball(&mut engine, Vec2::new(19.0, -1.5), Vec2::new(0.0, -0.1));

        engine.tick(pointer(19.0));
        assert_eq!(engine.game().phase(), RoundPhase::NoBall);
        assert_eq!(engine.game().score(), -BALL_LOST_PENALTY);
        assert_eq!(engine.host().world.count_kind(EntityKind::Ball), 0);
        // Destroyed ball is gone from the world, not just flagged
        assert_eq!(engine.host().world.len(), 126 + 1 + 3);
    }

    #[test]
    fn test_brick_hit_scores_and_reflects() {
        let mut engine = engine();
        engine.tick(pointer(19.0).with_press());
        let target = Vec2::new(10.0, 12.0);
        let brick = brick_at(&engine, target).expect("brick at (10,12)");

        // Just under the brick, moving straight up into it
        stage_ball(&mut engine, Vec2::new(10.0, 11.2), Vec2::new(0.0, 0.1));
        engine.tick(pointer(19.0));

        assert!(!engine.host().world.contains(brick));
        assert!(brick_at(&engine, target).is_none());
        assert_eq!(engine.game().score(), BRICK_POINTS);
        assert_eq!(engine.game().round.bricks_destroyed, 1);

        let ball = ball_body(&engine);
        assert!(ball.velocity.y < 0.0);
        assert!((ball.velocity.length() - 0.1 * BALL_SPEEDUP).abs() < 1e-6);
        // Burst queued
        assert!(!engine.host().particles.is_idle());
    }

    #[test]
    fn test_brick_never_scores_twice() {
        let mut engine = engine();
        engine.tick(pointer(19.0).with_press());
        stage_ball(&mut engine, Vec2::new(10.0, 11.2), Vec2::new(0.0, 0.1));
        engine.tick(pointer(19.0));
        assert_eq!(engine.game().score(), 1);

        // Back into the same spot: nothing left to hit there
        stage_ball(&mut engine, Vec2::new(10.0, 11.2), Vec2::new(0.0, 0.1));
        engine.tick(pointer(19.0));
        assert_eq!(engine.game().score(), 1);
    }

    #[test]
    fn test_dead_center_paddle_hit_launches_up() {
        let mut engine = engine();
        engine.tick(pointer(19.0).with_press());
        // Paddle already tracked to x=19 on the first tick
        stage_ball(&mut engine, Vec2::new(19.0, 1.45), Vec2::new(0.0, -0.1));
        engine.tick(pointer(19.0));

        let ball = ball_body(&engine);
        assert!(ball.velocity.x.abs() < 1e-6);
        assert!(ball.velocity.y >= PADDLE_MIN_LAUNCH);
        assert_eq!(engine.game().round.paddle_hits, 1);

        // Departing ball overlapping the paddle is not bounced again
        engine.tick(pointer(19.0));
        assert!(ball_body(&engine).velocity.y > 0.0);
        assert_eq!(engine.game().round.paddle_hits, 1);
    }

    #[test]
    fn test_walls_bounce_ball_back_into_field() {
        let mut engine = engine();
        engine.tick(pointer(19.0).with_press());
        stage_ball(&mut engine, Vec2::new(0.3, 5.0), Vec2::new(-0.1, 0.0));
        engine.tick(pointer(19.0));
        let ball = ball_body(&engine);
        assert!(ball.velocity.x > 0.0);
        assert!((ball.velocity.length() - 0.1 * BALL_SPEEDUP).abs() < 1e-6);
    }

    #[test]
    fn test_render_layers() {
        let mut engine = engine();
        engine.tick(pointer(19.0).with_press());
        let draw = engine.render();
        // backdrop + level + bricks + paddle + ball (walls are invisible)
        assert_eq!(draw.rects.len(), 2 + 126 + 1 + 1);
        assert_eq!(draw.texts.len(), 1);
        assert_eq!(draw.texts[0].text, "Score 0");
        assert_eq!(draw.texts[0].pos, Vec2::new(640.0, 70.0));
    }

    #[test]
    fn test_paddle_on_field_before_first_tick() {
        let engine = engine();
        let id = engine.game().paddle.expect("paddle spawned");
        let paddle = engine.host().world.get(id).unwrap().body();
        let half = PADDLE_SIZE.x / 2.0;
        assert!(paddle.pos.x >= half && paddle.pos.x <= LEVEL_SIZE.x - half);

        let rect = engine
            .render()
            .rects
            .into_iter()
            .find(|r| r.size == PADDLE_SIZE.to_array())
            .expect("paddle drawn");
        assert!(rect.center[0] - half >= 0.0);
    }

    #[test]
    fn test_score_overlay_can_be_hidden() {
        let settings = Settings {
            show_score: false,
            ..Settings::default()
        };
        let engine = Engine::new(Breakout::new(&settings), &settings);
        assert!(engine.render().texts.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// Random pointer play never breaks the round invariants
        #[test]
        fn prop_round_invariants_hold(
            seed in any::<u64>(),
            moves in proptest::collection::vec((0.0f32..38.0, any::<bool>()), 200..400),
        ) {
            let settings = Settings { seed, ..Settings::default() };
            let mut engine = Engine::new(Breakout::new(&settings), &settings);
            let half = PADDLE_SIZE.x / 2.0;

            for (x, press) in moves {
                let mut input = pointer(x);
                input.pressed = press;
                engine.tick(input);

                let host = engine.host();
                let round = &engine.game().round;
                prop_assert!(host.world.count_kind(EntityKind::Ball) <= 1);
                prop_assert_eq!(round.score, round.expected_score());

                let paddle = engine.game().paddle.and_then(|id| host.world.get(id)).unwrap();
                prop_assert!(paddle.body().pos.x >= half && paddle.body().pos.x <= LEVEL_SIZE.x - half);

                // Overlap push-apart may add a nudge on top of the cap
                if let Some((_, v)) = engine.game().ball_state(host) {
                    prop_assert!(v.length() <= BALL_MAX_SPEED + 0.01);
                }
            }
        }
    }
}
