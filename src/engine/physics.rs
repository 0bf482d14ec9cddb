//! Fixed-step physics: integration, overlap detection and the default response
//!
//! Static bodies (mass 0) never move and never look for contacts; only
//! dynamic bodies test themselves against everything else. Both parties'
//! hooks run on every overlap, and either can veto the default response.

use glam::Vec2;
use rand::Rng;

use super::body::{Body, EntityId, is_overlapping};
use super::world::{Collidable, HookContext, World};
use crate::consts::OBJECT_MAX_SPEED;

/// Gap left between resolved bodies so they do not re-overlap
pub const COLLISION_EPSILON: f32 = 0.001;
/// Velocity nudge applied to bodies that were already overlapping
pub const PUSH_AWAY_ACCEL: f32 = 0.001;

/// Counters from a single physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Overlapping pairs whose hooks ran
    pub contacts: u32,
    /// Pairs that received the default response
    pub resolved: u32,
}

/// Advance every entity by one tick
pub fn step<E, R>(world: &mut World<E>, cx: &mut HookContext<E::Event>, rng: &mut R) -> StepStats
where
    E: Collidable,
    R: Rng,
{
    let mut stats = StepStats::default();

    for slot in world.slots.iter_mut() {
        if !slot.entity.body().destroyed {
            slot.entity.update(cx);
        }
    }

    let ids: Vec<EntityId> = world.slots.iter().map(|s| s.id).collect();
    for i in 0..ids.len() {
        let body = world.slots[i].entity.body();
        if body.destroyed || body.is_static() {
            continue;
        }

        let old_pos = integrate(world.slots[i].entity.body_mut());
        if !world.slots[i].entity.body().collide {
            continue;
        }

        for j in 0..ids.len() {
            if i == j {
                continue;
            }
            let (mover, other) = world.pair_mut(i, j);
            if mover.body().destroyed {
                break;
            }
            if !other.body().is_live_collider() || !mover.body().overlaps(other.body()) {
                continue;
            }

            stats.contacts += 1;
            let other_contact = other.contact(ids[j]);
            let first = mover.on_collision(&other_contact, cx);
            let mover_contact = mover.contact(ids[i]);
            let second = other.on_collision(&mover_contact, cx);
            if !first.is_accepted() || !second.is_accepted() {
                continue;
            }

            stats.resolved += 1;
            resolve(mover.body_mut(), old_pos, other.body_mut(), rng);
        }
    }

    world.remove_destroyed();
    stats
}

/// Clamp, damp and move a dynamic body. Returns its previous position.
fn integrate(body: &mut Body) -> Vec2 {
    let old_pos = body.pos;
    body.velocity = body
        .velocity
        .clamp(Vec2::splat(-OBJECT_MAX_SPEED), Vec2::splat(OBJECT_MAX_SPEED));
    body.velocity *= body.damping;
    body.pos += body.velocity;
    old_pos
}

/// Default response of `a` (the mover) against `b`
fn resolve<R: Rng>(a: &mut Body, old_pos: Vec2, b: &mut Body, rng: &mut R) {
    if is_overlapping(old_pos, a.size, b.pos, b.size) {
        // Were already inside each other: separate gently instead of bouncing
        let delta = old_pos - b.pos;
        let length = delta.length();
        let push = if length < 0.01 {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            Vec2::from_angle(angle) * PUSH_AWAY_ACCEL
        } else {
            delta * (PUSH_AWAY_ACCEL / length)
        };
        a.velocity += push;
        if !b.is_static() {
            b.velocity -= push;
        }
        return;
    }

    let size_both = a.size + b.size;
    let blocked_x = (old_pos.y - b.pos.y).abs() * 2.0 < size_both.y;
    let blocked_y = (old_pos.x - b.pos.x).abs() * 2.0 < size_both.x;
    let restitution = a.restitution.max(b.restitution);

    if blocked_y || !blocked_x {
        a.pos.y = b.pos.y + (size_both.y / 2.0 + COLLISION_EPSILON) * sign(old_pos.y - b.pos.y);
        if b.is_static() {
            a.velocity.y *= -restitution;
        } else {
            let (va, vb) = exchange(a.mass, a.velocity.y, b.mass, b.velocity.y, restitution);
            a.velocity.y = va;
            b.velocity.y = vb;
        }
    }

    if blocked_x {
        a.pos.x = old_pos.x;
        if b.is_static() {
            a.velocity.x *= -restitution;
        } else {
            let (va, vb) = exchange(a.mass, a.velocity.x, b.mass, b.velocity.x, restitution);
            a.velocity.x = va;
            b.velocity.x = vb;
        }
    }
}

/// One-axis momentum exchange blended between inelastic and elastic
fn exchange(ma: f32, va: f32, mb: f32, vb: f32, restitution: f32) -> (f32, f32) {
    let m = ma + mb;
    let inelastic = (ma * va + mb * vb) / m;
    let elastic_a = va * (ma - mb) / m + vb * mb * 2.0 / m;
    let elastic_b = vb * (mb - ma) / m + va * ma * 2.0 / m;
    let t = restitution.clamp(0.0, 1.0);
    (
        inelastic + (elastic_a - inelastic) * t,
        inelastic + (elastic_b - inelastic) * t,
    )
}

#[inline]
fn sign(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}
