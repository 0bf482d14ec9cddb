//! Physical bodies shared by every entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Color;

/// Stable handle to an entity in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned rigid body
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Centre position
    pub pos: Vec2,
    /// Full extents
    pub size: Vec2,
    /// Units per tick
    pub velocity: Vec2,
    /// 0 = static (immovable, never integrated)
    pub mass: f32,
    /// Bounce energy retention, combined as max() of the pair
    pub restitution: f32,
    /// Per-tick velocity multiplier
    pub damping: f32,
    /// Takes part in overlap tests
    pub collide: bool,
    pub color: Color,
    /// Flagged for removal; skipped by collision from now on
    pub destroyed: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            velocity: Vec2::ZERO,
            mass: 1.0,
            restitution: 0.0,
            damping: 1.0,
            collide: false,
            color: Color::WHITE,
            destroyed: false,
        }
    }

    /// Static collidable body
    pub fn fixed(pos: Vec2, size: Vec2) -> Self {
        Self {
            mass: 0.0,
            collide: true,
            ..Self::new(pos, size)
        }
    }

    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }

    /// Eligible for overlap tests this tick
    pub fn is_live_collider(&self) -> bool {
        self.collide && !self.destroyed
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        is_overlapping(self.pos, self.size, other.pos, other.size)
    }
}

/// Strict AABB overlap of two centred boxes (touching edges do not overlap)
#[inline]
pub fn is_overlapping(pos_a: Vec2, size_a: Vec2, pos_b: Vec2, size_b: Vec2) -> bool {
    (pos_a.x - pos_b.x).abs() * 2.0 < size_a.x + size_b.x
        && (pos_a.y - pos_b.y).abs() * 2.0 < size_a.y + size_b.y
}
