//! Entity storage and the capability trait every entity implements

use glam::Vec2;

use super::body::{Body, EntityId};
use super::particles::Emitter;
use crate::audio::SoundCue;

/// What the host should do after a collision hook runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResponse {
    /// Let the host apply its default elastic response
    AcceptDefaultResponse,
    /// The hook handled (or rejected) the contact; skip the default response
    SuppressDefaultResponse,
}

impl CollisionResponse {
    pub fn is_accepted(self) -> bool {
        self == CollisionResponse::AcceptDefaultResponse
    }
}

/// Snapshot of the other party in a collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact<K> {
    pub id: EntityId,
    pub kind: K,
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
}

/// Side effects collected from entity hooks during a tick
#[derive(Debug)]
pub struct HookContext<Ev> {
    /// Pointer position in world units
    pub pointer: Vec2,
    pub sounds: Vec<SoundCue>,
    pub emitters: Vec<Emitter>,
    /// Game-specific notifications, drained by the post-physics update
    pub events: Vec<Ev>,
}

impl<Ev> Default for HookContext<Ev> {
    fn default() -> Self {
        Self {
            pointer: Vec2::ZERO,
            sounds: Vec::new(),
            emitters: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl<Ev> HookContext<Ev> {
    pub fn play(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    pub fn emit(&mut self, emitter: Emitter) {
        self.emitters.push(emitter);
    }

    pub fn notify(&mut self, event: Ev) {
        self.events.push(event);
    }
}

/// Capability set of a world entity
pub trait Collidable {
    /// Variant tag handed to the other party's hook
    type Kind: Copy + PartialEq + std::fmt::Debug;
    /// Game notification type
    type Event;

    fn kind(&self) -> Self::Kind;
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Per-tick update, before physics integration
    fn update(&mut self, _cx: &mut HookContext<Self::Event>) {}

    /// Called once per overlapping pair per tick
    fn on_collision(
        &mut self,
        _other: &Contact<Self::Kind>,
        _cx: &mut HookContext<Self::Event>,
    ) -> CollisionResponse {
        CollisionResponse::AcceptDefaultResponse
    }

    fn contact(&self, id: EntityId) -> Contact<Self::Kind> {
        let body = self.body();
        Contact {
            id,
            kind: self.kind(),
            pos: body.pos,
            size: body.size,
            velocity: body.velocity,
        }
    }
}

/// An entity with its handle
#[derive(Debug, Clone)]
pub struct Slot<E> {
    pub id: EntityId,
    pub entity: E,
}

/// All live entities, in spawn order
#[derive(Debug, Clone)]
pub struct World<E> {
    pub(crate) slots: Vec<Slot<E>>,
    next_id: u32,
}

impl<E> Default for World<E> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
        }
    }
}

impl<E: Collidable> World<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: E) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot { id, entity });
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.slots.iter().find(|s| s.id == id).map(|s| &s.entity)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut E> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| &mut s.entity)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(|e| !e.body().destroyed)
    }

    /// Flag an entity for removal. Returns false if it was already gone.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(e) if !e.body().destroyed => {
                e.body_mut().destroyed = true;
                true
            }
            _ => false,
        }
    }

    /// Drop every entity flagged as destroyed
    pub fn remove_destroyed(&mut self) {
        self.slots.retain(|s| !s.entity.body().destroyed);
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &E)> {
        self.slots.iter().map(|s| (s.id, &s.entity))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn count_kind(&self, kind: E::Kind) -> usize {
        self.slots
            .iter()
            .filter(|s| s.entity.kind() == kind && !s.entity.body().destroyed)
            .count()
    }

    /// Mutable access to two distinct entities by index
    pub(crate) fn pair_mut(&mut self, i: usize, j: usize) -> (&mut E, &mut E) {
        debug_assert_ne!(i, j);
        if i < j {
            let (a, b) = self.slots.split_at_mut(j);
            (&mut a[i].entity, &mut b[0].entity)
        } else {
            let (a, b) = self.slots.split_at_mut(i);
            (&mut b[0].entity, &mut a[j].entity)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal entity used by the engine's own tests
    #[derive(Debug, Clone)]
    pub struct Crate {
        pub body: Body,
        pub response: CollisionResponse,
        pub hits: u32,
    }

    impl Crate {
        pub fn dynamic(pos: Vec2, size: Vec2, velocity: Vec2) -> Self {
            let mut body = Body::new(pos, size);
            body.collide = true;
            body.velocity = velocity;
            Self {
                body,
                response: CollisionResponse::AcceptDefaultResponse,
                hits: 0,
            }
        }

        pub fn fixed(pos: Vec2, size: Vec2) -> Self {
            Self {
                body: Body::fixed(pos, size),
                response: CollisionResponse::AcceptDefaultResponse,
                hits: 0,
            }
        }
    }

    impl Collidable for Crate {
        type Kind = ();
        type Event = EntityId;

        fn kind(&self) {}

        fn body(&self) -> &Body {
            &self.body
        }

        fn body_mut(&mut self) -> &mut Body {
            &mut self.body
        }

        fn on_collision(
            &mut self,
            other: &Contact<()>,
            cx: &mut HookContext<EntityId>,
        ) -> CollisionResponse {
            self.hits += 1;
            cx.notify(other.id);
            self.response
        }
    }

    #[test]
    fn test_spawn_assigns_increasing_ids() {
        let mut world = World::new();
        let a = world.spawn(Crate::fixed(Vec2::ZERO, Vec2::ONE));
        let b = world.spawn(Crate::fixed(Vec2::ONE, Vec2::ONE));
        assert!(a < b);
        assert_eq!(world.len(), 2);
        assert_eq!(world.count_kind(()), 2);
    }

    #[test]
    fn test_destroy_is_one_shot() {
        let mut world = World::new();
        let id = world.spawn(Crate::fixed(Vec2::ZERO, Vec2::ONE));
        assert!(world.destroy(id));
        assert!(!world.destroy(id));
        assert!(!world.contains(id));
        world.remove_destroyed();
        assert!(world.get(id).is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut world = World::new();
        world.spawn(Crate::fixed(Vec2::ZERO, Vec2::ONE));
        world.spawn(Crate::fixed(Vec2::X, Vec2::ONE));
        let (a, b) = world.pair_mut(1, 0);
        assert_eq!(a.body.pos, Vec2::X);
        assert_eq!(b.body.pos, Vec2::ZERO);
    }
}
