//! Host runtime
//!
//! Owns the world, camera, input, particles and RNG, and drives a `Game`
//! through its five lifecycle hooks at a fixed 60 Hz:
//! `update` → object updates + physics + collision hooks → `update_post`,
//! then once per frame `render` → objects and particles → `render_post`.

pub mod body;
pub mod camera;
pub mod color;
pub mod input;
pub mod particles;
pub mod physics;
pub mod world;

pub use body::{Body, EntityId};
pub use camera::Camera;
pub use color::Color;
pub use input::{InputState, Pointer};
pub use particles::{Emitter, EmitterConfig, ParticleSystem};
pub use physics::StepStats;
pub use world::{Collidable, CollisionResponse, Contact, HookContext, World};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::SoundCue;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::renderer::DrawList;
use crate::settings::Settings;

/// Undrained sound cues kept by the engine; older cues are dropped first
pub const SOUND_QUEUE_LIMIT: usize = 64;

/// Game callbacks invoked by the engine
pub trait Game {
    type Entity: Collidable;

    /// Once, before the first tick
    fn init(&mut self, host: &mut Host<Self::Entity>);

    /// Every tick, before objects update and physics runs
    fn update(&mut self, host: &mut Host<Self::Entity>);

    /// Every tick, after physics and collision hooks
    fn update_post(&mut self, _host: &mut Host<Self::Entity>) {}

    /// Every frame, before objects are drawn
    fn render(&self, _host: &Host<Self::Entity>, _draw: &mut DrawList) {}

    /// Every frame, after objects are drawn (HUD)
    fn render_post(&self, _host: &Host<Self::Entity>, _draw: &mut DrawList) {}
}

/// Engine-owned state the game works against
pub struct Host<E: Collidable> {
    pub world: World<E>,
    pub camera: Camera,
    /// Input for the tick being processed
    pub input: InputState,
    /// Side effects queued by hooks and game code this tick
    pub hooks: HookContext<E::Event>,
    pub particles: ParticleSystem,
    pub rng: Pcg32,
    /// Ticks processed so far
    pub tick: u64,
    /// Contact counters from the latest physics step
    pub last_step: StepStats,
}

impl<E: Collidable> Host<E> {
    pub fn new(seed: u64, particle_budget: usize) -> Self {
        Self {
            world: World::new(),
            camera: Camera::default(),
            input: InputState::default(),
            hooks: HookContext::default(),
            particles: ParticleSystem::new(particle_budget),
            rng: Pcg32::seed_from_u64(seed),
            tick: 0,
            last_step: StepStats::default(),
        }
    }

    /// Pointer position in world units
    pub fn pointer(&self) -> Vec2 {
        self.input.pointer_world(&self.camera)
    }

    /// Primary button went down this tick
    pub fn pressed(&self) -> bool {
        self.input.pressed
    }

    pub fn play(&mut self, cue: SoundCue) {
        self.hooks.play(cue);
    }

    pub fn emit(&mut self, emitter: Emitter) {
        self.hooks.emit(emitter);
    }

    /// Take the game notifications raised by hooks this tick
    pub fn take_events(&mut self) -> Vec<E::Event> {
        std::mem::take(&mut self.hooks.events)
    }
}

/// Fixed-step driver around a `Game`
pub struct Engine<G: Game> {
    game: G,
    host: Host<G::Entity>,
    accumulator: f32,
    /// Press seen by `advance` but not yet consumed by a tick
    pending_press: bool,
    sounds: Vec<SoundCue>,
}

impl<G: Game> Engine<G> {
    /// Build the host from settings and run the game's `init` hook
    pub fn new(mut game: G, settings: &Settings) -> Self {
        let mut host = Host::new(settings.seed, settings.max_particles());
        game.init(&mut host);
        log::info!("Engine started: {} entities, seed {}", host.world.len(), settings.seed);
        Self {
            game,
            host,
            accumulator: 0.0,
            pending_press: false,
            sounds: Vec::new(),
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn host(&self) -> &Host<G::Entity> {
        &self.host
    }

    /// Mutable access for tools and tests that stage a scenario
    pub fn parts_mut(&mut self) -> (&mut G, &mut Host<G::Entity>) {
        (&mut self.game, &mut self.host)
    }

    /// Run exactly one fixed update
    pub fn tick(&mut self, input: InputState) {
        let host = &mut self.host;
        host.input = input;
        host.hooks.pointer = host.pointer();

        self.game.update(host);
        host.last_step = physics::step(&mut host.world, &mut host.hooks, &mut host.rng);
        self.game.update_post(host);

        for emitter in host.hooks.emitters.drain(..) {
            host.particles.add(emitter);
        }
        host.particles.update(&mut host.rng);
        self.sounds.append(&mut host.hooks.sounds);
        if self.sounds.len() > SOUND_QUEUE_LIMIT {
            let excess = self.sounds.len() - SOUND_QUEUE_LIMIT;
            self.sounds.drain(..excess);
        }
        host.tick += 1;
    }

    /// Feed a frame's wall-clock delta; runs as many fixed ticks as are due.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, dt: f32, input: InputState) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        self.pending_press |= input.pressed;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let tick_input = InputState {
                pressed: std::mem::take(&mut self.pending_press),
                ..input
            };
            self.tick(tick_input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Build this frame's draw list
    pub fn render(&self) -> DrawList {
        let mut draw = DrawList::new();
        self.game.render(&self.host, &mut draw);

        for (_, entity) in self.host.world.iter() {
            let body = entity.body();
            if !body.destroyed {
                draw.rect(body.pos, body.size, body.color);
            }
        }
        for particle in &self.host.particles.particles {
            let size = Vec2::splat(particle.size());
            if particle.additive {
                draw.additive_rect(particle.pos, size, particle.color());
            } else {
                draw.rect(particle.pos, size, particle.color());
            }
        }

        self.game.render_post(&self.host, &mut draw);
        draw
    }

    /// Sound cues queued since the last call, at most `SOUND_QUEUE_LIMIT`
    /// of the newest. Call once per frame.
    pub fn drain_sounds(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sounds)
    }
}
