//! Cosmetic particle bursts
//!
//! Particles never collide and never affect gameplay. They are simulated
//! with the world's seeded RNG so replays stay identical.

use glam::Vec2;
use rand::Rng;

use super::color::Color;
use crate::consts::SIM_DT;
use crate::rotate_cw;

/// Shape of a burst
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    /// Spawn area (box) around the emitter position
    pub emit_size: Vec2,
    /// Seconds the emitter keeps spawning
    pub emit_time: f32,
    /// Particles per second
    pub emit_rate: f32,
    /// Half-angle of the spawn direction cone (radians)
    pub cone_angle: f32,
    pub color_start: Color,
    pub color_end: Color,
    /// Seconds each particle lives
    pub particle_time: f32,
    pub size_start: f32,
    pub size_end: f32,
    /// Units per tick
    pub speed: f32,
    /// Per-tick velocity multiplier
    pub damping: f32,
    /// Fraction of the lifetime spent fading in and out
    pub fade_rate: f32,
    /// Relative jitter applied to size, speed and lifetime
    pub randomness: f32,
    /// Draw with additive blending
    pub additive: bool,
}

/// A burst source placed in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Emitter {
    pub pos: Vec2,
    /// Centre direction of the cone (clockwise radians from +y)
    pub angle: f32,
    pub config: EmitterConfig,
    /// Seconds spent emitting so far
    elapsed: f32,
    /// Fractional particle carry between ticks
    accumulator: f32,
}

impl Emitter {
    pub fn new(pos: Vec2, angle: f32, config: EmitterConfig) -> Self {
        Self {
            pos,
            angle,
            config,
            elapsed: 0.0,
            accumulator: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.config.emit_time
    }

    /// Spawn this tick's share of particles
    fn emit<R: Rng>(&mut self, rng: &mut R, out: &mut Vec<Particle>, budget: usize) {
        if self.is_finished() {
            return;
        }
        self.elapsed += SIM_DT;
        self.accumulator += self.config.emit_rate * SIM_DT;
        while self.accumulator >= 1.0 {
            self.accumulator -= 1.0;
            if out.len() >= budget {
                continue;
            }
            out.push(self.spawn_particle(rng));
        }
    }

    fn spawn_particle<R: Rng>(&self, rng: &mut R) -> Particle {
        let c = &self.config;
        let jitter = |rng: &mut R| 1.0 + rng.random_range(-c.randomness..=c.randomness);

        let offset = Vec2::new(
            rng.random_range(-0.5..=0.5) * c.emit_size.x,
            rng.random_range(-0.5..=0.5) * c.emit_size.y,
        );
        let angle = self.angle + rng.random_range(-c.cone_angle..=c.cone_angle);
        let speed = c.speed * jitter(rng);
        let velocity = rotate_cw(Vec2::new(0.0, speed), angle);

        Particle {
            pos: self.pos + offset,
            velocity,
            color_start: c.color_start,
            color_end: c.color_end,
            size_start: c.size_start * jitter(rng),
            size_end: c.size_end * jitter(rng),
            lifetime: (c.particle_time * jitter(rng)).max(SIM_DT),
            age: 0.0,
            damping: c.damping,
            fade_rate: c.fade_rate,
            additive: c.additive,
        }
    }
}

/// A single visual particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub color_start: Color,
    pub color_end: Color,
    pub size_start: f32,
    pub size_end: f32,
    pub lifetime: f32,
    pub age: f32,
    pub damping: f32,
    pub fade_rate: f32,
    pub additive: bool,
}

impl Particle {
    /// Life progress, 0 at spawn and 1 at death
    pub fn progress(&self) -> f32 {
        (self.age / self.lifetime).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }

    pub fn size(&self) -> f32 {
        let p = self.progress();
        self.size_start + (self.size_end - self.size_start) * p
    }

    /// Interpolated colour with fade-in/fade-out applied to alpha
    pub fn color(&self) -> Color {
        let p = self.progress();
        let mut color = self.color_start.lerp(self.color_end, p);
        let fade = self.fade_rate / 2.0;
        if fade > 0.0 {
            if p < fade {
                color.a *= p / fade;
            } else if p > 1.0 - fade {
                color.a *= (1.0 - p) / fade;
            }
        }
        color
    }

    fn update(&mut self) {
        self.pos += self.velocity;
        self.velocity *= self.damping;
        self.age += SIM_DT;
    }
}

/// All live emitters and particles
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    pub emitters: Vec<Emitter>,
    pub particles: Vec<Particle>,
    /// Maximum live particles (0 disables particles entirely)
    pub budget: usize,
}

impl ParticleSystem {
    pub fn new(budget: usize) -> Self {
        Self {
            emitters: Vec::new(),
            particles: Vec::new(),
            budget,
        }
    }

    pub fn add(&mut self, emitter: Emitter) {
        if self.budget > 0 {
            self.emitters.push(emitter);
        }
    }

    /// Advance one tick: age particles, then let emitters spawn
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(Particle::is_alive);

        for emitter in &mut self.emitters {
            emitter.emit(rng, &mut self.particles, self.budget);
        }
        self.emitters.retain(|e| !e.is_finished());
    }

    pub fn is_idle(&self) -> bool {
        self.emitters.is_empty() && self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn burst_config() -> EmitterConfig {
        EmitterConfig {
            emit_size: Vec2::new(2.0, 1.0),
            emit_time: 0.1,
            emit_rate: 200.0,
            cone_angle: std::f32::consts::PI,
            color_start: Color::rgb(1.0, 0.5, 0.0),
            color_end: Color::rgb(1.0, 0.5, 0.0).scale(1.0, 0.0),
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

    #[test]
    fn test_burst_emits_then_dies_out() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::new(1000);
        system.add(Emitter::new(Vec2::new(10.0, 12.0), 0.0, burst_config()));

        let mut peak = 0;
        for _ in 0..120 {
            system.update(&mut rng);
            peak = peak.max(system.particles.len());
        }
        // 200/s for 0.1s is about 20 particles, some die before the last spawn
        assert!((10..=24).contains(&peak), "peak was {peak}");
        assert!(system.is_idle());
    }

    #[test]
    fn test_budget_caps_particles() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::new(5);
        system.add(Emitter::new(Vec2::ZERO, 0.0, burst_config()));
        for _ in 0..6 {
            system.update(&mut rng);
            assert!(system.particles.len() <= 5);
        }
    }

    #[test]
    fn test_zero_budget_disables_particles() {
        let mut system = ParticleSystem::new(0);
        system.add(Emitter::new(Vec2::ZERO, 0.0, burst_config()));
        assert!(system.is_idle());
    }

    #[test]
    fn test_particle_fades_to_end_color() {
        let p = Particle {
            pos: Vec2::ZERO,
            velocity: Vec2::ZERO,
            color_start: Color::WHITE,
            color_end: Color::WHITE.with_alpha(0.0),
            size_start: 0.5,
            size_end: 1.0,
            lifetime: 1.0,
            age: 0.5,
            damping: 1.0,
            fade_rate: 0.0,
            additive: false,
        };
        assert!((p.color().a - 0.5).abs() < 1e-6);
        assert!((p.size() - 0.75).abs() < 1e-6);
    }
}
