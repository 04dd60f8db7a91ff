//! Fixed-capacity particle trail
//!
//! Particles are allocated once and respawned in place. A cursor remembers
//! the last reused slot so that finding a dead particle is usually O(1).

use glam::{Vec2, Vec4};
use rand::Rng;

use super::ball::Ball;

/// Default pool size
pub const MAX_PARTICLES: usize = 2000;

/// Seconds a freshly spawned particle lives
pub const PARTICLE_LIFE: f32 = 1.0;

/// Opacity lost per second
const FADE_RATE: f32 = 2.5;

/// Fraction of the emitter velocity a particle inherits
const VELOCITY_SCALE: f32 = 0.1;

/// A single trail particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Vec4,
    /// Seconds remaining; at or below zero the particle is inert
    pub life: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Vec4::ONE,
            life: 0.0,
        }
    }
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Whatever the trail follows
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl From<&Ball> for Emitter {
    fn from(ball: &Ball) -> Self {
        Self {
            pos: ball.pos,
            vel: ball.vel,
        }
    }
}

/// Ring of reusable particles
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    last_used: usize,
}

impl ParticlePool {
    /// Allocate `capacity` inert particles. A zero capacity is bumped to one
    /// so there is always a slot to evict.
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: vec![Particle::default(); capacity.max(1)],
            last_used: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Live particles, in slot order
    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    /// Index of the slot last handed out
    pub fn last_used(&self) -> usize {
        self.last_used
    }

    /// Find a dead slot, starting at the cursor and wrapping once. When the
    /// pool is exhausted slot 0 is evicted.
    pub fn find_reusable_slot(&mut self) -> usize {
        let slot = (self.last_used..self.particles.len())
            .chain(0..self.last_used)
            .find(|&i| !self.particles[i].is_alive())
            .unwrap_or(0);
        self.last_used = slot;
        slot
    }

    /// Spawn `spawn_count` particles at the emitter, then age everything
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        emitter: Emitter,
        spawn_count: usize,
        offset: Vec2,
        rng: &mut R,
    ) {
        for _ in 0..spawn_count {
            let slot = self.find_reusable_slot();
            respawn(&mut self.particles[slot], emitter, offset, rng);
        }

        for p in &mut self.particles {
            p.life -= dt;
            if p.is_alive() {
                p.pos -= p.vel * dt;
                p.color.w -= dt * FADE_RATE;
            }
        }
    }

    /// Kill every particle and rewind the cursor
    pub fn clear(&mut self) {
        self.particles.fill(Particle::default());
        self.last_used = 0;
    }
}

fn respawn<R: Rng>(p: &mut Particle, emitter: Emitter, offset: Vec2, rng: &mut R) {
    let jitter = rng.random_range(-50i32..50) as f32 / 10.0;
    let gray = 0.5 + rng.random_range(0i32..100) as f32 / 100.0;
    p.pos = emitter.pos + Vec2::splat(jitter) + offset;
    p.color = Vec4::new(gray, gray, gray, 1.0);
    p.life = PARTICLE_LIFE;
    p.vel = emitter.vel * VELOCITY_SCALE;
}
