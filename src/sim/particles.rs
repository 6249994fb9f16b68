//! Death-burst particles
//!
//! Purely decorative: particles never feed back into gameplay, but they are
//! simulated with the same seeded RNG so a replay looks identical.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Particle category (drives shape and color at render time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Blood,
    Bone,
    Explosion,
}

impl ParticleKind {
    /// Frames a freshly spawned particle of this kind lives
    pub fn life(self) -> u32 {
        match self {
            ParticleKind::Blood => BLOOD_LIFE,
            ParticleKind::Bone => BONE_LIFE,
            ParticleKind::Explosion => EXPLOSION_LIFE,
        }
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames remaining
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    /// Remaining life as a fraction in (0, 1], used as render opacity
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }

    /// One frame of gravity, drag and motion
    pub fn step(&mut self) {
        self.vel.y += PARTICLE_GRAVITY;
        self.vel.x *= PARTICLE_DRAG;
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

fn particle(
    kind: ParticleKind,
    origin: Vec2,
    vel: Vec2,
    size: f32,
    color: Rgb,
) -> Particle {
    let life = kind.life();
    Particle {
        kind,
        pos: origin,
        vel,
        life,
        max_life: life,
        size,
        color,
    }
}

fn blood(rng: &mut impl Rng, origin: Vec2) -> Particle {
    let vel = Vec2::new(rng.random_range(-10.0..=10.0), rng.random_range(-20.0..=-5.0));
    let size = rng.random_range(4.0..=12.0);
    let color = Rgb::new(
        rng.random_range(150..=255),
        rng.random_range(0..=30),
        rng.random_range(0..=30),
    );
    particle(ParticleKind::Blood, origin, vel, size, color)
}

fn bone(rng: &mut impl Rng, origin: Vec2) -> Particle {
    let vel = Vec2::new(rng.random_range(-7.5..=7.5), rng.random_range(-15.0..=-3.0));
    let size = rng.random_range(6.0..=12.0);
    particle(ParticleKind::Bone, origin, vel, size, Rgb::WHITE)
}

fn explosion(rng: &mut impl Rng, origin: Vec2) -> Particle {
    let vel = Vec2::new(
        rng.random_range(-12.5..=12.5),
        rng.random_range(-12.5..=12.5),
    );
    let size = rng.random_range(2.0..=6.0);
    let color = Rgb::new(255, rng.random_range(100..=200), rng.random_range(0..=50));
    particle(ParticleKind::Explosion, origin, vel, size, color)
}

/// Spawn the full death burst for a player whose top-left corner is `player_pos`
///
/// Particles originate at the player's body center, blood first, then bones,
/// then the explosion.
pub fn spawn_death_burst(rng: &mut impl Rng, player_pos: Vec2) -> Vec<Particle> {
    let origin = player_pos + Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT) * 0.5;
    let mut burst = Vec::with_capacity(BLOOD_COUNT + BONE_COUNT + EXPLOSION_COUNT);
    burst.extend((0..BLOOD_COUNT).map(|_| blood(rng, origin)));
    burst.extend((0..BONE_COUNT).map(|_| bone(rng, origin)));
    burst.extend((0..EXPLOSION_COUNT).map(|_| explosion(rng, origin)));
    burst
}

/// Advance every particle one frame and drop the expired ones
pub fn advance_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.step();
    }
    particles.retain(Particle::is_alive);
}
