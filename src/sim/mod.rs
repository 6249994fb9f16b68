//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacles;
pub mod particles;
pub mod physics;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use collision::{Rect, rects_collide};
pub use obstacles::{Obstacle, advance_obstacles};
pub use particles::{Particle, ParticleKind, Rgb, advance_particles, spawn_death_burst};
pub use scheduler::{FrameOutcome, FrameScheduler};
pub use state::{Action, GamePhase, GameState, Player};
pub use tick::{TickInput, autopilot_wants_jump, tick};
