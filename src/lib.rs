//! Jump & Survive - a side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, particles)
//! - `renderer`: Projection of game state into canvas draw commands
//! - `input`: Keyboard tracking and command mapping
//! - `settings`: Visual preferences and run seed

pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Drawable surface dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Top edge of the ground strip
    pub const GROUND_Y: f32 = 350.0;
    /// Downward acceleration (units/frame²)
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_FORCE: f32 = -12.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 200.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 60.0;
    pub const OBSTACLE_MIN_SPEED: f32 = 5.0;
    pub const OBSTACLE_MAX_SPEED: f32 = 8.0;
    /// New obstacle only once the last one has moved this far from the right edge
    pub const OBSTACLE_SPAWN_SPACING: f32 = 300.0;
    /// Obstacles are culled once their right edge passes -CULL_MARGIN
    pub const OBSTACLE_CULL_MARGIN: f32 = 50.0;

    /// Particle physics
    pub const PARTICLE_GRAVITY: f32 = 0.5;
    pub const PARTICLE_DRAG: f32 = 0.98;

    /// Death burst composition
    pub const BLOOD_COUNT: usize = 15;
    pub const BONE_COUNT: usize = 8;
    pub const EXPLOSION_COUNT: usize = 20;
    pub const BLOOD_LIFE: u32 = 60;
    pub const BONE_LIFE: u32 = 120;
    pub const EXPLOSION_LIFE: u32 = 40;

    /// Post-death countdowns (frames)
    pub const DEATH_ANIMATION_FRAMES: u32 = 60;
    pub const SCREEN_SHAKE_FRAMES: u32 = 30;

    /// Wall-clock delay between game over and the discount prompt
    pub const DISCOUNT_DELAY_MS: f64 = 2000.0;

    /// Score is displayed at this fraction of simulated frames
    pub const SCORE_DIVISOR: u64 = 10;
}
