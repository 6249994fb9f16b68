//! Game state and core simulation types
//!
//! Everything a session needs lives in `GameState`, so a frame can be stepped
//! (and a snapshot serialized) without touching the host.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::obstacles::{Obstacle, advance_obstacles};
use super::particles::{Particle, advance_particles, spawn_death_burst};
use super::physics::{self, Vertical};
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, waiting for the start action
    Menu,
    /// Active gameplay
    Playing,
    /// Player died, waiting for the discount prompt
    GameOver,
    /// Discount prompt shown over the game-over screen
    Discount,
}

/// UI-driven state machine transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    StartGame,
    Restart,
    CloseDiscount,
    Pause,
}

/// The player's box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_grounded(&self) -> bool {
        physics::is_grounded(self.pos.y, self.size.y)
    }

    fn vertical(&self) -> Vertical {
        Vertical {
            y: self.pos.y,
            vel_y: self.vel_y,
        }
    }

    /// Apply a jump if standing on the ground. Returns whether it took effect.
    pub fn jump(&mut self) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vel_y = physics::jump_velocity(self.vertical(), self.size.y);
        true
    }

    /// One frame of gravity with ground clamping
    pub fn integrate(&mut self) {
        let next = physics::integrate(self.vertical(), self.size.y);
        self.pos.y = next.y;
        self.vel_y = next.vel_y;
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG for obstacle speeds and particles
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// The player
    pub player: Player,
    /// Live obstacles in spawn order (oldest first)
    pub obstacles: Vec<Obstacle>,
    /// Death-burst particles
    pub particles: Vec<Particle>,
    /// Frames survived this session
    pub score: u64,
    /// Simulated frames this session
    pub time_ticks: u64,
    /// Death flash countdown (frames)
    pub death_ticks: u32,
    /// Screen shake countdown (frames)
    pub shake_ticks: u32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state at the menu with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            player: Player::default(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            time_ticks: 0,
            death_ticks: 0,
            shake_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score / SCORE_DIVISOR
    }

    /// Whether death flash, shake or particles still need frames
    pub fn effects_active(&self) -> bool {
        self.death_ticks > 0 || self.shake_ticks > 0 || !self.particles.is_empty()
    }

    /// Reset the session (pose, obstacles, particles, countdowns, score).
    /// The RNG keeps running so consecutive sessions differ.
    fn reset_session(&mut self) {
        self.player = Player::default();
        self.obstacles.clear();
        self.particles.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.death_ticks = 0;
        self.shake_ticks = 0;
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Menu -> Playing with a fresh session
    pub fn start_game(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("Ignoring start in {:?}", self.phase);
            return false;
        }
        self.reset_session();
        self.set_phase(GamePhase::Playing);
        true
    }

    /// GameOver/Discount -> Playing with a fresh session
    pub fn restart_game(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::GameOver | GamePhase::Discount) {
            log::debug!("Ignoring restart in {:?}", self.phase);
            return false;
        }
        self.reset_session();
        self.set_phase(GamePhase::Playing);
        true
    }

    /// Discount -> Menu
    pub fn close_discount(&mut self) -> bool {
        if self.phase != GamePhase::Discount {
            log::debug!("Ignoring close-discount in {:?}", self.phase);
            return false;
        }
        self.set_phase(GamePhase::Menu);
        true
    }

    /// Playing -> Menu. Not resumable: the next start is a new session.
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            log::debug!("Ignoring pause in {:?}", self.phase);
            return false;
        }
        self.set_phase(GamePhase::Menu);
        true
    }

    /// GameOver -> Discount (driven by the scheduler's wall-clock delay)
    pub fn show_discount(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.set_phase(GamePhase::Discount);
        true
    }

    /// Dispatch a UI action
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::StartGame => self.start_game(),
            Action::Restart => self.restart_game(),
            Action::CloseDiscount => self.close_discount(),
            Action::Pause => self.pause(),
        }
    }

    /// Jump request. Only honored while playing and grounded.
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.player.jump()
    }

    /// Spawn the death burst and end the run.
    ///
    /// A second call in the same frame is a no-op since the phase has
    /// already left `Playing`.
    pub fn trigger_death(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let burst = spawn_death_burst(&mut self.rng, self.player.pos);
        self.particles.extend(burst);
        self.death_ticks = DEATH_ANIMATION_FRAMES;
        self.shake_ticks = SCREEN_SHAKE_FRAMES;
        log::info!(
            "Player died at ({:.1}, {:.1}) with score {}",
            self.player.pos.x,
            self.player.pos.y,
            self.display_score()
        );
        self.set_phase(GamePhase::GameOver);
        true
    }

    /// Scroll, cull and spawn obstacles for one frame
    pub fn scroll_obstacles(&mut self) -> Option<u32> {
        let next_id = &mut self.next_id;
        advance_obstacles(&mut self.obstacles, &mut self.rng, || {
            let id = *next_id;
            *next_id += 1;
            id
        })
    }

    /// Advance particles and decrement the death/shake countdowns
    pub fn decay_effects(&mut self) {
        advance_particles(&mut self.particles);
        self.death_ticks = self.death_ticks.saturating_sub(1);
        self.shake_ticks = self.shake_ticks.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_at_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.player.pos, Vec2::new(100.0, 200.0));
        assert_eq!(state.player.size, Vec2::new(40.0, 40.0));
        assert!(state.obstacles.is_empty());
        assert!(!state.effects_active());
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = GameState::new(1);
        assert!(!state.restart_game());
        assert!(!state.pause());
        assert!(!state.close_discount());

        assert!(state.apply(Action::StartGame));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.start_game());

        assert!(state.apply(Action::Pause));
        assert_eq!(state.phase, GamePhase::Menu);

        assert!(state.start_game());
        assert!(state.trigger_death());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.close_discount());

        assert!(state.show_discount());
        assert_eq!(state.phase, GamePhase::Discount);
        assert!(!state.show_discount());

        assert!(state.apply(Action::CloseDiscount));
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = GameState::new(9);
        state.start_game();
        state.score = 1234;
        state.player.pos.y = 310.0;
        state.player.vel_y = -3.0;
        let id = state.next_entity_id();
        let obstacle = Obstacle::spawn(id, &mut state.rng);
        state.obstacles.push(obstacle);
        state.trigger_death();
        assert!(state.effects_active());

        assert!(state.restart_game());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, Vec2::new(100.0, 200.0));
        assert_eq!(state.player.vel_y, 0.0);
        assert!(state.obstacles.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.death_ticks, 0);
        assert_eq!(state.shake_ticks, 0);
    }

    #[test]
    fn test_death_arms_countdowns_once() {
        let mut state = GameState::new(4);
        state.start_game();
        assert!(state.trigger_death());
        assert_eq!(state.particles.len(), 43);
        assert_eq!(state.death_ticks, 60);
        assert_eq!(state.shake_ticks, 30);

        // Redundant hit in the same frame
        assert!(!state.trigger_death());
        assert_eq!(state.particles.len(), 43);
    }

    #[test]
    fn test_jump_requires_ground_and_playing() {
        let mut state = GameState::new(2);
        state.player.pos.y = 310.0;
        assert!(!state.jump(), "menu ignores jumps");

        state.start_game();
        // Start pose is mid-air
        assert!(!state.jump());
        assert_eq!(state.player.vel_y, 0.0);

        state.player.pos.y = 310.0;
        assert!(state.jump());
        assert_eq!(state.player.vel_y, JUMP_FORCE);
    }

    #[test]
    fn test_decay_saturates_at_zero() {
        let mut state = GameState::new(3);
        state.start_game();
        state.trigger_death();
        for _ in 0..200 {
            state.decay_effects();
        }
        assert_eq!(state.death_ticks, 0);
        assert_eq!(state.shake_ticks, 0);
        assert!(state.particles.is_empty());
        assert!(!state.effects_active());
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let mut state = GameState::new(8);
        state.start_game();
        state.trigger_death();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.phase, GamePhase::GameOver);
        assert_eq!(restored.particles.len(), state.particles.len());
        assert_eq!(restored.next_id, state.next_id);
    }
}
