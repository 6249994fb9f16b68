//! Frame scheduling
//!
//! The host calls [`FrameScheduler::on_frame`] once per display refresh with
//! a wall-clock timestamp. The scheduler decides what that frame does:
//! - `Playing`: one full simulation tick
//! - `GameOver`: cosmetic decay only, plus the countdown to the discount prompt
//! - otherwise: cosmetic decay while effects remain, then idle
//!
//! When [`FrameScheduler::wants_frame`] returns false the host stops
//! requesting frames until a UI action makes the game active again.

use super::state::{GamePhase, GameState};
use super::tick::{TickInput, tick};
use crate::consts::DISCOUNT_DELAY_MS;

/// What a single host frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Ran a simulation tick
    Simulated,
    /// Advanced particles/countdowns only
    Decayed,
    /// Nothing to do
    Idle,
}

/// Drives `tick` from host frame callbacks
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    last_frame_ms: Option<f64>,
    game_over_elapsed_ms: f64,
    discount_delay_ms: f64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(DISCOUNT_DELAY_MS)
    }
}

impl FrameScheduler {
    pub fn new(discount_delay_ms: f64) -> Self {
        Self {
            last_frame_ms: None,
            game_over_elapsed_ms: 0.0,
            discount_delay_ms,
        }
    }

    /// Forget the previous timestamp (call when the host restarts its loop)
    pub fn resume(&mut self) {
        self.last_frame_ms = None;
    }

    /// Whether the host should keep requesting frames
    pub fn wants_frame(&self, state: &GameState) -> bool {
        matches!(state.phase, GamePhase::Playing | GamePhase::GameOver) || state.effects_active()
    }

    /// Milliseconds spent in `GameOver` so far
    pub fn game_over_elapsed_ms(&self) -> f64 {
        self.game_over_elapsed_ms
    }

    /// Handle one host frame at wall-clock time `now_ms`
    pub fn on_frame(&mut self, state: &mut GameState, input: &TickInput, now_ms: f64) -> FrameOutcome {
        let dt_ms = self
            .last_frame_ms
            .map(|last| (now_ms - last).max(0.0))
            .unwrap_or(0.0);
        self.last_frame_ms = Some(now_ms);

        if state.phase != GamePhase::GameOver {
            self.game_over_elapsed_ms = 0.0;
        }

        match state.phase {
            GamePhase::Playing => {
                tick(state, input);
                FrameOutcome::Simulated
            }
            GamePhase::GameOver => {
                state.decay_effects();
                self.game_over_elapsed_ms += dt_ms;
                if self.game_over_elapsed_ms >= self.discount_delay_ms {
                    state.show_discount();
                    self.game_over_elapsed_ms = 0.0;
                }
                FrameOutcome::Decayed
            }
            GamePhase::Menu | GamePhase::Discount => {
                if state.effects_active() {
                    state.decay_effects();
                    FrameOutcome::Decayed
                } else {
                    FrameOutcome::Idle
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::particles::ParticleKind;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[test]
    fn test_menu_is_idle() {
        let mut scheduler = FrameScheduler::default();
        let mut state = GameState::new(1);
        assert!(!scheduler.wants_frame(&state));
        let outcome = scheduler.on_frame(&mut state, &TickInput::default(), 0.0);
        assert_eq!(outcome, FrameOutcome::Idle);
    }

    #[test]
    fn test_one_tick_per_frame_while_playing() {
        let mut scheduler = FrameScheduler::default();
        let mut state = GameState::new(1);
        state.start_game();
        for i in 0..10 {
            let outcome = scheduler.on_frame(&mut state, &TickInput::default(), i as f64 * FRAME_MS);
            assert_eq!(outcome, FrameOutcome::Simulated);
        }
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_discount_after_delay() {
        let mut scheduler = FrameScheduler::default();
        let mut state = GameState::new(2);
        state.start_game();
        state.trigger_death();

        for i in 0..120 {
            let outcome = scheduler.on_frame(&mut state, &TickInput::default(), i as f64 * FRAME_MS);
            assert_eq!(outcome, FrameOutcome::Decayed);
            assert_eq!(state.phase, GamePhase::GameOver);
        }

        scheduler.on_frame(&mut state, &TickInput::default(), DISCOUNT_DELAY_MS + 1.0);
        assert_eq!(state.phase, GamePhase::Discount);
    }

    #[test]
    fn test_effects_decay_after_game_over() {
        let mut scheduler = FrameScheduler::default();
        let mut state = GameState::new(3);
        state.start_game();
        state.trigger_death();
        let bones = state
            .particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Bone)
            .count();
        assert_eq!(bones, BONE_COUNT);

        // Decay keeps running through the discount prompt
        let mut now = 0.0;
        let mut frames = 0;
        while scheduler.wants_frame(&state) {
            scheduler.on_frame(&mut state, &TickInput::default(), now);
            now += 100.0;
            frames += 1;
            assert!(frames <= BONE_LIFE as usize + 1, "effects never finished");
        }
        assert_eq!(state.phase, GamePhase::Discount);
        assert_eq!(state.death_ticks, 0);
        assert_eq!(state.shake_ticks, 0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_resume_drops_stale_timestamp() {
        let mut scheduler = FrameScheduler::new(500.0);
        let mut state = GameState::new(4);
        state.start_game();
        scheduler.on_frame(&mut state, &TickInput::default(), 0.0);
        state.trigger_death();

        // Loop restarted long after the last frame: first frame counts as 0 ms
        scheduler.resume();
        scheduler.on_frame(&mut state, &TickInput::default(), 10_000.0);
        assert_eq!(scheduler.game_over_elapsed_ms(), 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);

        scheduler.on_frame(&mut state, &TickInput::default(), 10_500.0);
        assert_eq!(state.phase, GamePhase::Discount);
    }
}
