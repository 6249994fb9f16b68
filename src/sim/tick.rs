//! Per-frame simulation step
//!
//! Core game loop that advances the simulation deterministically, one
//! display frame at a time.

use super::collision::rects_collide;
use super::state::{GamePhase, GameState};

/// Frames of lead the autopilot gives an approaching obstacle before jumping
const AUTOPILOT_LEAD_FRAMES: f32 = 10.0;

/// Input commands for a single frame (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space)
    pub jump: bool,
    /// Demo mode - the game jumps on its own
    pub autopilot: bool,
}

/// Whether the autopilot wants to jump this frame
pub fn autopilot_wants_jump(state: &GameState) -> bool {
    if !state.player.is_grounded() {
        return false;
    }
    let player = state.player.rect();

    // Nearest obstacle whose front edge is still ahead of the player
    state
        .obstacles
        .iter()
        .filter(|o| o.pos.x >= player.right())
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .is_some_and(|o| o.pos.x - player.right() <= o.speed * AUTOPILOT_LEAD_FRAMES)
}

/// Advance the game state by one frame.
///
/// Order within a frame is fixed: jump, physics, obstacles, collision,
/// particles, countdowns, score. A death found in this frame still gets this
/// frame's particle and score updates.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    if input.jump || (input.autopilot && autopilot_wants_jump(state)) {
        state.jump();
    }

    state.time_ticks += 1;

    // Physics
    state.player.integrate();

    // Obstacles
    state.scroll_obstacles();

    // Collision: first hit wins
    let player = state.player.rect();
    if state.obstacles.iter().any(|o| rects_collide(&player, &o.rect())) {
        state.trigger_death();
    }

    // Particles and countdowns
    state.decay_effects();

    state.score += 1;

    log::trace!(
        "tick {}: y={:.1} vy={:.1} obstacles={} particles={}",
        state.time_ticks,
        state.player.pos.y,
        state.player.vel_y,
        state.obstacles.len(),
        state.particles.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::obstacles::Obstacle;
    use glam::Vec2;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_game();
        state
    }

    fn obstacle_at(state: &mut GameState, x: f32, speed: f32) {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(x, GROUND_Y - OBSTACLE_HEIGHT),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed,
        });
    }

    #[test]
    fn test_tick_ignored_outside_playing() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos.y, PLAYER_START_Y);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_first_frame_falls_and_spawns() {
        let mut state = playing(1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.vel_y, 0.5);
        assert_eq!(state.player.pos.y, 200.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.score, 1);

        tick(&mut state, &TickInput::default());
        assert!(state.player.pos.y > 200.0);
    }

    #[test]
    fn test_jump_input_from_ground() {
        let mut state = playing(1);
        state.player.pos.y = GROUND_Y - PLAYER_HEIGHT;
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos.y, 298.0);
        assert_eq!(state.player.vel_y, -11.5);

        // Mid-air jump is ignored
        tick(&mut state, &input);
        assert_eq!(state.player.vel_y, -11.0);
    }

    #[test]
    fn test_score_counts_frames_and_resets() {
        let mut state = playing(2);
        for frame in 1..=25 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.score, frame);
        }
        assert_eq!(state.display_score(), 2);

        state.pause();
        state.start_game();
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_collision_frame_finishes_updates() {
        let mut state = playing(3);
        state.player.pos.y = GROUND_Y - PLAYER_HEIGHT;
        obstacle_at(&mut state, 110.0, 5.0);
        obstacle_at(&mut state, 112.0, 5.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.particles.len(), 43);
        assert!(state.particles.iter().all(|p| p.life == p.max_life - 1));
        assert_eq!(state.death_ticks, DEATH_ANIMATION_FRAMES - 1);
        assert_eq!(state.shake_ticks, SCREEN_SHAKE_FRAMES - 1);
        assert_eq!(state.score, 1);

        // Simulation halts
        let obstacles = state.obstacles.len();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);
        assert_eq!(state.obstacles.len(), obstacles);
    }

    #[test]
    fn test_player_stays_in_bounds_while_playing() {
        let mut state = playing(4);
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        for _ in 0..500 {
            if state.phase != GamePhase::Playing {
                break;
            }
            tick(&mut state, &input);
            assert!(state.player.pos.y >= 0.0);
            assert!(state.player.pos.y <= GROUND_Y - PLAYER_HEIGHT);
        }
    }

    #[test]
    fn test_offscreen_obstacles_gone_next_frame() {
        let mut state = playing(5);
        obstacle_at(&mut state, -88.0, 5.0);
        tick(&mut state, &TickInput::default());
        assert!(state.obstacles.iter().all(|o| o.pos.x + o.size.x > -OBSTACLE_CULL_MARGIN));
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_autopilot_jumps_for_close_obstacle() {
        let mut state = playing(6);
        state.player.pos.y = GROUND_Y - PLAYER_HEIGHT;
        obstacle_at(&mut state, 400.0, 5.0);
        assert!(!autopilot_wants_jump(&state));

        state.obstacles[0].pos.x = 180.0;
        assert!(autopilot_wants_jump(&state));

        state.player.pos.y = 250.0;
        assert!(!autopilot_wants_jump(&state), "airborne");
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing(99999);
        let mut state2 = playing(99999);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..600 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        for (a, b) in state1.obstacles.iter().zip(&state2.obstacles) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.speed, b.speed);
        }
    }
}
