//! Obstacle spawning, scrolling and culling

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// A ground obstacle scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed (units/frame)
    pub speed: f32,
}

impl Obstacle {
    /// New obstacle at the right edge, resting on the ground
    pub fn spawn(id: u32, rng: &mut impl Rng) -> Self {
        Self {
            id,
            pos: Vec2::new(CANVAS_WIDTH, GROUND_Y - OBSTACLE_HEIGHT),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed: rng.random_range(OBSTACLE_MIN_SPEED..OBSTACLE_MAX_SPEED),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Fully past the left cull line
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x <= -OBSTACLE_CULL_MARGIN
    }
}

/// Whether a new obstacle should be appended after `last`
pub fn should_spawn(last: Option<&Obstacle>) -> bool {
    match last {
        None => true,
        Some(o) => o.pos.x < CANVAS_WIDTH - OBSTACLE_SPAWN_SPACING,
    }
}

/// Scroll, cull and (maybe) spawn. Returns the spawned obstacle's id.
///
/// `next_id` allocates ids so spawn order can be recovered from the list.
pub fn advance_obstacles(
    obstacles: &mut Vec<Obstacle>,
    rng: &mut impl Rng,
    next_id: impl FnOnce() -> u32,
) -> Option<u32> {
    for obstacle in obstacles.iter_mut() {
        obstacle.pos.x -= obstacle.speed;
    }
    obstacles.retain(|o| !o.is_offscreen());

    if should_spawn(obstacles.last()) {
        let obstacle = Obstacle::spawn(next_id(), rng);
        log::debug!(
            "Spawned obstacle {} (speed {:.2})",
            obstacle.id,
            obstacle.speed
        );
        let id = obstacle.id;
        obstacles.push(obstacle);
        Some(id)
    } else {
        None
    }
}
