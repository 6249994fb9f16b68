//! Vertical physics for the player
//!
//! Explicit Euler: the position moves by the velocity from the start of the
//! frame, then gravity is added.

use crate::consts::{GRAVITY, GROUND_Y, JUMP_FORCE};

/// Vertical body state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertical {
    pub y: f32,
    pub vel_y: f32,
}

/// Whether a body of `height` at `y` is resting on the ground
#[inline]
pub fn is_grounded(y: f32, height: f32) -> bool {
    y + height >= GROUND_Y
}

/// Advance one frame under gravity, clamped between the ceiling and the ground
pub fn integrate(body: Vertical, height: f32) -> Vertical {
    let mut y = body.y + body.vel_y;
    let mut vel_y = body.vel_y + GRAVITY;

    if y + height >= GROUND_Y {
        y = GROUND_Y - height;
        vel_y = 0.0;
    } else if y < 0.0 {
        y = 0.0;
        vel_y = vel_y.max(0.0);
    }

    Vertical { y, vel_y }
}

/// Velocity after a jump request. Airborne bodies keep their velocity.
pub fn jump_velocity(body: Vertical, height: f32) -> f32 {
    if is_grounded(body.y, height) {
        JUMP_FORCE
    } else {
        body.vel_y
    }
}
