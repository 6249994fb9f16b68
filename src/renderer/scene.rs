//! Frame composition
//!
//! Turns a read-only `GameState` into an ordered list of draw commands:
//! background, ground, obstacles, player, particles, score, then the
//! full-screen flash/shake overlays.

use glam::Vec2;

use super::commands::{Color, DrawCommand};
use crate::Settings;
use crate::consts::*;
use crate::sim::{GamePhase, GameState, Obstacle, Particle, ParticleKind, Player};

const SKY: Color = Color::rgb(0x45, 0xb7, 0xd1);
const GROUND: Color = Color::rgb(0x4e, 0xcd, 0xc4);
const PLAYER_BODY: Color = Color::rgb(0xff, 0x6b, 0x35);
const OBSTACLE_BODY: Color = Color::rgb(0x33, 0x33, 0x33);
const OBSTACLE_SPIKE: Color = Color::rgb(0x22, 0x22, 0x22);
const FLASH: Color = Color::rgb(0xff, 0x00, 0x00);

pub const SCORE_FONT: &str = "24px Comic Sans MS";
const SCORE_POS: Vec2 = Vec2::new(20.0, 40.0);

/// Maximum shake offset (pixels) at the start of the countdown
const SHAKE_AMPLITUDE: f32 = 10.0;
/// Peak opacity of the white shake overlay
const SHAKE_OVERLAY_ALPHA: f32 = 0.15;
/// Spike width along an obstacle's top edge
const SPIKE_WIDTH: f32 = 20.0;
const SPIKE_HEIGHT: f32 = 10.0;
/// Background overdraw so shaking never exposes the canvas edge
const OVERDRAW: f32 = SHAKE_AMPLITUDE * 2.0;

fn rect(pos: Vec2, size: Vec2, color: Color) -> DrawCommand {
    DrawCommand::FillRect { pos, size, color }
}

/// Shake offset for the current countdown. Deterministic per frame.
pub fn shake_offset(shake_ticks: u32) -> Vec2 {
    if shake_ticks == 0 {
        return Vec2::ZERO;
    }
    let intensity = SHAKE_AMPLITUDE * shake_ticks as f32 / SCREEN_SHAKE_FRAMES as f32;
    let t = shake_ticks as f32;
    Vec2::new((t * 12.9898).sin(), (t * 78.233).sin()) * intensity
}

fn player_shapes(player: &Player, out: &mut Vec<DrawCommand>) {
    let p = player.pos;
    out.push(rect(p, player.size, PLAYER_BODY));
    // Eyes
    out.push(rect(p + Vec2::new(8.0, 8.0), Vec2::splat(8.0), Color::WHITE));
    out.push(rect(p + Vec2::new(24.0, 8.0), Vec2::splat(8.0), Color::WHITE));
    out.push(rect(p + Vec2::new(10.0, 10.0), Vec2::splat(4.0), Color::BLACK));
    out.push(rect(p + Vec2::new(26.0, 10.0), Vec2::splat(4.0), Color::BLACK));
}

fn obstacle_shapes(obstacle: &Obstacle, out: &mut Vec<DrawCommand>) {
    out.push(rect(obstacle.pos, obstacle.size, OBSTACLE_BODY));

    let spikes = (obstacle.size.x / SPIKE_WIDTH).floor() as usize;
    for i in 0..spikes {
        let left = obstacle.pos + Vec2::new(i as f32 * SPIKE_WIDTH, 0.0);
        out.push(DrawCommand::FillTriangle {
            points: [
                left,
                left + Vec2::new(SPIKE_WIDTH * 0.5, -SPIKE_HEIGHT),
                left + Vec2::new(SPIKE_WIDTH, 0.0),
            ],
            color: OBSTACLE_SPIKE,
        });
    }
}

fn particle_shapes(particle: &Particle, out: &mut Vec<DrawCommand>) {
    let alpha = particle.alpha();
    let color = Color::from_rgb(particle.color, alpha);
    match particle.kind {
        ParticleKind::Blood | ParticleKind::Explosion => out.push(DrawCommand::FillCircle {
            center: particle.pos,
            radius: particle.size * 0.5,
            color,
        }),
        ParticleKind::Bone => {
            let size = particle.size;
            let top_left = particle.pos - Vec2::splat(size * 0.5);
            out.push(rect(top_left, Vec2::splat(size), color));

            let eye = Vec2::splat(size * 0.25);
            let black = Color::BLACK.with_alpha(alpha);
            out.push(rect(top_left + Vec2::new(size * 0.2, size * 0.25), eye, black));
            out.push(rect(top_left + Vec2::new(size * 0.55, size * 0.25), eye, black));
        }
    }
}

/// Build the draw list for one frame
pub fn build_frame(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(16 + state.obstacles.len() * 3 + state.particles.len() * 3);

    let shaking = settings.effective_screen_shake() && state.shake_ticks > 0;
    if shaking {
        out.push(DrawCommand::Save);
        out.push(DrawCommand::Translate(shake_offset(state.shake_ticks)));
    }

    // Background and ground
    out.push(rect(
        Vec2::splat(-OVERDRAW),
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT) + Vec2::splat(OVERDRAW * 2.0),
        SKY,
    ));
    out.push(rect(
        Vec2::new(-OVERDRAW, GROUND_Y),
        Vec2::new(CANVAS_WIDTH + OVERDRAW * 2.0, CANVAS_HEIGHT - GROUND_Y + OVERDRAW),
        GROUND,
    ));

    let in_run = matches!(
        state.phase,
        GamePhase::Playing | GamePhase::GameOver | GamePhase::Discount
    );

    if in_run {
        for obstacle in &state.obstacles {
            obstacle_shapes(obstacle, &mut out);
        }
    }

    // The burst replaces the player once dead
    if state.phase == GamePhase::Playing {
        player_shapes(&state.player, &mut out);
    }

    if settings.particles {
        for particle in &state.particles {
            particle_shapes(particle, &mut out);
        }
    }

    if in_run {
        out.push(DrawCommand::Text {
            text: format!("Score: {}", state.display_score()),
            pos: SCORE_POS,
            font: SCORE_FONT,
            color: Color::BLACK,
        });
    }

    if shaking {
        out.push(DrawCommand::Restore);
    }

    // Overlays
    let flash = settings.death_flash_strength();
    if state.death_ticks > 0 && flash > 0.0 {
        let t = state.death_ticks as f32 / DEATH_ANIMATION_FRAMES as f32;
        out.push(rect(
            Vec2::ZERO,
            Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            FLASH.with_alpha(flash * t),
        ));
    }
    if shaking {
        let t = state.shake_ticks as f32 / SCREEN_SHAKE_FRAMES as f32;
        out.push(rect(
            Vec2::ZERO,
            Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            Color::WHITE.with_alpha(SHAKE_OVERLAY_ALPHA * t),
        ));
    }

    out
}
