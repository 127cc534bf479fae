//! Player and entity motion
//!
//! Player velocity eases toward the target with exponential smoothing. The
//! smoothing is integrated in equal sub-steps of at most `MOTION_SUBSTEP`,
//! which keeps trajectories consistent when the driver hands us anything
//! from a 1/240 s frame to the 0.1 s clamp.

use glam::Vec2;

use super::state::{Player, Session};
use crate::consts::*;

/// Advance the player toward `direction` (-1 left, 0 none, 1 right)
pub fn update_player(player: &mut Player, direction: f32, field: Vec2, dt: f32) {
    if dt <= 0.0 {
        return;
    }
    let target = direction.clamp(-1.0, 1.0) * PLAYER_SPEED;
    let (min_x, max_x) = player.x_bounds(field.x);

    // Tolerate float noise so 1/30 is four sub-steps, not five
    let steps = (dt / MOTION_SUBSTEP - 1.0e-3).ceil().max(1.0) as u32;
    let h = dt / steps as f32;
    for _ in 0..steps {
        player.vel += (target - player.vel) * h * PLAYER_SMOOTHING;
        player.pos.x += player.vel * h;
        if player.pos.x <= min_x {
            player.pos.x = min_x;
            player.vel = player.vel.max(0.0);
        } else if player.pos.x >= max_x {
            player.pos.x = max_x;
            player.vel = player.vel.min(0.0);
        }
    }

    // Cosmetics
    player.tilt = (player.vel / PLAYER_SPEED) * 0.25;
    player.bob_phase = (player.bob_phase + dt * 6.0) % std::f32::consts::TAU;
    player.record_trail();
}

/// Move falling entities, drop the ones that left the field
pub fn update_entities(session: &mut Session, dt: f32) {
    let height = session.field.y;
    for entity in &mut session.entities {
        entity.pos.y += entity.speed * dt;
        entity.spin = (entity.spin + entity.kind.spin_rate() * dt) % std::f32::consts::TAU;
    }
    session.entities.retain(|e| !e.is_below(height));
}

/// Animate and expire particles and popups
pub fn update_effects(session: &mut Session, dt: f32) {
    for particle in session.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel.y += 300.0 * dt;
        particle.vel *= 0.98;
        particle.life -= dt * 1.5;
        particle.size *= 0.995;
    }
    session.particles.retain(|p| p.life > 0.0);

    for popup in session.popups.iter_mut() {
        popup.pos.y -= 40.0 * dt;
        popup.life -= dt;
    }
    session.popups.retain(|p| p.life > 0.0);
}
