//! Probabilistic entity spawner
//!
//! One Bernoulli trial per kind per step. The success probability is
//! proportional to dt, so the expected spawn count per second does not
//! depend on the frame rate.

use glam::Vec2;
use rand::Rng;

use super::state::{EntityKind, FallingEntity, Session};
use crate::consts::{FALL_SPEED_JITTER, LEVEL_SPAWN_BONUS};

/// Probability of one spawn this step for the given base rate
pub fn spawn_chance(session: &Session, base_rate: f32, dt: f32) -> f64 {
    let level_factor = 1.0 + (session.level.saturating_sub(1)) as f32 * LEVEL_SPAWN_BONUS;
    let rate = base_rate * session.profile().spawn_rate_factor * level_factor;
    ((rate * dt) as f64).clamp(0.0, 1.0)
}

/// Roll the spawn trials for this step
pub fn spawn(session: &mut Session, dt: f32) {
    let collectible_p = spawn_chance(session, session.config.collectible_rate, dt);
    if session.rng.random_bool(collectible_p) {
        spawn_entity(session, EntityKind::Collectible);
    }

    if session.config.hazards {
        let hazard_p = spawn_chance(session, session.config.hazard_rate, dt);
        if session.rng.random_bool(hazard_p) {
            spawn_entity(session, EntityKind::Hazard);
        }
    }
}

/// Spawn one entity just above the visible field
pub fn spawn_entity(session: &mut Session, kind: EntityKind) {
    let size = kind.size();
    let factor = match kind {
        EntityKind::Collectible => session.profile().drop_speed_factor,
        EntityKind::Hazard => session.profile().hazard_speed_factor,
    };
    let jitter: f32 = session.rng.random::<f32>() * FALL_SPEED_JITTER;
    let speed = session.field.y * (factor + jitter);

    let span = (session.field.x - size).max(0.0);
    let left = session.rng.random::<f32>() * span;
    let spin = session.rng.random::<f32>() * std::f32::consts::TAU;

    let id = session.next_entity_id();
    session.entities.push(FallingEntity {
        id,
        kind,
        pos: Vec2::new(left + size / 2.0, -size / 2.0),
        speed,
        size,
        spin,
    });
}
