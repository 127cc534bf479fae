//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Variable dt supplied by the driver, player motion sub-stepped
//! - Seeded RNG only
//! - Stable iteration order (entities kept in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod motion;
pub mod scoring;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{catch_reach, catches, hits_hazard};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use scoring::{catch_points, level_for_score};
pub use session::END_MESSAGES;
pub use state::{
    ComboPopup, EntityKind, FallingEntity, GameEvent, GameStatus, Particle, ParticleKind, Player,
    Session, TrailPoint, multiplier_for_streak,
};
pub use tick::{TickInput, tick};
