//! Game state and core simulation types
//!
//! One `Session` owns everything gameplay reads or writes. It is passed by
//! reference to every simulation stage; nothing lives in globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, DifficultyProfile};
use crate::consts::*;
use crate::tuning::GameConfig;

/// Overall session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Before the first Start, or after Reset
    #[default]
    Idle,
    /// Simulation advancing
    Running,
    /// Frozen, still rendering
    Paused,
    /// Session over, waiting for Start/Reset
    Ended,
}

/// Trail point for player rendering
#[derive(Debug, Clone, Copy)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub speed: f32,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 12;

/// The player's avatar
#[derive(Debug, Clone)]
pub struct Player {
    /// Centre position
    pub pos: Vec2,
    /// Horizontal velocity (pixels/s)
    pub vel: f32,
    pub width: f32,
    pub height: f32,
    /// Lean into the direction of travel (radians, cosmetic)
    pub tilt: f32,
    /// Idle bob phase (radians, cosmetic)
    pub bob_phase: f32,
    /// Trail history for rendering (newest first)
    pub trail: Vec<TrailPoint>,
}

impl Player {
    pub fn new(field: Vec2) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            vel: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            tilt: 0.0,
            bob_phase: 0.0,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        };
        player.recenter(field);
        player
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    /// Allowed range for the centre x
    pub fn x_bounds(&self, field_width: f32) -> (f32, f32) {
        let margin = self.width * PLAYER_BOUNDS_MARGIN;
        let max = (field_width - margin).max(margin);
        (margin, max)
    }

    /// Y of the centre when standing on the ground
    pub fn ground_y(&self, field_height: f32) -> f32 {
        field_height - self.half_height() - PLAYER_GROUND_MARGIN
    }

    /// Put the player back in the middle, at rest
    pub fn recenter(&mut self, field: Vec2) {
        self.pos = Vec2::new(field.x / 2.0, self.ground_y(field.y));
        self.vel = 0.0;
        self.tilt = 0.0;
        self.clear_trail();
    }

    /// Record current position to trail
    pub fn record_trail(&mut self) {
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.pos,
                speed: self.vel.abs(),
            },
        );
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop();
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

/// Falling entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Honey drop: score on contact
    Collectible,
    /// Bee: costs a life on contact
    Hazard,
}

impl EntityKind {
    pub fn size(&self) -> f32 {
        match self {
            EntityKind::Collectible => COLLECTIBLE_SIZE,
            EntityKind::Hazard => HAZARD_SIZE,
        }
    }

    /// Cosmetic angular rate (radians/s)
    pub fn spin_rate(&self) -> f32 {
        match self {
            EntityKind::Collectible => COLLECTIBLE_WOBBLE_RATE,
            EntityKind::Hazard => HAZARD_SPIN_RATE,
        }
    }
}

/// A falling entity
#[derive(Debug, Clone)]
pub struct FallingEntity {
    pub id: u32,
    pub kind: EntityKind,
    /// Centre position
    pub pos: Vec2,
    /// Fall speed (pixels/s, downward)
    pub speed: f32,
    /// Diameter (collectible) or full width (hazard)
    pub size: f32,
    /// Wobble/rotation angle (cosmetic)
    pub spin: f32,
}

impl FallingEntity {
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Fully below the bottom edge of the field
    pub fn is_below(&self, field_height: f32) -> bool {
        self.pos.y - self.radius() > field_height
    }
}

/// Particle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Honey,
    Sparkle,
    Sting,
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

/// Floating "+points" text
#[derive(Debug, Clone)]
pub struct ComboPopup {
    pub pos: Vec2,
    pub text: String,
    pub life: f32, // 0-1
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;
/// Maximum simultaneous popups
pub const MAX_POPUPS: usize = 16;

/// Feedback emitted by the simulation, drained once per frame by the driver
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    Collected { points: u64, pos: Vec2 },
    ComboMilestone { streak: u32 },
    ComboBreak,
    LevelUp { level: u32 },
    Hurt { lives: u32 },
    Died,
    Ended {
        score: u64,
        best: u64,
        new_best: bool,
        message: String,
    },
    Aborted,
}

/// Multiplier for a given streak: 10 -> x2, 25 -> x3, 50 -> x4
pub fn multiplier_for_streak(streak: u32) -> u32 {
    match streak {
        s if s >= 50 => 4,
        s if s >= 25 => 3,
        s if s >= 10 => 2,
        _ => 1,
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    pub rng: Pcg32,
    pub config: GameConfig,
    pub status: GameStatus,
    pub score: u64,
    pub best_score: u64,
    pub lives: u32,
    /// Countdown in timed mode, elapsed time in arcade mode
    pub time_remaining: f32,
    pub streak: u32,
    pub combo_window: f32,
    pub difficulty: Difficulty,
    pub arcade_mode: bool,
    pub level: u32,
    /// Play-field size in pixels
    pub field: Vec2,
    pub player: Player,
    /// Falling entities (sorted by id)
    pub entities: Vec<FallingEntity>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub popups: Vec<ComboPopup>,
    /// Remaining death grace once lives hit zero
    pub dying: Option<f32>,
    /// Message shown for the last finished session
    pub end_message: Option<String>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Session {
    /// Create an idle session with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let field = Vec2::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT);
        let difficulty = Difficulty::default();
        let mut session = Self {
            rng: Pcg32::seed_from_u64(seed),
            config,
            status: GameStatus::Idle,
            score: 0,
            best_score: 0,
            lives: difficulty.profile().starting_lives,
            time_remaining: 0.0,
            streak: 0,
            combo_window: 0.0,
            difficulty,
            arcade_mode: false,
            level: 1,
            field,
            player: Player::new(field),
            entities: Vec::new(),
            particles: Vec::new(),
            popups: Vec::new(),
            dying: None,
            end_message: None,
            events: Vec::new(),
            next_id: 1,
        };
        session.reset_values();
        session
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        self.difficulty.profile()
    }

    /// Current score multiplier (derived from streak)
    pub fn multiplier(&self) -> u32 {
        multiplier_for_streak(self.streak)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain pending feedback events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_dying(&self) -> bool {
        self.dying.is_some()
    }

    /// Put every per-session value back to its starting point for the
    /// current difficulty and mode. Status is left alone.
    pub fn reset_values(&mut self) {
        self.score = 0;
        self.lives = self.profile().starting_lives;
        self.time_remaining = if self.arcade_mode {
            0.0
        } else {
            self.config.session_secs
        };
        self.streak = 0;
        self.combo_window = 0.0;
        self.level = 1;
        self.entities.clear();
        self.particles.clear();
        self.popups.clear();
        self.dying = None;
        self.player.recenter(self.field);
    }

    /// Resize the play field, keeping the player at the same relative x
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let ratio = self.player.pos.x / self.field.x;
        self.field = Vec2::new(width, height);
        let (min_x, max_x) = self.player.x_bounds(width);
        self.player.pos.x = (ratio * width).clamp(min_x, max_x);
        self.player.pos.y = self.player.ground_y(height);
        self.player.clear_trail();
    }
}
