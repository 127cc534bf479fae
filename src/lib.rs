//! Honey Hunt - catch the falling honey, dodge the bees
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring, session state)
//! - `driver`: Per-frame loop driver and scheduler abstraction
//! - `renderer`: Display-list render pipeline (+ canvas painter on web)
//! - `input`: Keyboard/pointer routing into intent and commands
//! - `persistence`: Best-score storage
//! - `tuning`: Data-driven game variants

pub mod audio;
pub mod driver;
pub mod error;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use driver::{Game, ManualScheduler, Ports, Scheduler};
pub use error::{ConfigError, SimError};
pub use settings::Settings;
pub use tuning::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Largest dt the loop driver will hand to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Player motion is integrated in sub-steps no longer than this
    pub const MOTION_SUBSTEP: f32 = 1.0 / 120.0;

    /// Default play-field size (resized at runtime)
    pub const DEFAULT_FIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 600.0;

    /// Player (the bear) dimensions
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 70.0;
    /// Gap between the player's feet and the bottom of the field
    pub const PLAYER_GROUND_MARGIN: f32 = 20.0;
    /// Full horizontal speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 480.0;
    /// Exponential smoothing rate toward the target velocity (1/s)
    pub const PLAYER_SMOOTHING: f32 = 10.0;
    /// Bounds margin as a fraction of player width
    pub const PLAYER_BOUNDS_MARGIN: f32 = 0.4;

    /// Falling entity sizes (diameter / full width)
    pub const COLLECTIBLE_SIZE: f32 = 30.0;
    pub const HAZARD_SIZE: f32 = 36.0;
    /// Uniform jitter added to the fall speed factor
    pub const FALL_SPEED_JITTER: f32 = 0.1;
    /// Cosmetic spin rates (radians/s)
    pub const COLLECTIBLE_WOBBLE_RATE: f32 = 3.0;
    pub const HAZARD_SPIN_RATE: f32 = 2.0;

    /// Scoring
    pub const BASE_SCORE: u64 = 10;
    pub const STREAK_BONUS_CAP: u64 = 50;
    pub const STREAK_BONUS_PER_CATCH: u64 = 2;
    pub const COMBO_WINDOW_SECS: f32 = 3.0;
    pub const COMBO_MILESTONE_EVERY: u32 = 10;
    pub const POINTS_PER_LEVEL: u64 = 500;
    /// Spawn rate bonus per level above 1
    pub const LEVEL_SPAWN_BONUS: f32 = 0.1;

    /// Collectible reach: player_width * A + radius * B
    pub const CATCH_PLAYER_FRACTION: f32 = 0.4;
    pub const CATCH_RADIUS_FRACTION: f32 = 0.8;
    /// Hazard overlap: player half-extent fraction
    pub const HAZARD_PLAYER_FRACTION: f32 = 0.8;

    /// Delay between the last life lost and the Ended transition
    pub const DEATH_GRACE_SECS: f32 = 1.0;

    /// Momentary tap impulse duration (seconds)
    pub const TAP_IMPULSE_SECS: f32 = 0.2;
}
