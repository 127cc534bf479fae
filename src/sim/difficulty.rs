//! Difficulty profile table

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Difficulty tier selectable by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Tunable constants for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Collectible fall speed as a fraction of field height per second
    pub drop_speed_factor: f32,
    /// Hazard fall speed as a fraction of field height per second
    pub hazard_speed_factor: f32,
    /// Multiplier on the base spawn rates
    pub spawn_rate_factor: f32,
    pub starting_lives: u32,
}

const EASY: DifficultyProfile = DifficultyProfile {
    drop_speed_factor: 0.25,
    hazard_speed_factor: 0.30,
    spawn_rate_factor: 0.8,
    starting_lives: 5,
};

const NORMAL: DifficultyProfile = DifficultyProfile {
    drop_speed_factor: 0.35,
    hazard_speed_factor: 0.40,
    spawn_rate_factor: 1.0,
    starting_lives: 3,
};

const HARD: DifficultyProfile = DifficultyProfile {
    drop_speed_factor: 0.45,
    hazard_speed_factor: 0.55,
    spawn_rate_factor: 1.3,
    starting_lives: 2,
};

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn profile(&self) -> &'static DifficultyProfile {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Normal => &NORMAL,
            Difficulty::Hard => &HARD,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" | "medium" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}
