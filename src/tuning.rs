//! Data-driven game variants
//!
//! The page hosts more than one flavour of the catch game. They all run on
//! the same engine and differ only in the values below.

/// Per-variant tuning
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Display name
    pub name: String,
    /// LocalStorage key for this variant's best score
    pub storage_key: String,
    /// Session length in timed mode (seconds)
    pub session_secs: f32,
    /// Whether hazards spawn at all
    pub hazards: bool,
    /// Expected collectible spawns per second at spawn factor 1.0
    pub collectible_rate: f32,
    /// Expected hazard spawns per second at spawn factor 1.0
    pub hazard_rate: f32,
}

impl GameConfig {
    /// The full game: honey drops, bees, lives, combos and levels
    pub fn honey_hunt() -> Self {
        Self {
            name: "Honey Hunt".to_string(),
            storage_key: "honeyHuntBest".to_string(),
            session_secs: 60.0,
            hazards: true,
            collectible_rate: 1.6,
            hazard_rate: 0.7,
        }
    }

    /// The simple catch loop: no hazards, shorter, more honey
    pub fn honey_catch() -> Self {
        Self {
            name: "Honey Catch".to_string(),
            storage_key: "honeyCatchBest".to_string(),
            session_secs: 45.0,
            hazards: false,
            collectible_rate: 2.2,
            hazard_rate: 0.0,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::honey_hunt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_use_distinct_storage_keys() {
        assert_ne!(
            GameConfig::honey_hunt().storage_key,
            GameConfig::honey_catch().storage_key
        );
    }

    #[test]
    fn test_catch_variant_has_no_hazards() {
        let cfg = GameConfig::honey_catch();
        assert!(!cfg.hazards);
        assert_eq!(cfg.hazard_rate, 0.0);
    }
}
