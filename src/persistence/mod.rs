//! Best-score persistence
//!
//! One integer per game variant under a fixed key. Reading never fails:
//! missing storage, a missing key or garbage all read back as 0.

use std::collections::HashMap;

/// Load/save contract for the best score
pub trait ScoreStore {
    /// Stored best for `key`, 0 when absent or unreadable
    fn load_best(&self, key: &str) -> u64;
    /// Persist `score` under `key`. Failures are logged, not returned.
    fn save_best(&mut self, key: &str, score: u64);
}

/// Parse a stored value, tolerating whitespace and JSON-ish numbers
pub fn parse_stored_score(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else { return 0 };
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return v;
    }
    // Older pages wrote the number through JSON.stringify
    match serde_json::from_str::<f64>(raw) {
        Ok(v) if v.is_finite() && v >= 0.0 => v.floor() as u64,
        _ => 0,
    }
}

/// In-memory store (native builds and tests)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, as if a previous page had written it
    pub fn with_raw(mut self, key: &str, raw: &str) -> Self {
        self.values.insert(key.to_string(), raw.to_string());
        self
    }
}

impl ScoreStore for MemoryStore {
    fn load_best(&self, key: &str) -> u64 {
        parse_stored_score(self.values.get(key).map(String::as_str))
    }

    fn save_best(&mut self, key: &str, score: u64) {
        self.values.insert(key.to_string(), score.to_string());
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load_best(&self, key: &str) -> u64 {
        let raw = Self::storage().and_then(|s| s.get_item(key).ok().flatten());
        let best = parse_stored_score(raw.as_deref());
        log::info!("Loaded best score {} ({})", best, key);
        best
    }

    fn save_best(&mut self, key: &str, score: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, &score.to_string()).is_ok() {
                    log::info!("Best score saved: {} ({})", score, key);
                } else {
                    log::warn!("Could not write best score to LocalStorage");
                }
            }
            None => log::warn!("LocalStorage unavailable - best score not saved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_zero() {
        assert_eq!(parse_stored_score(None), 0);
        assert_eq!(parse_stored_score(Some("")), 0);
        assert_eq!(parse_stored_score(Some("honey")), 0);
        assert_eq!(parse_stored_score(Some("-5")), 0);
        assert_eq!(parse_stored_score(Some("NaN")), 0);
    }

    #[test]
    fn test_parse_accepts_numbers() {
        assert_eq!(parse_stored_score(Some("250")), 250);
        assert_eq!(parse_stored_score(Some(" 42\n")), 42);
        assert_eq!(parse_stored_score(Some("120.0")), 120);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new().with_raw("other", "9");
        assert_eq!(store.load_best("honeyHuntBest"), 0);
        store.save_best("honeyHuntBest", 200);
        assert_eq!(store.load_best("honeyHuntBest"), 200);
        assert_eq!(store.load_best("other"), 9);
    }

    #[test]
    fn test_corrupt_value_reads_zero() {
        let store = MemoryStore::new().with_raw("honeyHuntBest", "{oops");
        assert_eq!(store.load_best("honeyHuntBest"), 0);
    }
}
