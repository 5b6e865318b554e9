//! Best-score persistence
//!
//! The best score is the only state that survives a session. It is read once
//! at start-up and written at most once per game over, only when beaten.
//! The stored form is a bare JSON integer (e.g. `42`).

use crate::platform::ScoreStore;

/// Storage key / file stem
pub const STORAGE_KEY: &str = "gap_runner_best_score";

/// Decode a stored value; absent or corrupt values read as `None`
pub fn decode_best(raw: &str) -> Option<u64> {
    serde_json::from_str::<u64>(raw.trim()).ok()
}

pub fn encode_best(score: u64) -> String {
    // Serializing a u64 cannot fail
    serde_json::to_string(&score).unwrap_or_else(|_| score.to_string())
}

/// In-session view of the persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    pub fn load(store: &mut dyn ScoreStore) -> Self {
        let value = store.load_best();
        log::info!("Best score: {}", value);
        Self { value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Record a final score. Writes through to the store only when strictly
    /// greater than the current best; returns whether it was a new best.
    pub fn record(&mut self, score: u64, store: &mut dyn ScoreStore) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        store.save_best(score);
        log::info!("New best score: {}", score);
        true
    }
}

/// Best score in a JSON file (native)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileStore {
    fn load_best(&mut self) -> u64 {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                log::info!("No best score at {}: {}", self.path.display(), e);
                return 0;
            }
        };
        decode_best(&raw).unwrap_or_else(|| {
            log::warn!("Ignoring corrupt best score in {}", self.path.display());
            0
        })
    }

    fn save_best(&mut self, score: u64) {
        if let Err(e) = std::fs::write(&self.path, encode_best(score)) {
            log::warn!("Failed to save best score to {}: {}", self.path.display(), e);
        }
    }
}
