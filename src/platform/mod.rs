//! Platform abstraction layer
//!
//! Narrow interfaces the core drives:
//! - Best-score storage (LocalStorage on web, a file natively)
//! - Overlay / HUD toggles
//! - Audio cues (see [`crate::audio`])
//! - Drawing (see [`crate::renderer`])

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Persistent best-score scalar
pub trait ScoreStore {
    /// Missing or unreadable values read as 0
    fn load_best(&mut self) -> u64;
    fn save_best(&mut self, score: u64);
}

/// Which overlay is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Start prompt (shows best score)
    Start,
    /// In-session HUD (score and best)
    Hud,
    /// Results (final score and best)
    GameOver,
}

/// Pure display toggles; no game logic
pub trait Presentation {
    /// Show `screen`, hide the others, and fill in its numbers
    fn show(&mut self, screen: Screen, score: u64, best: u64);
    /// Update the HUD score readout
    fn set_score(&mut self, score: u64);
    /// Brief shake of the play area
    fn shake(&mut self);
}

/// Volatile store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best: u64,
    /// Number of `save_best` calls
    pub writes: u32,
}

impl MemoryStore {
    pub fn with_best(best: u64) -> Self {
        Self { best, writes: 0 }
    }
}

impl ScoreStore for MemoryStore {
    fn load_best(&mut self) -> u64 {
        self.best
    }

    fn save_best(&mut self, score: u64) {
        self.best = score;
        self.writes += 1;
    }
}

/// Records presentation calls and logs them (tests, native demo)
#[derive(Debug, Clone, Default)]
pub struct HeadlessPresentation {
    pub screen: Option<Screen>,
    pub shown: Vec<(Screen, u64, u64)>,
    pub hud_score: u64,
    pub shakes: u32,
}

impl Presentation for HeadlessPresentation {
    fn show(&mut self, screen: Screen, score: u64, best: u64) {
        log::debug!("Show {:?} (score {}, best {})", screen, score, best);
        self.screen = Some(screen);
        self.shown.push((screen, score, best));
        if screen == Screen::Hud {
            self.hud_score = score;
        }
    }

    fn set_score(&mut self, score: u64) {
        self.hud_score = score;
    }

    fn shake(&mut self) {
        self.shakes += 1;
    }
}
