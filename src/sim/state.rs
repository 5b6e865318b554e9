//! Session state and phase transitions
//!
//! Everything that resets on (re)start lives in [`GameState`]; the best score
//! survives sessions and is owned by the caller.

use super::avatar::Avatar;
use super::collision::Collision;
use super::difficulty::Difficulty;
use super::obstacle::ObstacleField;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Start prompt showing, nothing simulated yet
    #[default]
    Idle,
    /// Simulation running
    Active,
    /// Run ended by a collision
    Over,
}

/// Something the presentation layer may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Session (re)started
    Started,
    /// An obstacle was cleared; carries the new score
    Scored { score: u64 },
    /// Run ended
    Collided(Collision),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Resolved once before the session; never mutated mid-session
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub avatar: Avatar,
    pub field: ObstacleField,
    pub score: u64,
    /// Derived from `score`, refreshed on every scoring event
    pub difficulty: Difficulty,
    /// Steps taken since the session started
    pub time_ticks: u64,
    /// What ended the last run
    pub collision: Option<Collision>,
    /// Events since the last drain (not gameplay-affecting)
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            difficulty: Difficulty::base(&tuning),
            tuning,
            phase: GamePhase::Idle,
            avatar: Avatar::default(),
            field: ObstacleField::default(),
            score: 0,
            time_ticks: 0,
            collision: None,
            events: Vec::new(),
        }
    }

    /// Enter Active from Idle or Over with a fresh session.
    /// Returns false (and changes nothing) if already Active.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Active {
            return false;
        }
        self.reset();
        self.phase = GamePhase::Active;
        self.events.push(GameEvent::Started);
        true
    }

    /// Apply a jump impulse. Ignored unless Active.
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Active {
            return false;
        }
        self.avatar.impulse(self.tuning.jump_velocity);
        true
    }

    /// Active -> Over. Idempotent: a second collision is ignored.
    pub fn end(&mut self, collision: Collision) -> bool {
        if self.phase != GamePhase::Active {
            return false;
        }
        self.phase = GamePhase::Over;
        self.collision = Some(collision);
        self.events.push(GameEvent::Collided(collision));
        true
    }

    /// Count one cleared obstacle and re-derive difficulty
    pub fn add_point(&mut self) {
        self.score += 1;
        self.difficulty = Difficulty::for_score(&self.tuning, self.score);
        self.events.push(GameEvent::Scored { score: self.score });
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    fn reset(&mut self) {
        self.avatar = Avatar::default();
        self.field.clear();
        self.score = 0;
        self.difficulty = Difficulty::base(&self.tuning);
        self.time_ticks = 0;
        self.collision = None;
        self.events.clear();
    }
}
