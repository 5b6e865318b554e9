//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step per call, never scaled by elapsed time
//! - Seeded gap source only
//! - No rendering or platform dependencies

pub mod avatar;
pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use avatar::Avatar;
pub use collision::{Collision, Hitbox, ObstacleHitbox, avatar_hitbox, obstacle_hitbox};
pub use difficulty::Difficulty;
pub use obstacle::{GapSource, Obstacle, ObstacleField, SeededGaps};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
