//! Gap Runner - a single-screen gap-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, difficulty, phases)
//! - `driver`: Frame scheduling and loop cancellation
//! - `game`: Session state machine wired to the presentation collaborators
//! - `renderer`: Scene description and the Canvas 2D surface
//! - `platform`: Browser/native collaborator traits
//! - `persistence`: Best-score storage
//! - `tuning`: Device-profile game balance

pub mod audio;
pub mod driver;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::{DeviceProfile, Tuning};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Viewports at or below this width get the forgiving mobile profile
    pub const MOBILE_VIEWPORT_MAX_WIDTH: f64 = 600.0;

    /// Avatar defaults - x never changes during a session
    pub const AVATAR_X: f32 = 70.0;
    pub const AVATAR_START_Y: f32 = 300.0;
    pub const AVATAR_WIDTH: f32 = 100.0;
    pub const AVATAR_HEIGHT: f32 = 120.0;

    /// Added to velocity every frame (pixels/frame²)
    pub const GRAVITY: f32 = 0.1;
    /// Velocity set by a jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -3.5;
    /// Rotation per unit of velocity (radians)
    pub const ROTATION_SCALE: f32 = 0.15;
    /// Rotation clamp (60 degrees)
    pub const MAX_ROTATION: f32 = std::f32::consts::FRAC_PI_3;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_MIN_HEIGHT: u32 = 50;
    /// Obstacles are retired once their right edge passes this x
    pub const OFFSCREEN_MARGIN: f32 = -20.0;

    /// Collision leniency
    pub const HITBOX_SCALE: f32 = 0.5;
    pub const OBSTACLE_HITBOX_PADDING: f32 = 8.0;
    /// Decorative rim at each gap edge that never collides
    pub const RIM_HEIGHT: f32 = 35.0;
    /// Extra room above/below the field before a boundary hit
    pub const BOUNDARY_PADDING: f32 = 10.0;
}
