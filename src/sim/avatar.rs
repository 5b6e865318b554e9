//! Player avatar physics
//!
//! One fixed step per call: the simulation speed is tied to how often the
//! driver calls [`Avatar::integrate`], not to wall-clock time.

use glam::Vec2;

use crate::consts::*;

/// The player's avatar. Only `pos.y`, `velocity` and `rotation` evolve.
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    /// Top-left corner of the visual box
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/frame, positive is down)
    pub velocity: f32,
    /// Tilt in radians, derived from velocity
    pub rotation: f32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            pos: Vec2::new(AVATAR_X, AVATAR_START_Y),
            size: Vec2::new(AVATAR_WIDTH, AVATAR_HEIGHT),
            velocity: 0.0,
            rotation: 0.0,
        }
    }
}

impl Avatar {
    /// Apply gravity, then move. Velocity must update before position.
    pub fn integrate(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.pos.y += self.velocity;
        self.rotation = (self.velocity * ROTATION_SCALE).clamp(-MAX_ROTATION, MAX_ROTATION);
    }

    /// Jump: overrides the current velocity (not additive)
    pub fn impulse(&mut self, jump_velocity: f32) {
        self.velocity = jump_velocity;
    }

    /// Center of the visual box
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_velocity_before_position() {
        let mut avatar = Avatar::default();
        avatar.velocity = 1.0;
        avatar.integrate(GRAVITY);
        assert!((avatar.velocity - 1.1).abs() < 1e-6);
        assert!((avatar.pos.y - (AVATAR_START_Y + 1.1)).abs() < 1e-4);
        assert_eq!(avatar.pos.x, AVATAR_X);
    }

    #[test]
    fn test_impulse_overrides_velocity() {
        let mut avatar = Avatar::default();
        avatar.velocity = 12.0;
        avatar.impulse(JUMP_VELOCITY);
        assert_eq!(avatar.velocity, JUMP_VELOCITY);

        avatar.velocity = -1.0;
        avatar.impulse(JUMP_VELOCITY);
        avatar.impulse(JUMP_VELOCITY);
        assert_eq!(avatar.velocity, JUMP_VELOCITY);
    }

    #[test]
    fn test_rotation_clamped() {
        let mut avatar = Avatar::default();
        avatar.velocity = 50.0;
        avatar.integrate(GRAVITY);
        assert!((avatar.rotation - MAX_ROTATION).abs() < 1e-6);

        avatar.velocity = -50.0;
        avatar.integrate(GRAVITY);
        assert!((avatar.rotation + MAX_ROTATION).abs() < 1e-6);

        avatar.velocity = 0.9;
        avatar.integrate(GRAVITY);
        assert!((avatar.rotation - 1.0 * ROTATION_SCALE).abs() < 1e-6);
    }
}
