//! Rendering
//!
//! The simulation is turned into a flat [`Scene`] of draw commands each frame;
//! a [`RenderSurface`] turns that into pixels. The Canvas 2D surface lives in
//! `canvas` (wasm only).

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::consts::*;
use crate::sim::GameState;

/// One primitive to draw, in play-field pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole field
    Background { width: f32, height: f32 },
    /// Upper segment (drawn inverted, hanging from the top) and lower segment
    ObstaclePair {
        x: f32,
        width: f32,
        /// Height of the upper segment
        upper_height: f32,
        /// Top edge of the lower segment
        lower_top: f32,
        lower_height: f32,
    },
    Avatar {
        /// Top-left of the visual box
        pos: Vec2,
        size: Vec2,
        /// Radians
        rotation: f32,
    },
}

/// Everything drawn in one frame, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn build(state: &GameState) -> Self {
        let tuning = &state.tuning;
        let gap = tuning.gap_size as f32;

        let mut commands = Vec::with_capacity(state.field.len() + 2);
        commands.push(DrawCommand::Background {
            width: tuning.field_width,
            height: tuning.field_height,
        });
        for obstacle in &state.field.obstacles {
            let lower_top = obstacle.gap_top + gap;
            commands.push(DrawCommand::ObstaclePair {
                x: obstacle.x,
                width: OBSTACLE_WIDTH,
                upper_height: obstacle.gap_top,
                lower_top,
                lower_height: (tuning.field_height - lower_top).max(0.0),
            });
        }
        commands.push(DrawCommand::Avatar {
            pos: state.avatar.pos,
            size: state.avatar.size,
            rotation: state.avatar.rotation,
        });

        Self { commands }
    }
}

/// Anything that can present a scene
pub trait RenderSurface {
    fn render(&mut self, scene: &Scene);
}

/// Keeps the last rendered scene (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub last: Option<Scene>,
    pub frames: u64,
}

impl RenderSurface for DrawList {
    fn render(&mut self, scene: &Scene) {
        self.last = Some(scene.clone());
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;
    use crate::tuning::Tuning;

    #[test]
    fn test_idle_scene_has_background_and_avatar() {
        let state = GameState::new(Tuning::default());
        let scene = Scene::build(&state);
        assert_eq!(scene.commands.len(), 2);
        assert!(matches!(scene.commands[0], DrawCommand::Background { .. }));
        assert!(matches!(
            scene.commands[1],
            DrawCommand::Avatar { pos, .. } if pos == Vec2::new(AVATAR_X, AVATAR_START_Y)
        ));
    }

    #[test]
    fn test_obstacle_pair_geometry() {
        let mut state = GameState::new(Tuning::default());
        state.field.obstacles.push(Obstacle { x: 250.0, gap_top: 200.0, passed: false });
        let scene = Scene::build(&state);
        assert_eq!(
            scene.commands[1],
            DrawCommand::ObstaclePair {
                x: 250.0,
                width: OBSTACLE_WIDTH,
                upper_height: 200.0,
                lower_top: 380.0,
                lower_height: 420.0,
            }
        );
    }
}
