//! Collision detection with forgiving hitboxes
//!
//! The avatar hitbox is half the visual size, centred. Obstacle hitboxes are
//! inset horizontally and ignore the decorative rims at the gap edges, so the
//! passable gap is slightly larger than the one drawn.

use glam::Vec2;

use super::avatar::Avatar;
use super::obstacle::Obstacle;
use crate::consts::*;

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Hit the obstacle at this index
    Obstacle { index: usize },
    /// Left the field through the top or bottom
    Boundary,
}

/// Axis-aligned box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub min: Vec2,
    pub max: Vec2,
}

impl Hitbox {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }
}

/// Effective solid region of an obstacle pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleHitbox {
    pub left: f32,
    pub right: f32,
    /// Effective bottom edge of the upper segment
    pub upper_bottom: f32,
    /// Effective top edge of the lower segment
    pub lower_top: f32,
}

pub fn avatar_hitbox(avatar: &Avatar) -> Hitbox {
    let size = avatar.size * HITBOX_SCALE;
    let pos = avatar.pos + (avatar.size - size) / 2.0;
    Hitbox::from_pos_size(pos, size)
}

pub fn obstacle_hitbox(obstacle: &Obstacle, gap_size: f32) -> ObstacleHitbox {
    ObstacleHitbox {
        left: obstacle.x + OBSTACLE_HITBOX_PADDING,
        right: obstacle.x + OBSTACLE_WIDTH - OBSTACLE_HITBOX_PADDING,
        upper_bottom: obstacle.gap_top - RIM_HEIGHT,
        lower_top: obstacle.gap_top + gap_size + RIM_HEIGHT,
    }
}

/// Check the avatar against a single obstacle pair
pub fn avatar_obstacle_collision(avatar: &Avatar, obstacle: &Obstacle, gap_size: f32) -> bool {
    let hb = avatar_hitbox(avatar);
    let ob = obstacle_hitbox(obstacle, gap_size);

    let overlaps_x = ob.left < hb.max.x && ob.right > hb.min.x;
    overlaps_x && (hb.min.y < ob.upper_bottom || hb.max.y > ob.lower_top)
}

/// Check whether the avatar left the field (with a little slack for display scaling)
pub fn boundary_collision(avatar: &Avatar, field_height: f32) -> bool {
    avatar.pos.y < -BOUNDARY_PADDING
        || avatar.pos.y + avatar.size.y > field_height + BOUNDARY_PADDING
}

/// First obstacle the avatar overlaps, if any
pub fn check_obstacles(avatar: &Avatar, obstacles: &[Obstacle], gap_size: f32) -> Option<Collision> {
    obstacles
        .iter()
        .position(|o| avatar_obstacle_collision(avatar, o, gap_size))
        .map(|index| Collision::Obstacle { index })
}

pub fn check_boundary(avatar: &Avatar, field_height: f32) -> Option<Collision> {
    boundary_collision(avatar, field_height).then_some(Collision::Boundary)
}
