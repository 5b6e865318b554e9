//! Data-driven game balance
//!
//! A [`Tuning`] is resolved once at start-up from the [`DeviceProfile`] and
//! never changes during a session, so difficulty stays a pure function of score.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Device class, guessed from viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceProfile {
    #[default]
    Desktop,
    /// Narrow viewport: wider gaps and slower spawns
    Mobile,
}

impl DeviceProfile {
    pub fn from_viewport_width(width: f64) -> Self {
        if width <= MOBILE_VIEWPORT_MAX_WIDTH {
            DeviceProfile::Mobile
        } else {
            DeviceProfile::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceProfile::Desktop => "Desktop",
            DeviceProfile::Mobile => "Mobile",
        }
    }
}

/// Physics, geometry and difficulty constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub profile: DeviceProfile,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Avatar ===
    pub gravity: f32,
    pub jump_velocity: f32,

    // === Obstacles ===
    /// Vertical opening between the two segments
    pub gap_size: u32,
    pub min_segment_height: u32,

    // === Difficulty ===
    pub base_speed: f32,
    pub max_speed: f32,
    pub speed_increment: f32,
    /// Spawn interval in milliseconds
    pub base_interval: f64,
    pub min_interval: f64,
    pub interval_decrement: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_profile(DeviceProfile::Desktop)
    }
}

impl Tuning {
    pub fn for_profile(profile: DeviceProfile) -> Self {
        let (gap_size, base_interval, min_interval) = match profile {
            DeviceProfile::Desktop => (180, 1300.0, 700.0),
            DeviceProfile::Mobile => (240, 2200.0, 1200.0),
        };
        Self {
            profile,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            gap_size,
            min_segment_height: OBSTACLE_MIN_HEIGHT,
            base_speed: 2.2,
            max_speed: 4.5,
            speed_increment: 0.08,
            base_interval,
            min_interval,
            interval_decrement: 25.0,
        }
    }

    /// Resolve the profile from the viewport width (evaluated once at start-up)
    pub fn for_viewport(width: f64) -> Self {
        Self::for_profile(DeviceProfile::from_viewport_width(width))
    }

    /// Parse overrides; missing fields take the desktop defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Inclusive range of valid gap-top heights
    pub fn gap_top_range(&self) -> (u32, u32) {
        let max = (self.field_height as u32)
            .saturating_sub(self.gap_size)
            .saturating_sub(self.min_segment_height);
        (self.min_segment_height, max.max(self.min_segment_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_viewport() {
        assert_eq!(DeviceProfile::from_viewport_width(390.0), DeviceProfile::Mobile);
        assert_eq!(DeviceProfile::from_viewport_width(600.0), DeviceProfile::Mobile);
        assert_eq!(DeviceProfile::from_viewport_width(601.0), DeviceProfile::Desktop);
    }

    #[test]
    fn test_mobile_is_more_forgiving() {
        let desktop = Tuning::for_profile(DeviceProfile::Desktop);
        let mobile = Tuning::for_profile(DeviceProfile::Mobile);
        assert!(mobile.gap_size > desktop.gap_size);
        assert!(mobile.base_interval > desktop.base_interval);
        assert!(mobile.min_interval > desktop.min_interval);
        assert_eq!(mobile.base_speed, desktop.base_speed);
    }

    #[test]
    fn test_gap_top_range() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gap_top_range(), (50, 570));
        let mobile = Tuning::for_profile(DeviceProfile::Mobile);
        assert_eq!(mobile.gap_top_range(), (50, 510));
    }

    #[test]
    fn test_from_json_partial_override() {
        let tuning = Tuning::from_json(r#"{ "gap_size": 200, "max_speed": 5.0 }"#).unwrap();
        assert_eq!(tuning.gap_size, 200);
        assert_eq!(tuning.max_speed, 5.0);
        assert_eq!(tuning.base_interval, 1300.0);

        assert!(Tuning::from_json("not json").is_err());
    }
}
