//! Progressive difficulty
//!
//! Both values are pure functions of score and the session's [`Tuning`].

use crate::tuning::Tuning;

/// Scroll speed and spawn interval derived from a score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Pixels per frame
    pub speed: f32,
    /// Milliseconds between spawns
    pub interval: f64,
}

impl Difficulty {
    pub fn base(tuning: &Tuning) -> Self {
        Self::for_score(tuning, 0)
    }

    pub fn for_score(tuning: &Tuning, score: u64) -> Self {
        Self {
            speed: speed_for_score(tuning, score),
            interval: interval_for_score(tuning, score),
        }
    }
}

pub fn speed_for_score(tuning: &Tuning, score: u64) -> f32 {
    (tuning.base_speed + score as f32 * tuning.speed_increment).min(tuning.max_speed)
}

pub fn interval_for_score(tuning: &Tuning, score: u64) -> f64 {
    (tuning.base_interval - score as f64 * tuning.interval_decrement).max(tuning.min_interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::DeviceProfile;
    use proptest::prelude::*;

    #[test]
    fn test_desktop_score_ten() {
        let tuning = Tuning::for_profile(DeviceProfile::Desktop);
        let d = Difficulty::for_score(&tuning, 10);
        assert!((d.speed - 3.0).abs() < 1e-5);
        assert_eq!(d.interval, 1050.0);
    }

    #[test]
    fn test_clamped_at_bounds() {
        let tuning = Tuning::for_profile(DeviceProfile::Desktop);
        let d = Difficulty::for_score(&tuning, 1000);
        assert_eq!(d.speed, 4.5);
        assert_eq!(d.interval, 700.0);

        let mobile = Tuning::for_profile(DeviceProfile::Mobile);
        let d = Difficulty::for_score(&mobile, 1000);
        assert_eq!(d.interval, 1200.0);
    }

    #[test]
    fn test_base_values() {
        let tuning = Tuning::default();
        let d = Difficulty::base(&tuning);
        assert_eq!(d.speed, 2.2);
        assert_eq!(d.interval, 1300.0);
    }

    proptest! {
        #[test]
        fn prop_monotonic_and_bounded(score in 0u64..10_000, mobile in any::<bool>()) {
            let profile = if mobile { DeviceProfile::Mobile } else { DeviceProfile::Desktop };
            let tuning = Tuning::for_profile(profile);
            let now = Difficulty::for_score(&tuning, score);
            let next = Difficulty::for_score(&tuning, score + 1);

            prop_assert!(next.speed >= now.speed);
            prop_assert!(next.interval <= now.interval);
            prop_assert!(now.speed <= tuning.max_speed);
            prop_assert!(now.interval >= tuning.min_interval);
        }
    }
}
