//! Obstacle spawning, scrolling, retirement and pass-through scoring

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::Tuning;

/// Source of gap-top heights. Seedable so runs can be replayed exactly.
pub trait GapSource {
    /// Uniform integer in `[min, max]` (inclusive)
    fn gap_top(&mut self, min: u32, max: u32) -> u32;
}

/// PCG-backed gap source
#[derive(Debug, Clone)]
pub struct SeededGaps {
    rng: Pcg32,
}

impl SeededGaps {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl GapSource for SeededGaps {
    fn gap_top(&mut self, min: u32, max: u32) -> u32 {
        self.rng.random_range(min..=max)
    }
}

/// A pair of segments with a vertical opening between them
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the upper segment (top of the gap)
    pub gap_top: f32,
    /// Scoring latch, never reset
    pub passed: bool,
}

impl Obstacle {
    pub fn right(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }
}

/// Owns the set of live obstacles
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    /// Oldest first
    pub obstacles: Vec<Obstacle>,
    /// Timestamp (ms) of the last spawn
    pub last_spawn: f64,
}

impl ObstacleField {
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.last_spawn = 0.0;
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Spawn at the right edge once more than `interval` ms have elapsed.
    /// Returns true if an obstacle was added.
    pub fn maybe_spawn(
        &mut self,
        now: f64,
        interval: f64,
        tuning: &Tuning,
        gaps: &mut dyn GapSource,
    ) -> bool {
        if now - self.last_spawn <= interval {
            return false;
        }
        let (min, max) = tuning.gap_top_range();
        let gap_top = gaps.gap_top(min, max).clamp(min, max);
        self.obstacles.push(Obstacle {
            x: tuning.field_width,
            gap_top: gap_top as f32,
            passed: false,
        });
        self.last_spawn = now;
        log::debug!("Spawned obstacle (gap top {}) at t={:.0}", gap_top, now);
        true
    }

    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Drop obstacles whose right edge is past the left margin.
    /// Returns how many were removed.
    pub fn reap_offscreen(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.right() >= OFFSCREEN_MARGIN);
        before - self.obstacles.len()
    }

    /// Latch every obstacle the avatar has cleared.
    /// Returns the number of scoring events (one per newly passed obstacle).
    pub fn check_passed(&mut self, avatar_x: f32) -> u32 {
        let mut scored = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.passed && obstacle.right() < avatar_x {
                obstacle.passed = true;
                scored += 1;
            }
        }
        scored
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Replays a fixed list of heights, cycling
    pub(crate) struct ScriptedGaps {
        pub heights: Vec<u32>,
        pub next: usize,
    }

    impl ScriptedGaps {
        pub fn new(heights: &[u32]) -> Self {
            Self {
                heights: heights.to_vec(),
                next: 0,
            }
        }
    }

    impl GapSource for ScriptedGaps {
        fn gap_top(&mut self, _min: u32, _max: u32) -> u32 {
            let h = self.heights[self.next % self.heights.len()];
            self.next += 1;
            h
        }
    }

    #[test]
    fn test_spawn_is_time_gated() {
        let tuning = Tuning::default();
        let mut field = ObstacleField::default();
        let mut gaps = ScriptedGaps::new(&[300]);

        // Exactly the interval is not enough
        assert!(!field.maybe_spawn(1300.0, 1300.0, &tuning, &mut gaps));
        assert!(field.maybe_spawn(1300.5, 1300.0, &tuning, &mut gaps));
        assert_eq!(field.len(), 1);
        assert_eq!(field.last_spawn, 1300.5);
        assert_eq!(field.obstacles[0].x, tuning.field_width);
        assert_eq!(field.obstacles[0].gap_top, 300.0);

        assert!(!field.maybe_spawn(2000.0, 1300.0, &tuning, &mut gaps));
        assert!(field.maybe_spawn(2601.0, 1300.0, &tuning, &mut gaps));
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_advance_and_reap() {
        let mut field = ObstacleField::default();
        field.obstacles.push(Obstacle { x: -79.0, gap_top: 100.0, passed: true });
        field.obstacles.push(Obstacle { x: 200.0, gap_top: 100.0, passed: false });

        field.advance(0.5);
        assert_eq!(field.obstacles[1].x, 199.5);
        // right edge at -19.5: still inside the margin
        assert_eq!(field.reap_offscreen(), 0);

        field.advance(1.0);
        assert_eq!(field.reap_offscreen(), 1);
        assert_eq!(field.len(), 1);
        assert_eq!(field.obstacles[0].x, 198.5);
    }

    #[test]
    fn test_passed_latch_fires_once() {
        let mut field = ObstacleField::default();
        field.obstacles.push(Obstacle { x: 5.0, gap_top: 100.0, passed: false });
        field.obstacles.push(Obstacle { x: 100.0, gap_top: 100.0, passed: false });

        assert_eq!(field.check_passed(AVATAR_X), 1);
        assert!(field.obstacles[0].passed);
        assert!(!field.obstacles[1].passed);
        assert_eq!(field.check_passed(AVATAR_X), 0);

        field.advance(100.0);
        assert_eq!(field.check_passed(AVATAR_X), 1);
        assert_eq!(field.check_passed(AVATAR_X), 0);
    }

    #[test]
    fn test_seeded_gaps_replay() {
        let mut a = SeededGaps::new(42);
        let mut b = SeededGaps::new(42);
        let seq_a: Vec<u32> = (0..16).map(|_| a.gap_top(50, 570)).collect();
        let seq_b: Vec<u32> = (0..16).map(|_| b.gap_top(50, 570)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_scripted_heights_are_used_in_order() {
        let tuning = Tuning::default();
        let mut field = ObstacleField::default();
        let mut gaps = ScriptedGaps::new(&[50, 570, 310]);
        for i in 1..=3 {
            field.maybe_spawn(i as f64 * 2000.0, 1300.0, &tuning, &mut gaps);
        }
        let tops: Vec<f32> = field.obstacles.iter().map(|o| o.gap_top).collect();
        assert_eq!(tops, vec![50.0, 570.0, 310.0]);
    }

    proptest! {
        #[test]
        fn prop_gap_top_within_bounds(seed in any::<u64>(), spawns in 1usize..40) {
            let tuning = Tuning::default();
            let mut field = ObstacleField::default();
            let mut gaps = SeededGaps::new(seed);
            for i in 1..=spawns {
                field.maybe_spawn(i as f64 * 1301.0, 1300.0, &tuning, &mut gaps);
            }
            prop_assert_eq!(field.len(), spawns);
            for o in &field.obstacles {
                prop_assert!(o.gap_top >= 50.0 && o.gap_top <= 570.0);
            }
        }
    }
}
