//! Difficulty progression: score → level → platform margin range.
//!
//! Nothing here is stored. The level is recomputed from the current score
//! every time a platform is placed.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Horizontal margin offset bounds for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginRange {
    pub min: i32,
    pub max: i32,
}

impl MarginRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

const DEFAULT_RANGES: [MarginRange; 3] = [
    MarginRange::new(-100, 0),
    MarginRange::new(0, 100),
    MarginRange::new(100, 200),
];

/// Ordered level → margin range table. Levels past the end clamp to the
/// last entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginTable {
    ranges: Vec<MarginRange>,
}

impl Default for MarginTable {
    fn default() -> Self {
        Self {
            ranges: DEFAULT_RANGES.to_vec(),
        }
    }
}

impl MarginTable {
    /// An empty `ranges` falls back to the default table.
    pub fn new(ranges: Vec<MarginRange>) -> Self {
        if ranges.is_empty() {
            return Self::default();
        }
        Self { ranges }
    }

    pub fn ranges(&self) -> &[MarginRange] {
        &self.ranges
    }

    pub fn range_for_level(&self, level: u32) -> MarginRange {
        let last = self.ranges.len() - 1;
        self.ranges[(level as usize).min(last)]
    }
}

/// `floor(score / points_per_level)`. A zero divisor is treated as 1.
pub fn level_for_score(score: u32, points_per_level: u32) -> u32 {
    score / points_per_level.max(1)
}

/// Margin from the last-placed platform to the next one:
/// `center_x + round(random() * range.max + range.min)`.
pub fn platform_margin<R: Rng>(center_x: f64, range: MarginRange, rng: &mut R) -> f64 {
    let roll: f64 = rng.gen();
    center_x + (roll * range.max as f64 + range.min as f64).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_level_is_floor_of_score_over_ten() {
        assert_eq!(level_for_score(0, 10), 0);
        assert_eq!(level_for_score(9, 10), 0);
        assert_eq!(level_for_score(10, 10), 1);
        assert_eq!(level_for_score(23, 10), 2);
        assert_eq!(level_for_score(45, 10), 4);
    }

    #[test]
    fn test_level_is_non_decreasing() {
        let mut previous = 0;
        for score in 0..500 {
            let level = level_for_score(score, 10);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_zero_points_per_level_does_not_panic() {
        assert_eq!(level_for_score(7, 0), 7);
    }

    #[test]
    fn test_default_table_ranges() {
        let table = MarginTable::default();
        assert_eq!(table.range_for_level(0), MarginRange::new(-100, 0));
        assert_eq!(table.range_for_level(1), MarginRange::new(0, 100));
        assert_eq!(table.range_for_level(2), MarginRange::new(100, 200));
    }

    #[test]
    fn test_levels_past_table_clamp_to_last() {
        let table = MarginTable::default();
        assert_eq!(table.range_for_level(4), MarginRange::new(100, 200));
        assert_eq!(table.range_for_level(u32::MAX), MarginRange::new(100, 200));
    }

    #[test]
    fn test_empty_table_falls_back_to_default() {
        assert_eq!(MarginTable::new(Vec::new()), MarginTable::default());
    }

    #[test]
    fn test_margin_bounds_per_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..1000 {
            // random() * 0 + -100 is always -100
            let m0 = platform_margin(640.0, MarginRange::new(-100, 0), &mut rng);
            assert_eq!(m0, 540.0);

            let m1 = platform_margin(640.0, MarginRange::new(0, 100), &mut rng);
            assert!((640.0..=740.0).contains(&m1));

            let m2 = platform_margin(640.0, MarginRange::new(100, 200), &mut rng);
            assert!((740.0..=940.0).contains(&m2));
            assert_eq!(m2.fract(), 0.0);
        }
    }
}
