//! Scoring and speed progression
//!
//! Flat per-clear award by simultaneous line count; Hard mode speeds up
//! one level per 1000 points, recomputing the fall interval fresh from the
//! base so repeated speed-ups never accumulate floating-point drift.

/// Score and speed-level tracking for one session
#[derive(Debug, Clone, Default)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Speed level, floor(points / 1000); only Hard mode acts on it
    pub speed_level: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award the simultaneous-clear count and return the delta added.
    /// Anything outside 1..=4 awards nothing.
    pub fn add_clear(&mut self, lines: usize) -> u64 {
        let delta = match lines {
            1 => 100,
            2 => 300,
            3 => 500,
            4 => 800,
            _ => 0,
        };
        self.points += delta;
        delta
    }

    /// Re-derive the speed level from the score. Returns true when the
    /// level rose, which is the signal to recompute the fall interval.
    pub fn update_speed_level(&mut self) -> bool {
        let level = (self.points / 1000) as u32;
        if level > self.speed_level {
            self.speed_level = level;
            true
        } else {
            false
        }
    }

    /// Fall interval for a speed level: base / 1.5^level, always computed
    /// from the base interval rather than the previous one
    pub fn fall_interval(base: f64, speed_level: u32) -> f64 {
        base / 1.5_f64.powi(speed_level as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_awards() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(1), 100);
        assert_eq!(score.add_clear(2), 300);
        assert_eq!(score.add_clear(3), 500);
        assert_eq!(score.add_clear(4), 800);
        assert_eq!(score.points, 1700);
    }

    #[test]
    fn test_zero_lines_award_nothing() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(0), 0);
        assert_eq!(score.points, 0);
    }

    #[test]
    fn test_speed_level_is_floor_of_thousands() {
        let mut score = Score::new();
        score.points = 999;
        assert!(!score.update_speed_level());
        assert_eq!(score.speed_level, 0);

        score.points = 1000;
        assert!(score.update_speed_level());
        assert_eq!(score.speed_level, 1);

        // No change while inside the same thousand
        score.points = 1900;
        assert!(!score.update_speed_level());

        score.points = 3200;
        assert!(score.update_speed_level());
        assert_eq!(score.speed_level, 3);
    }

    #[test]
    fn test_fall_interval_strictly_decreases() {
        let base = 0.8;
        let mut previous = Score::fall_interval(base, 0);
        assert_eq!(previous, base);
        for level in 1..10 {
            let interval = Score::fall_interval(base, level);
            assert!(interval < previous);
            assert!(interval > 0.0);
            previous = interval;
        }
    }

    #[test]
    fn test_fall_interval_has_no_compounding_drift() {
        // Level 2 comes straight from the base, not from level 1's value
        let direct = Score::fall_interval(0.8, 2);
        assert!((direct - 0.8 / 2.25).abs() < 1e-12);
    }
}
