//! Scoring module - line-clear points, combo streak and speed progression
//!
//! Rules:
//! - A lock that clears `n > 0` lines scores `base * n + bonus * n * combo`
//!   using the combo *before* this clear, then the combo grows by one.
//! - A lock that clears nothing resets the combo and scores nothing.
//! - Every `score_step` points of cumulative score is one speed level; each
//!   newly reached level multiplies the fall interval by
//!   `numerator / denominator`, never going below `min_ms`.

use serde::Serialize;

use crate::types::{
    BASE_LINE_SCORE, COMBO_BONUS, DEFAULT_FALL_MS, MIN_FALL_MS, SPEED_DENOMINATOR,
    SPEED_NUMERATOR, SPEED_SCORE_STEP,
};

/// Point constants for line clears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRules {
    pub base: u64,
    pub bonus: u64,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            base: BASE_LINE_SCORE,
            bonus: COMBO_BONUS,
        }
    }
}

/// Fall-speed progression constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedRules {
    pub initial_ms: u32,
    pub min_ms: u32,
    pub numerator: u32,
    pub denominator: u32,
    pub score_step: u64,
}

impl Default for SpeedRules {
    fn default() -> Self {
        Self {
            initial_ms: DEFAULT_FALL_MS,
            min_ms: MIN_FALL_MS,
            numerator: SPEED_NUMERATOR,
            denominator: SPEED_DENOMINATOR,
            score_step: SPEED_SCORE_STEP,
        }
    }
}

impl SpeedRules {
    /// Apply the speed factor once, floored at `min_ms`
    pub fn next_interval(&self, interval_ms: u32) -> u32 {
        let scaled = u64::from(interval_ms) * u64::from(self.numerator) / u64::from(self.denominator);
        (scaled as u32).max(self.min_ms)
    }
}

/// Points for clearing `lines` lines with the streak at `combo`
///
/// ```
/// use blockfall_core::scoring::{line_clear_points, ScoreRules};
///
/// let rules = ScoreRules { base: 100, bonus: 10 };
/// assert_eq!(line_clear_points(&rules, 1, 0), 100);
/// assert_eq!(line_clear_points(&rules, 2, 1), 220);
/// assert_eq!(line_clear_points(&rules, 0, 5), 0);
/// ```
pub fn line_clear_points(rules: &ScoreRules, lines: u32, combo: u32) -> u64 {
    let n = u64::from(lines);
    rules
        .base
        .saturating_mul(n)
        .saturating_add(rules.bonus.saturating_mul(n).saturating_mul(u64::from(combo)))
}

/// Result of one clearing step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClearOutcome {
    pub lines: u32,
    pub points: u64,
    /// Combo after this step
    pub combo: u32,
}

/// Score, combo streak and current fall speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreState {
    score: u64,
    combo: u32,
    lines: u32,
    fall_interval_ms: u32,
    speed_level: u64,
}

impl ScoreState {
    pub fn new(speed: &SpeedRules) -> Self {
        Self {
            score: 0,
            combo: 0,
            lines: 0,
            fall_interval_ms: speed.initial_ms,
            speed_level: 0,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Total lines cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn speed_level(&self) -> u64 {
        self.speed_level
    }

    /// Update score and combo for a clearing step that removed `lines` rows
    pub fn apply_clear(&mut self, rules: &ScoreRules, lines: u32) -> ClearOutcome {
        if lines == 0 {
            self.combo = 0;
            return ClearOutcome {
                lines: 0,
                points: 0,
                combo: 0,
            };
        }

        let points = line_clear_points(rules, lines, self.combo);
        self.score = self.score.saturating_add(points);
        self.combo += 1;
        self.lines += lines;

        ClearOutcome {
            lines,
            points,
            combo: self.combo,
        }
    }

    /// Advance the speed level if the score crossed a new threshold.
    ///
    /// Returns the new fall interval only when it actually changed, so callers
    /// reschedule their timer at most once per newly crossed threshold.
    pub fn apply_speed(&mut self, rules: &SpeedRules) -> Option<u32> {
        if rules.score_step == 0 {
            return None;
        }
        let target = self.score / rules.score_step;
        if target <= self.speed_level {
            return None;
        }

        let before = self.fall_interval_ms;
        while self.speed_level < target {
            let next = rules.next_interval(self.fall_interval_ms);
            if next == self.fall_interval_ms {
                // Fixed point (floor or unit factor): later levels change nothing.
                self.speed_level = target;
                break;
            }
            self.speed_level += 1;
            self.fall_interval_ms = next;
        }

        (self.fall_interval_ms != before).then_some(self.fall_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_sequence_one_two_zero() {
        let rules = ScoreRules { base: 100, bonus: 10 };
        let mut state = ScoreState::new(&SpeedRules::default());

        let first = state.apply_clear(&rules, 1);
        assert_eq!((first.points, state.combo()), (100, 1));

        let second = state.apply_clear(&rules, 2);
        assert_eq!((second.points, state.combo()), (220, 2));

        let third = state.apply_clear(&rules, 0);
        assert_eq!((third.points, state.combo()), (0, 0));

        assert_eq!(state.score(), 320);
        assert_eq!(state.lines(), 3);
    }

    #[test]
    fn test_speed_changes_only_on_new_threshold() {
        let rules = ScoreRules { base: 600, bonus: 0 };
        let speed = SpeedRules::default();
        let mut state = ScoreState::new(&speed);

        state.apply_clear(&rules, 1); // 600
        assert_eq!(state.apply_speed(&speed), None);

        state.apply_clear(&rules, 1); // 1200
        assert_eq!(state.apply_speed(&speed), Some(450));
        // Same threshold, no second reschedule.
        assert_eq!(state.apply_speed(&speed), None);

        state.apply_clear(&rules, 2); // 2400, crosses level 2
        assert_eq!(state.apply_speed(&speed), Some(405));
    }

    #[test]
    fn test_speed_floor() {
        let speed = SpeedRules::default();
        let rules = ScoreRules { base: 100_000, bonus: 0 };
        let mut state = ScoreState::new(&speed);

        state.apply_clear(&rules, 1);
        assert_eq!(state.apply_speed(&speed), Some(MIN_FALL_MS));
        assert_eq!(state.fall_interval_ms(), MIN_FALL_MS);

        // Already at the floor: level advances, interval does not.
        state.apply_clear(&rules, 1);
        assert_eq!(state.apply_speed(&speed), None);
        assert_eq!(state.fall_interval_ms(), MIN_FALL_MS);
    }

    #[test]
    fn test_unit_factor_skips_to_target_level() {
        let speed = SpeedRules {
            numerator: 10,
            denominator: 10,
            score_step: 1,
            ..SpeedRules::default()
        };
        let rules = ScoreRules {
            base: 3_000_000_000,
            bonus: 0,
        };
        let mut state = ScoreState::new(&speed);

        state.apply_clear(&rules, 1);
        assert_eq!(state.apply_speed(&speed), None);
        assert_eq!(state.speed_level(), 3_000_000_000);
        assert_eq!(state.fall_interval_ms(), DEFAULT_FALL_MS);
    }

    #[test]
    fn test_next_interval() {
        let speed = SpeedRules::default();
        assert_eq!(speed.next_interval(500), 450);
        assert_eq!(speed.next_interval(210), 200);
    }
}
