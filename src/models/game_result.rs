use chrono::{DateTime, Utc};

/// Outcome of one finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub correct: usize,
    pub total: usize,
    pub date: DateTime<Utc>,
}

impl GameResult {
    pub fn new(correct: usize, total: usize, date: DateTime<Utc>) -> Self {
        Self {
            correct,
            total,
            date,
        }
    }

    /// Only the correct count is compared; on a tie the other result wins.
    pub fn is_better_than(&self, other: &GameResult) -> bool {
        self.correct > other.correct
    }
}

impl Default for GameResult {
    fn default() -> Self {
        Self::new(0, 0, DateTime::<Utc>::UNIX_EPOCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result(correct: usize, total: usize) -> GameResult {
        GameResult::new(correct, total, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_higher_correct_count_is_better() {
        assert!(result(9, 10).is_better_than(&result(7, 10)));
        assert!(!result(7, 10).is_better_than(&result(9, 10)));
    }

    #[test]
    fn test_ties_are_not_better() {
        assert!(!result(7, 10).is_better_than(&result(7, 10)));
        // total is not a tiebreaker
        assert!(!result(7, 20).is_better_than(&result(7, 10)));
    }

    #[test]
    fn test_default_is_zero_result_at_epoch() {
        let default = GameResult::default();
        assert_eq!(default.correct, 0);
        assert_eq!(default.total, 0);
        assert_eq!(default.date.timestamp(), 0);
    }
}
