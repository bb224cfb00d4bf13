//! Score and streak counters shown in the header.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    /// Total correct answers.
    pub score: u32,
    /// Consecutive correct answers; an incorrect answer resets it.
    pub streak: u32,
    pub best_streak: u32,
    pub last_correct_at: Option<DateTime<Utc>>,
}

impl Stats {
    pub fn record_answer(&mut self, correct: bool, at: DateTime<Utc>) {
        if correct {
            self.score += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            self.last_correct_at = Some(at);
        } else {
            self.streak = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_answers_build_streak() {
        let mut stats = Stats::default();
        let now = Utc::now();
        stats.record_answer(true, now);
        stats.record_answer(true, now);
        assert_eq!(stats.score, 2);
        assert_eq!(stats.streak, 2);
        assert_eq!(stats.best_streak, 2);
        assert_eq!(stats.last_correct_at, Some(now));
    }

    #[test]
    fn test_incorrect_answer_resets_streak_only() {
        let mut stats = Stats::default();
        let now = Utc::now();
        stats.record_answer(true, now);
        stats.record_answer(true, now);
        stats.record_answer(false, now);
        assert_eq!(stats.score, 2);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.best_streak, 2);

        stats.record_answer(true, now);
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.best_streak, 2);
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let stats: Stats = serde_json::from_str(r#"{"score": 4}"#).unwrap();
        assert_eq!(stats.score, 4);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.best_streak, 0);
        assert!(stats.last_correct_at.is_none());
    }
}
