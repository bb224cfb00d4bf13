//! Level gating: the current level advances once every one of its words is fully mastered.
//!
//! - Advancement is all-or-nothing over the level's word list.
//! - One check advances at most one level, even if later levels are complete too.
//! - Checks are suspended in review mode and skipped for an empty word list.
//! - After the last level the result is terminal and the level stays put.

use super::level::{FIRST_LEVEL, LevelNumber};
use super::{MasteryStore, Word};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advancement {
    NotYetComplete,
    LevelAdvanced(LevelNumber),
    AllLevelsMastered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LevelNumber", into = "LevelNumber")]
pub struct Progression {
    current_level: LevelNumber,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            current_level: FIRST_LEVEL,
        }
    }
}

impl From<LevelNumber> for Progression {
    fn from(level: LevelNumber) -> Self {
        Self::at_level(level)
    }
}

impl From<Progression> for LevelNumber {
    fn from(progression: Progression) -> Self {
        progression.current_level
    }
}

impl Progression {
    /// Restores a persisted level. Anything below the first level becomes the first level.
    pub fn at_level(level: LevelNumber) -> Self {
        Self {
            current_level: level.max(FIRST_LEVEL),
        }
    }

    pub fn current_level(&self) -> LevelNumber {
        self.current_level
    }

    pub fn check_advancement(
        &mut self,
        level_words: &[Word],
        total_levels: u32,
        mastery: &MasteryStore,
        review_mode: bool,
    ) -> Advancement {
        if level_words.is_empty() || review_mode {
            return Advancement::NotYetComplete;
        }

        let fully_mastered = mastery.fully_mastered_count(level_words);
        if fully_mastered != level_words.len() {
            tracing::debug!(
                level = self.current_level,
                fully_mastered,
                total = level_words.len(),
                "level not yet complete"
            );
            return Advancement::NotYetComplete;
        }

        if self.current_level < total_levels {
            self.current_level += 1;
            tracing::info!(level = self.current_level, "level cleared, advancing");
            Advancement::LevelAdvanced(self.current_level)
        } else {
            tracing::info!(level = self.current_level, "all levels mastered");
            Advancement::AllLevelsMastered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuizMode;

    fn master_all(store: &mut MasteryStore, word: &str) {
        for mode in QuizMode::ALL {
            store.record_correct(&Word::from(word), mode);
        }
    }

    fn level(words: &[&str]) -> Vec<Word> {
        words.iter().map(|w| Word::from(*w)).collect()
    }

    #[test]
    fn test_hello_bye_scenario() {
        let words = level(&["hello", "bye"]);
        let mut store = MasteryStore::new();
        let mut progression = Progression::at_level(1);

        master_all(&mut store, "hello");
        assert_eq!(
            progression.check_advancement(&words, 3, &store, false),
            Advancement::NotYetComplete
        );

        master_all(&mut store, "bye");
        assert_eq!(
            progression.check_advancement(&words, 3, &store, false),
            Advancement::LevelAdvanced(2)
        );
        assert_eq!(progression.current_level(), 2);
    }

    #[test]
    fn test_empty_level_never_advances() {
        let mut store = MasteryStore::new();
        master_all(&mut store, "hello");
        let mut progression = Progression::default();

        assert_eq!(
            progression.check_advancement(&[], 5, &store, false),
            Advancement::NotYetComplete
        );
        assert_eq!(progression.current_level(), 1);
    }

    #[test]
    fn test_review_mode_suspends_progression() {
        let words = level(&["hello"]);
        let mut store = MasteryStore::new();
        master_all(&mut store, "hello");
        let mut progression = Progression::default();

        assert_eq!(
            progression.check_advancement(&words, 2, &store, true),
            Advancement::NotYetComplete
        );
        assert_eq!(progression.current_level(), 1);
    }

    #[test]
    fn test_partial_mastery_never_advances() {
        let words = level(&["hello", "bye"]);
        let mut store = MasteryStore::new();
        master_all(&mut store, "hello");
        store.record_correct(&Word::from("bye"), QuizMode::MultipleChoice);
        store.record_correct(&Word::from("bye"), QuizMode::VideoSelect);
        let mut progression = Progression::default();

        assert_eq!(
            progression.check_advancement(&words, 2, &store, false),
            Advancement::NotYetComplete
        );
    }

    #[test]
    fn test_advances_one_level_per_check() {
        // Level 1 and level 2 share a fully mastered word list.
        let words = level(&["hello"]);
        let mut store = MasteryStore::new();
        master_all(&mut store, "hello");
        let mut progression = Progression::default();

        assert_eq!(
            progression.check_advancement(&words, 4, &store, false),
            Advancement::LevelAdvanced(2)
        );
        assert_eq!(
            progression.check_advancement(&words, 4, &store, false),
            Advancement::LevelAdvanced(3)
        );
        assert_eq!(progression.current_level(), 3);
    }

    #[test]
    fn test_last_level_is_terminal() {
        let words = level(&["hello"]);
        let mut store = MasteryStore::new();
        master_all(&mut store, "hello");
        let mut progression = Progression::at_level(2);

        assert_eq!(
            progression.check_advancement(&words, 2, &store, false),
            Advancement::AllLevelsMastered
        );
        assert_eq!(progression.current_level(), 2);
    }

    #[test]
    fn test_restored_level_is_at_least_one() {
        assert_eq!(Progression::at_level(0).current_level(), 1);
        assert_eq!(Progression::at_level(4).current_level(), 4);
    }
}
