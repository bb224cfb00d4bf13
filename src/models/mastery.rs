//! Per-word mastery across the three quiz modes.
//!
//! A word is mastered in a mode once it has been answered correctly in that mode,
//! and fully mastered once all three modes are recorded. Records only grow.

use super::{QuizMode, Word};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MasteryStore {
    records: BTreeMap<Word, BTreeSet<QuizMode>>,
}

impl MasteryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the store from one word set per mode, as kept in persistence.
    pub fn from_mode_sets(sets: impl IntoIterator<Item = (QuizMode, BTreeSet<Word>)>) -> Self {
        let mut store = Self::new();
        for (mode, words) in sets {
            for word in words {
                store.record_correct(&word, mode);
            }
        }
        store
    }

    /// Marks `word` as answered correctly in `mode`.
    /// Returns false when it was already recorded.
    pub fn record_correct(&mut self, word: &Word, mode: QuizMode) -> bool {
        if word.is_empty() {
            return false;
        }
        self.records.entry(word.clone()).or_default().insert(mode)
    }

    pub fn is_mastered_in(&self, word: &Word, mode: QuizMode) -> bool {
        self.records
            .get(word)
            .map(|modes| modes.contains(&mode))
            .unwrap_or(false)
    }

    pub fn is_fully_mastered(&self, word: &Word) -> bool {
        QuizMode::ALL
            .iter()
            .all(|&mode| self.is_mastered_in(word, mode))
    }

    pub fn modes_for(&self, word: &Word) -> BTreeSet<QuizMode> {
        self.records.get(word).cloned().unwrap_or_default()
    }

    pub fn words_mastered_in(&self, mode: QuizMode) -> BTreeSet<Word> {
        self.records
            .iter()
            .filter(|(_, modes)| modes.contains(&mode))
            .map(|(word, _)| word.clone())
            .collect()
    }

    /// Words recognised both from a clip and as a clip: these may be asked as type-in.
    pub fn unlocked_words(&self) -> BTreeSet<Word> {
        self.records
            .iter()
            .filter(|(_, modes)| QuizMode::RECOGNITION.iter().all(|m| modes.contains(m)))
            .map(|(word, _)| word.clone())
            .collect()
    }

    pub fn fully_mastered_count<'a>(&self, words: impl IntoIterator<Item = &'a Word>) -> usize {
        words
            .into_iter()
            .filter(|word| self.is_fully_mastered(word))
            .count()
    }

    pub fn tracked_word_count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        Word::from(s)
    }

    #[test]
    fn test_record_correct_is_idempotent() {
        let mut store = MasteryStore::new();
        assert!(store.record_correct(&word("hello"), QuizMode::MultipleChoice));
        assert!(!store.record_correct(&word("hello"), QuizMode::MultipleChoice));
        assert_eq!(store.modes_for(&word("hello")).len(), 1);
    }

    #[test]
    fn test_fully_mastered_requires_all_three_modes() {
        let mut store = MasteryStore::new();
        let hello = word("hello");

        for (i, mode) in QuizMode::ALL.iter().enumerate() {
            assert!(!store.is_fully_mastered(&hello), "after {} modes", i);
            store.record_correct(&hello, *mode);
        }
        assert!(store.is_fully_mastered(&hello));
    }

    #[test]
    fn test_same_mode_twice_is_not_mastery() {
        let mut store = MasteryStore::new();
        let bye = word("bye");
        store.record_correct(&bye, QuizMode::TypeIn);
        store.record_correct(&bye, QuizMode::TypeIn);
        store.record_correct(&bye, QuizMode::VideoSelect);
        assert!(!store.is_fully_mastered(&bye));
    }

    #[test]
    fn test_unknown_word_is_not_mastered() {
        let store = MasteryStore::new();
        assert!(!store.is_fully_mastered(&word("never seen")));
        assert!(store.modes_for(&word("never seen")).is_empty());
    }

    #[test]
    fn test_unlocked_words_need_both_recognition_modes() {
        let mut store = MasteryStore::new();
        store.record_correct(&word("hello"), QuizMode::MultipleChoice);
        store.record_correct(&word("hello"), QuizMode::VideoSelect);
        store.record_correct(&word("bye"), QuizMode::MultipleChoice);
        store.record_correct(&word("bye"), QuizMode::TypeIn);

        let unlocked = store.unlocked_words();
        assert_eq!(unlocked.len(), 1);
        assert!(unlocked.contains(&word("hello")));
    }

    #[test]
    fn test_mode_sets_round_trip() {
        let mut store = MasteryStore::new();
        store.record_correct(&word("father"), QuizMode::MultipleChoice);
        store.record_correct(&word("father"), QuizMode::TypeIn);
        store.record_correct(&word("mother"), QuizMode::VideoSelect);

        let rebuilt = MasteryStore::from_mode_sets(
            QuizMode::ALL.map(|mode| (mode, store.words_mastered_in(mode))),
        );
        assert_eq!(rebuilt, store);
    }

    #[test]
    fn test_fully_mastered_count() {
        let mut store = MasteryStore::new();
        for mode in QuizMode::ALL {
            store.record_correct(&word("hello"), mode);
        }
        store.record_correct(&word("bye"), QuizMode::TypeIn);

        let level = [word("hello"), word("bye")];
        assert_eq!(store.fully_mastered_count(&level), 1);
    }
}
