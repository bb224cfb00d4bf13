//! Words answered incorrectly, served back first-in first-out in review mode.
use super::Word;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewQueue {
    pending: VecDeque<Word>,
}

impl ReviewQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `word` unless it is already the most recent entry.
    /// Earlier, non-adjacent copies are kept so a word missed repeatedly is retried more often.
    pub fn enqueue(&mut self, word: Word) -> bool {
        if word.is_empty() || self.pending.back() == Some(&word) {
            return false;
        }
        self.pending.push_back(word);
        true
    }

    /// Removes the first occurrence of `word`. Returns whether anything was removed.
    pub fn dequeue_if_present(&mut self, word: &Word) -> bool {
        match self.pending.iter().position(|pending| pending == word) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn peek_next(&self) -> Option<&Word> {
        self.pending.front()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.pending.contains(word)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.pending.iter()
    }
}

impl FromIterator<Word> for ReviewQueue {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self {
            pending: iter.into_iter().filter(|w| !w.is_empty()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(words: &[&str]) -> ReviewQueue {
        words.iter().map(|w| Word::from(*w)).collect()
    }

    fn contents(q: &ReviewQueue) -> Vec<&str> {
        q.iter().map(Word::as_str).collect()
    }

    #[test]
    fn test_dequeue_removes_named_word() {
        let mut q = queue(&["hello", "bye"]);
        assert!(q.dequeue_if_present(&Word::from("bye")));
        assert_eq!(contents(&q), vec!["hello"]);
    }

    #[test]
    fn test_dequeue_absent_is_noop() {
        let mut q = queue(&["hello"]);
        assert!(!q.dequeue_if_present(&Word::from("bye")));
        assert_eq!(q.len(), 1);
        assert!(!q.dequeue_if_present(&Word::from("bye")));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_dequeue_removes_only_first_occurrence() {
        let mut q = queue(&["hello", "bye", "hello"]);
        assert!(q.dequeue_if_present(&Word::from("hello")));
        assert_eq!(contents(&q), vec!["bye", "hello"]);
    }

    #[test]
    fn test_peek_is_fifo_head() {
        let mut q = ReviewQueue::new();
        assert!(q.peek_next().is_none());
        q.enqueue(Word::from("father"));
        q.enqueue(Word::from("mother"));
        assert_eq!(q.peek_next(), Some(&Word::from("father")));
    }

    #[test]
    fn test_enqueue_collapses_back_to_back_duplicates() {
        let mut q = ReviewQueue::new();
        assert!(q.enqueue(Word::from("hello")));
        assert!(!q.enqueue(Word::from("Hello ")));
        assert!(q.enqueue(Word::from("bye")));
        assert!(q.enqueue(Word::from("hello")));
        assert_eq!(contents(&q), vec!["hello", "bye", "hello"]);
    }

    #[test]
    fn test_serializes_as_list() {
        let q = queue(&["hello", "bye"]);
        assert_eq!(serde_json::to_string(&q).unwrap(), r#"["hello","bye"]"#);
    }
}
