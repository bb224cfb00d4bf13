//! Accepted alternate answers, keyed by canonical word.
//!
//! The mapping is one-directional: "dad" is accepted for "father",
//! but "father" is not accepted for "dad" unless "dad" has its own entry.

use super::Word;
use super::word::normalize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SynonymTable {
    alternates: BTreeMap<Word, BTreeSet<Word>>,
}

impl SynonymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from raw config entries, normalizing both sides.
    pub fn from_entries<K, V, I>(entries: impl IntoIterator<Item = (K, I)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = V>,
    {
        let mut table = Self::new();
        for (canonical, alternates) in entries {
            for alternate in alternates {
                table.insert(canonical.as_ref(), alternate.as_ref());
            }
        }
        table
    }

    pub fn insert(&mut self, canonical: &str, alternate: &str) {
        let alternate = Word::new(alternate);
        if alternate.is_empty() {
            return;
        }
        self.alternates
            .entry(Word::new(canonical))
            .or_default()
            .insert(alternate);
    }

    pub fn alternates_for(&self, canonical: &Word) -> impl Iterator<Item = &Word> {
        self.alternates.get(canonical).into_iter().flatten()
    }

    /// True if `raw_answer` equals `target` after normalization or is one of its alternates.
    pub fn accepts(&self, target: &Word, raw_answer: &str) -> bool {
        let answer = normalize(raw_answer);
        if answer == target.as_str() {
            return true;
        }
        self.alternates
            .get(target)
            .map(|alts| alts.iter().any(|alt| alt.as_str() == answer))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.alternates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternates.is_empty()
    }
}

/// The built-in table used when no config overrides it.
pub fn default_synonyms() -> BTreeMap<String, Vec<String>> {
    [
        ("father", vec!["dad", "daddy"]),
        ("mother", vec!["mom", "mommy"]),
        ("hello", vec!["hi", "greetings"]),
        ("bye", vec!["goodbye"]),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.into_iter().map(String::from).collect()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SynonymTable {
        SynonymTable::from_entries(default_synonyms())
    }

    #[test]
    fn test_exact_answer_is_accepted() {
        assert!(table().accepts(&Word::from("hello"), "hello"));
        assert!(table().accepts(&Word::from("thank you"), "  Thank You"));
    }

    #[test]
    fn test_synonym_is_accepted() {
        assert!(table().accepts(&Word::from("father"), "dad"));
        assert!(table().accepts(&Word::from("mother"), " Mommy "));
    }

    #[test]
    fn test_mapping_is_one_directional() {
        assert!(table().accepts(&Word::from("father"), "dad"));
        assert!(!table().accepts(&Word::from("dad"), "father"));
    }

    #[test]
    fn test_unrelated_answer_is_rejected() {
        assert!(!table().accepts(&Word::from("father"), "mom"));
        assert!(!table().accepts(&Word::from("bye"), ""));
    }

    #[test]
    fn test_entries_are_normalized() {
        let table = SynonymTable::from_entries([("Thanks", vec![" THX "])]);
        assert!(table.accepts(&Word::from("thanks"), "thx"));
        assert_eq!(table.alternates_for(&Word::from("thanks")).count(), 1);
    }
}
