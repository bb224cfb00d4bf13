//! Word is a lowercase, trimmed vocabulary entry. Every input is normalized on the way in.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Word(String);

impl Word {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lowercases and trims an answer or identifier for comparison.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl From<String> for Word {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for Word {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
