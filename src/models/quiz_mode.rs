//! The three ways a word can be asked.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QuizMode {
    /// Watch a clip, pick the word from a list.
    #[serde(rename = "mcq")]
    MultipleChoice,
    /// Read a word, pick the clip that signs it.
    #[serde(rename = "video_select")]
    VideoSelect,
    /// Watch a clip, type the word.
    #[serde(rename = "typein")]
    TypeIn,
}

impl QuizMode {
    pub const ALL: [QuizMode; 3] = [
        QuizMode::MultipleChoice,
        QuizMode::VideoSelect,
        QuizMode::TypeIn,
    ];

    /// Modes available before a word is unlocked for typing.
    pub const RECOGNITION: [QuizMode; 2] = [QuizMode::MultipleChoice, QuizMode::VideoSelect];

    pub fn key(self) -> &'static str {
        match self {
            QuizMode::MultipleChoice => "mcq",
            QuizMode::VideoSelect => "video_select",
            QuizMode::TypeIn => "typein",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuizMode::MultipleChoice => "Multiple Choice",
            QuizMode::VideoSelect => "Video Select",
            QuizMode::TypeIn => "Type In",
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
