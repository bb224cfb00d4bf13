//! A single served question and the clip references it carries.
use super::level::LevelNumber;
use super::{QuizMode, Word};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// What the session asks the content provider for.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionRequest {
    pub level: LevelNumber,
    /// Words mastered in both recognition modes; only these may be asked as type-in.
    pub unlocked_words: BTreeSet<Word>,
    /// Review target. The provider serves this word when it knows it.
    pub target_word: Option<Word>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoOption {
    pub word: Word,
    pub video: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum QuestionPayload {
    MultipleChoice { video: PathBuf, options: Vec<Word> },
    VideoSelect { options: Vec<VideoOption> },
    TypeIn { video: PathBuf },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub word: Word,
    pub payload: QuestionPayload,
    /// Size of the level the question was drawn for.
    pub level_word_count: usize,
}

impl Question {
    pub fn mode(&self) -> QuizMode {
        match self.payload {
            QuestionPayload::MultipleChoice { .. } => QuizMode::MultipleChoice,
            QuestionPayload::VideoSelect { .. } => QuizMode::VideoSelect,
            QuestionPayload::TypeIn { .. } => QuizMode::TypeIn,
        }
    }

    /// The clip shown as the prompt, if the mode has one.
    pub fn prompt_video(&self) -> Option<&PathBuf> {
        match &self.payload {
            QuestionPayload::MultipleChoice { video, .. } | QuestionPayload::TypeIn { video } => {
                Some(video)
            }
            QuestionPayload::VideoSelect { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_follows_payload() {
        let q = Question {
            word: Word::from("hello"),
            payload: QuestionPayload::TypeIn {
                video: PathBuf::from("hello/1.mp4"),
            },
            level_word_count: 15,
        };
        assert_eq!(q.mode(), QuizMode::TypeIn);
        assert_eq!(q.prompt_video(), Some(&PathBuf::from("hello/1.mp4")));
    }

    #[test]
    fn test_video_select_has_no_prompt_clip() {
        let q = Question {
            word: Word::from("bye"),
            payload: QuestionPayload::VideoSelect { options: vec![] },
            level_word_count: 2,
        };
        assert_eq!(q.mode(), QuizMode::VideoSelect);
        assert!(q.prompt_video().is_none());
    }
}
