//! Where questions come from.
//!
//! The session only talks to [`ContentProvider`]; the bundled implementation
//! builds questions from a local video folder.

pub mod library;
pub mod local;

use crate::error::Result;
use crate::models::{LevelCatalog, Question, QuestionRequest};

pub use library::{WordLibrary, load_word_library};
pub use local::LocalContentProvider;

pub trait ContentProvider {
    /// Chooses the word, mode and clips for the next question.
    fn next_question(&mut self, request: &QuestionRequest) -> Result<Question>;

    /// Level count and the word list of every level.
    fn level_catalog(&self) -> Result<LevelCatalog>;
}
