//! Error types shared by the quiz core, the content provider and persistence.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// The content provider could not produce a question or the level catalog.
    /// Nothing was mutated; the user can simply ask again.
    #[error("Failed to load quiz data: {message}")]
    ContentUnavailable { message: String },

    /// A review question was requested but no words are waiting for review.
    #[error("Your review list is empty! Keep practicing to fill it up.")]
    EmptyReviewQueue,

    /// A command was issued in a session state that does not accept it.
    #[error("Invalid session transition: cannot go from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Invalid config file '{path}': {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuizError {
    pub fn content_unavailable(message: impl Into<String>) -> Self {
        Self::ContentUnavailable {
            message: message.into(),
        }
    }

    pub fn invalid_transition(from: impl std::fmt::Display, to: impl std::fmt::Display) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True when asking again (next question, reload) may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ContentUnavailable { .. } | Self::Storage(_))
    }

    /// True for conditions that are shown to the user as a status, not a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::EmptyReviewQueue)
    }
}
