pub mod config;
pub mod content;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use config::Config;
pub use content::{ContentProvider, LocalContentProvider};
pub use database::{MemoryStore, ProgressStore, SqliteStore};
pub use error::{QuizError, Result};
pub use models::{
    Advancement, AnswerOutcome, MasteryStore, Progress, Progression, Question, QuizMode,
    QuizSession, ReviewQueue, ReviewToggle, SessionState, Word,
};
