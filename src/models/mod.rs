pub mod level;
pub mod mastery;
pub mod progress;
pub mod progression;
pub mod question;
pub mod quiz_mode;
pub mod review_queue;
pub mod session;
pub mod stats;
pub mod synonyms;
pub mod word;

pub use level::{LevelCatalog, LevelNumber};
pub use mastery::MasteryStore;
pub use progress::Progress;
pub use progression::{Advancement, Progression};
pub use question::{Question, QuestionPayload, QuestionRequest, VideoOption};
pub use quiz_mode::QuizMode;
pub use review_queue::ReviewQueue;
pub use session::{AnswerOutcome, QuizSession, ReviewToggle, SessionState};
pub use stats::Stats;
pub use synonyms::SynonymTable;
pub use word::Word;
