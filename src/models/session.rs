//! Quiz session: serves one question at a time and applies the answer to the learner's progress.
//!
//! States: `Idle -> AwaitingAnswer -> Answered -> (next question)`.
//! Every command takes `&mut self`, so an answer is fully applied and persisted
//! before another command can run.

use super::{
    Advancement, Progress, Question, QuestionRequest, QuizMode, SynonymTable, Word,
};
use crate::config::Config;
use crate::content::ContentProvider;
use crate::database::ProgressStore;
use crate::error::{QuizError, Result};
use chrono::Utc;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingAnswer,
    Answered,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::AwaitingAnswer => write!(f, "awaiting_answer"),
            SessionState::Answered => write!(f, "answered"),
        }
    }
}

/// Result of one answer, for the host to render.
#[derive(Clone, Debug, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_word: Word,
    pub mode: QuizMode,
    pub advancement: Advancement,
    /// The last pending review word was cleared and review mode was switched off.
    pub review_finished: bool,
    /// The missed word was added to the review queue.
    pub enqueued: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewToggle {
    Entered { pending: usize },
    Exited,
    /// Nothing to review; review mode stays off.
    QueueEmpty,
}

impl ReviewToggle {
    pub fn message(&self) -> String {
        match self {
            ReviewToggle::Entered { pending } => {
                format!("Review mode: {} word(s) to practice.", pending)
            }
            ReviewToggle::Exited => "Back to regular practice.".to_string(),
            ReviewToggle::QueueEmpty => QuizError::EmptyReviewQueue.to_string(),
        }
    }
}

pub struct QuizSession<P, S> {
    provider: P,
    store: S,
    progress: Progress,
    synonyms: SynonymTable,
    enqueue_missed_words: bool,
    state: SessionState,
    current: Option<Question>,
    review_mode: bool,
    total_levels: Option<u32>,
}

impl<P: ContentProvider, S: ProgressStore> QuizSession<P, S> {
    /// Restores progress from `store` and starts idle in regular mode.
    pub fn new(
        provider: P,
        store: S,
        synonyms: SynonymTable,
        enqueue_missed_words: bool,
    ) -> Result<Self> {
        let progress = store.load_progress()?;
        let total_levels = provider
            .level_catalog()
            .ok()
            .map(|catalog| catalog.total_levels());
        tracing::info!(
            level = progress.current_level(),
            review_pending = progress.review_queue.len(),
            "restored progress"
        );
        Ok(Self {
            provider,
            store,
            progress,
            synonyms,
            enqueue_missed_words,
            state: SessionState::Idle,
            current: None,
            review_mode: false,
            total_levels,
        })
    }

    pub fn from_config(provider: P, store: S, config: &Config) -> Result<Self> {
        Self::new(
            provider,
            store,
            config.synonym_table(),
            config.enqueue_missed_words,
        )
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn is_review_mode(&self) -> bool {
        self.review_mode
    }

    pub fn review_count(&self) -> usize {
        self.progress.review_queue.len()
    }

    /// Level count seen at the last catalog fetch; `None` while the catalog is unavailable.
    pub fn total_levels(&self) -> Option<u32> {
        self.total_levels
    }

    /// Fetches the next question. In review mode the head of the review queue is asked.
    ///
    /// A review word the provider cannot serve is dropped and the next one is asked;
    /// once the queue runs dry the provider's question is served in regular mode.
    /// On a provider failure the session is left idle, so the call can simply be repeated.
    pub fn start_question(&mut self) -> Result<&Question> {
        if self.state == SessionState::AwaitingAnswer {
            return Err(QuizError::invalid_transition(
                self.state,
                SessionState::AwaitingAnswer,
            ));
        }
        self.state = SessionState::Idle;
        self.current = None;

        let mut dropped = false;
        let served = loop {
            let target = if self.review_mode {
                match self.progress.review_queue.peek_next() {
                    Some(word) => Some(word.clone()),
                    None => {
                        self.review_mode = false;
                        return Err(QuizError::EmptyReviewQueue);
                    }
                }
            } else {
                None
            };

            let request = QuestionRequest {
                level: self.progress.current_level(),
                unlocked_words: self.progress.mastery.unlocked_words(),
                target_word: target.clone(),
            };
            let question = match self.provider.next_question(&request) {
                Ok(question) => question,
                Err(e) => {
                    tracing::warn!(error = %e, level = request.level, "could not load question");
                    break Err(e);
                }
            };

            match target {
                Some(target) if target != question.word => {
                    // The provider no longer knows this word; keep it from blocking review.
                    tracing::warn!(word = %target, "dropping review word without content");
                    self.progress.review_queue.dequeue_if_present(&target);
                    dropped = true;
                    if self.progress.review_queue.is_empty() {
                        self.review_mode = false;
                        tracing::info!("review queue cleared, serving a regular question");
                        break Ok(question);
                    }
                }
                _ => break Ok(question),
            }
        };

        if dropped {
            self.store.save_review_queue(&self.progress.review_queue)?;
        }
        let question = served?;

        tracing::debug!(word = %question.word, mode = %question.mode(), review = self.review_mode, "serving question");
        self.state = SessionState::AwaitingAnswer;
        let question: &Question = self.current.insert(question);
        Ok(question)
    }

    /// Same as [`start_question`](Self::start_question); used after an answer.
    pub fn request_next(&mut self) -> Result<&Question> {
        self.start_question()
    }

    /// Checks `raw_answer` against the current word and its synonyms, then updates
    /// mastery (regular mode) or the review queue (review mode) and persists.
    pub fn submit_answer(&mut self, raw_answer: &str) -> Result<AnswerOutcome> {
        let question = match (&self.current, self.state) {
            (Some(question), SessionState::AwaitingAnswer) => question,
            _ => {
                return Err(QuizError::invalid_transition(
                    self.state,
                    SessionState::Answered,
                ));
            }
        };
        let word = question.word.clone();
        let mode = question.mode();
        let correct = self.synonyms.accepts(&word, raw_answer);

        // Applied to a copy first so a failed save leaves the session untouched.
        let mut next = self.progress.clone();
        let mut review_mode = self.review_mode;
        let mut advancement = Advancement::NotYetComplete;
        let mut review_finished = false;
        let mut enqueued = false;

        if correct {
            if review_mode {
                if next.review_queue.dequeue_if_present(&word) && next.review_queue.is_empty() {
                    review_mode = false;
                    review_finished = true;
                }
            } else {
                next.mastery.record_correct(&word, mode);
                advancement = self.check_advancement(&mut next, review_mode);
            }
        } else if !review_mode && self.enqueue_missed_words {
            enqueued = next.review_queue.enqueue(word.clone());
        }
        next.stats.record_answer(correct, Utc::now());

        self.store.save_progress(&next).inspect_err(|e| {
            tracing::warn!(error = %e, word = %word, "could not save answer, question stays open");
        })?;

        self.progress = next;
        self.review_mode = review_mode;
        self.state = SessionState::Answered;
        if review_finished {
            tracing::info!("review queue cleared, leaving review mode");
        }
        tracing::debug!(word = %word, mode = %mode, correct, "answer checked");

        Ok(AnswerOutcome {
            correct,
            correct_word: word,
            mode,
            advancement,
            review_finished,
            enqueued,
        })
    }

    /// Switches review mode for the next question. Not allowed while a question is open.
    pub fn toggle_review_mode(&mut self) -> Result<ReviewToggle> {
        if self.state == SessionState::AwaitingAnswer {
            return Err(QuizError::invalid_transition(self.state, "review_toggle"));
        }

        let toggle = if self.review_mode {
            self.review_mode = false;
            ReviewToggle::Exited
        } else if self.progress.review_queue.is_empty() {
            ReviewToggle::QueueEmpty
        } else {
            self.review_mode = true;
            ReviewToggle::Entered {
                pending: self.progress.review_queue.len(),
            }
        };
        tracing::debug!(?toggle, "review mode toggled");
        Ok(toggle)
    }

    /// Replaces all progress (e.g. after an import) and returns to idle regular mode.
    pub fn replace_progress(&mut self, progress: Progress) -> Result<()> {
        self.store.save_progress(&progress)?;
        self.progress = progress;
        self.state = SessionState::Idle;
        self.current = None;
        self.review_mode = false;
        Ok(())
    }

    fn check_advancement(&mut self, progress: &mut Progress, review_mode: bool) -> Advancement {
        let catalog = match self.provider.level_catalog() {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(error = %e, "level catalog unavailable, skipping level check");
                return Advancement::NotYetComplete;
            }
        };
        self.total_levels = Some(catalog.total_levels());
        let level = progress.current_level();
        progress.progression.check_advancement(
            catalog.words_for(level),
            catalog.total_levels(),
            &progress.mastery,
            review_mode,
        )
    }
}
