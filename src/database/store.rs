//! Typed access to persisted progress over a plain key-value backend.
//!
//! Values are JSON text. An unset key yields the field's default; a value that
//! fails to parse is logged and also yields the default, so a damaged entry never
//! blocks a session.

use crate::error::Result;
use crate::models::level::{FIRST_LEVEL, LevelNumber};
use crate::models::{MasteryStore, Progress, Progression, QuizMode, ReviewQueue, Stats, Word};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeSet, HashMap};

pub const CURRENT_LEVEL_KEY: &str = "current_level";
pub const SCORE_KEY: &str = "score";
pub const STREAK_KEY: &str = "streak";
pub const BEST_STREAK_KEY: &str = "best_streak";
pub const LAST_CORRECT_KEY: &str = "last_correct_at";
pub const REVIEW_QUEUE_KEY: &str = "review_queue";

pub fn mastered_key(mode: QuizMode) -> String {
    format!("mastered_{}", mode.key())
}

pub trait ProgressStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn load_current_level(&self) -> Result<LevelNumber> {
        Ok(read_or(self, CURRENT_LEVEL_KEY, FIRST_LEVEL)?.max(FIRST_LEVEL))
    }

    fn save_current_level(&mut self, level: LevelNumber) -> Result<()> {
        write_json(self, CURRENT_LEVEL_KEY, &level)
    }

    fn load_mastered(&self, mode: QuizMode) -> Result<BTreeSet<Word>> {
        let mut words: BTreeSet<Word> = read_or(self, &mastered_key(mode), BTreeSet::new())?;
        words.retain(|w| !w.is_empty());
        Ok(words)
    }

    fn save_mastered(&mut self, mode: QuizMode, words: &BTreeSet<Word>) -> Result<()> {
        write_json(self, &mastered_key(mode), words)
    }

    fn load_score(&self) -> Result<u32> {
        read_or(self, SCORE_KEY, 0)
    }

    fn save_score(&mut self, score: u32) -> Result<()> {
        write_json(self, SCORE_KEY, &score)
    }

    fn load_streak(&self) -> Result<u32> {
        read_or(self, STREAK_KEY, 0)
    }

    fn save_streak(&mut self, streak: u32) -> Result<()> {
        write_json(self, STREAK_KEY, &streak)
    }

    fn load_review_queue(&self) -> Result<ReviewQueue> {
        read_or(self, REVIEW_QUEUE_KEY, ReviewQueue::new())
    }

    fn save_review_queue(&mut self, queue: &ReviewQueue) -> Result<()> {
        write_json(self, REVIEW_QUEUE_KEY, queue)
    }

    fn load_progress(&self) -> Result<Progress> {
        let mastery = MasteryStore::from_mode_sets(
            QuizMode::ALL
                .into_iter()
                .map(|mode| self.load_mastered(mode).map(|words| (mode, words)))
                .collect::<Result<Vec<_>>>()?,
        );
        let stats = Stats {
            score: self.load_score()?,
            streak: self.load_streak()?,
            best_streak: read_or(self, BEST_STREAK_KEY, 0)?,
            last_correct_at: read_or::<Option<DateTime<Utc>>, _>(self, LAST_CORRECT_KEY, None)?,
        };

        Ok(Progress {
            progression: Progression::at_level(self.load_current_level()?),
            mastery,
            review_queue: self.load_review_queue()?,
            stats,
        })
    }

    fn save_progress(&mut self, progress: &Progress) -> Result<()> {
        for (key, value) in progress_entries(progress)? {
            self.set(&key, &value)?;
        }
        Ok(())
    }
}

/// Every persisted field of `progress` as (key, JSON value) pairs.
pub fn progress_entries(progress: &Progress) -> Result<Vec<(String, String)>> {
    let mut entries = vec![
        (
            CURRENT_LEVEL_KEY.to_string(),
            serde_json::to_string(&progress.current_level())?,
        ),
        (
            REVIEW_QUEUE_KEY.to_string(),
            serde_json::to_string(&progress.review_queue)?,
        ),
        (SCORE_KEY.to_string(), serde_json::to_string(&progress.stats.score)?),
        (STREAK_KEY.to_string(), serde_json::to_string(&progress.stats.streak)?),
        (
            BEST_STREAK_KEY.to_string(),
            serde_json::to_string(&progress.stats.best_streak)?,
        ),
        (
            LAST_CORRECT_KEY.to_string(),
            serde_json::to_string(&progress.stats.last_correct_at)?,
        ),
    ];
    for mode in QuizMode::ALL {
        entries.push((
            mastered_key(mode),
            serde_json::to_string(&progress.mastery.words_mastered_in(mode))?,
        ));
    }
    Ok(entries)
}

fn read_or<T, S>(store: &S, key: &str, default: T) -> Result<T>
where
    T: DeserializeOwned,
    S: ProgressStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(default);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed persisted value, using default");
            Ok(default)
        }
    }
}

fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: ProgressStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Process-local store used by tests and by hosts without a database.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
