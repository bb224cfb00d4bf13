//! Runtime configuration.
//!
//! Read from `sign_quiz.json` in the working directory when it exists; every
//! field is optional and falls back to the defaults below.

use crate::error::{QuizError, Result};
use crate::models::SynonymTable;
use crate::models::synonyms::default_synonyms;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "sign_quiz.json";

fn default_video_dir() -> PathBuf {
    PathBuf::from("Video Data")
}

fn default_database_path() -> PathBuf {
    PathBuf::from("db.sqlite3")
}

const fn default_words_per_level() -> usize {
    15
}

const fn default_level_seed() -> u64 {
    42
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// One sub-directory per word, holding that word's clips.
    #[serde(default = "default_video_dir")]
    pub video_dir: PathBuf,

    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    #[serde(default = "default_words_per_level")]
    pub words_per_level: usize,

    /// Seed for the level shuffle; keeping it fixed keeps each word in the same level across runs.
    #[serde(default = "default_level_seed")]
    pub level_seed: u64,

    /// Add a word to the review queue when it is answered incorrectly outside review mode.
    #[serde(default = "default_true")]
    pub enqueue_missed_words: bool,

    /// Canonical word to accepted alternate answers.
    #[serde(default = "default_synonyms")]
    pub synonyms: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            video_dir: default_video_dir(),
            database_path: default_database_path(),
            words_per_level: default_words_per_level(),
            level_seed: default_level_seed(),
            enqueue_missed_words: default_true(),
            synonyms: default_synonyms(),
        }
    }
}

impl Config {
    /// Loads `sign_quiz.json` from `dir`, or the defaults when the file is absent.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| QuizError::config_parse(path, e.to_string()))?;
        config.validate(path)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.words_per_level == 0 {
            return Err(QuizError::config_parse(
                path,
                "wordsPerLevel must be greater than 0",
            ));
        }
        Ok(())
    }

    pub fn synonym_table(&self) -> SynonymTable {
        SynonymTable::from_entries(&self.synonyms)
    }
}
