//! Question builder over a [`WordLibrary`].
//!
//! Mode selection for a level:
//! - no unlocked words in the level: multiple-choice or video-select, any level word;
//! - otherwise any of the three modes, with type-in drawn from the unlocked words only.
//!
//! A review target is served whenever the library knows it, whatever level it
//! belongs to, and is only asked as type-in once it is unlocked.

use super::ContentProvider;
use super::library::{WordLibrary, load_word_library};
use crate::config::Config;
use crate::error::{QuizError, Result};
use crate::models::level::{assign_gated_levels, level_name};
use crate::models::{
    LevelCatalog, Question, QuestionPayload, QuestionRequest, QuizMode, VideoOption, Word,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::path::PathBuf;

const DISTRACTOR_COUNT: usize = 3;

pub struct LocalContentProvider {
    library: WordLibrary,
    catalog: LevelCatalog,
    rng: StdRng,
}

impl LocalContentProvider {
    pub fn new(library: WordLibrary, words_per_level: usize, level_seed: u64, rng: StdRng) -> Self {
        let catalog = assign_gated_levels(
            &library.words(),
            words_per_level,
            &mut StdRng::seed_from_u64(level_seed),
        );
        Self::with_catalog(library, catalog, rng)
    }

    /// Uses a fixed catalog instead of shuffling the library into levels.
    pub fn with_catalog(library: WordLibrary, catalog: LevelCatalog, rng: StdRng) -> Self {
        Self {
            library,
            catalog,
            rng,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let library = load_word_library(&config.video_dir)?;
        Ok(Self::new(
            library,
            config.words_per_level,
            config.level_seed,
            StdRng::from_os_rng(),
        ))
    }

    pub fn library(&self) -> &WordLibrary {
        &self.library
    }

    fn choose_word_and_mode(&mut self, request: &QuestionRequest) -> Result<(Word, QuizMode)> {
        let level_words = self.catalog.words_for(request.level);
        if level_words.is_empty() {
            return Err(QuizError::content_unavailable(format!(
                "No words available for the level: {}",
                level_name(request.level)
            )));
        }

        if let Some(target) = request
            .target_word
            .as_ref()
            .filter(|w| self.library.contains(w))
        {
            let modes: &[QuizMode] = if request.unlocked_words.contains(target) {
                &QuizMode::ALL
            } else {
                &QuizMode::RECOGNITION
            };
            let mode = *modes
                .choose(&mut self.rng)
                .ok_or_else(|| QuizError::content_unavailable("No quiz mode available"))?;
            return Ok((target.clone(), mode));
        }

        let unlocked: Vec<&Word> = level_words
            .iter()
            .filter(|w| request.unlocked_words.contains(*w))
            .collect();

        let modes: &[QuizMode] = if unlocked.is_empty() {
            &QuizMode::RECOGNITION
        } else {
            &QuizMode::ALL
        };
        let mode = *modes
            .choose(&mut self.rng)
            .ok_or_else(|| QuizError::content_unavailable("No quiz mode available"))?;

        let pool: Vec<&Word> = if mode == QuizMode::TypeIn {
            unlocked
        } else {
            level_words.iter().collect()
        };
        let word = pool.choose(&mut self.rng).map(|w| (*w).clone()).ok_or_else(|| {
            QuizError::content_unavailable("No words available for quiz in the selected mode/level.")
        })?;

        Ok((word, mode))
    }

    fn random_clip(&mut self, word: &Word) -> Result<PathBuf> {
        self.library
            .clips_for(word)
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| QuizError::content_unavailable(format!("No videos found for {}", word)))
    }

    fn distractors(&mut self, correct: &Word) -> Vec<Word> {
        let candidates: Vec<Word> = self
            .library
            .words()
            .into_iter()
            .filter(|w| w != correct)
            .collect();
        candidates
            .choose_multiple(&mut self.rng, DISTRACTOR_COUNT)
            .cloned()
            .collect()
    }
}

impl ContentProvider for LocalContentProvider {
    fn next_question(&mut self, request: &QuestionRequest) -> Result<Question> {
        let (word, mode) = self.choose_word_and_mode(request)?;
        let distractors = self.distractors(&word);

        let payload = match mode {
            QuizMode::MultipleChoice => {
                let video = self.random_clip(&word)?;
                let mut options = distractors;
                options.push(word.clone());
                options.shuffle(&mut self.rng);
                QuestionPayload::MultipleChoice { video, options }
            }
            QuizMode::TypeIn => QuestionPayload::TypeIn {
                video: self.random_clip(&word)?,
            },
            QuizMode::VideoSelect => {
                let mut options = vec![VideoOption {
                    word: word.clone(),
                    video: self.random_clip(&word)?,
                }];
                for distractor in distractors {
                    if let Ok(video) = self.random_clip(&distractor) {
                        options.push(VideoOption {
                            word: distractor,
                            video,
                        });
                    }
                }
                options.shuffle(&mut self.rng);
                QuestionPayload::VideoSelect { options }
            }
        };

        tracing::debug!(word = %word, mode = %mode, level = request.level, "built question");
        Ok(Question {
            word,
            payload,
            level_word_count: self.catalog.words_for(request.level).len(),
        })
    }

    fn level_catalog(&self) -> Result<LevelCatalog> {
        Ok(self.catalog.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn library(words: &[&str]) -> WordLibrary {
        let clips: BTreeMap<Word, Vec<PathBuf>> = words
            .iter()
            .map(|w| (Word::from(*w), vec![PathBuf::from(format!("{}/1.mp4", w))]))
            .collect();
        WordLibrary::new(clips)
    }

    fn provider(levels: Vec<Vec<&str>>, extra: &[&str]) -> LocalContentProvider {
        let mut all: Vec<&str> = levels.iter().flatten().copied().collect();
        all.extend_from_slice(extra);
        let catalog = LevelCatalog::new(
            levels
                .into_iter()
                .map(|l| l.into_iter().map(Word::from).collect())
                .collect(),
        );
        LocalContentProvider::with_catalog(library(&all), catalog, StdRng::seed_from_u64(3))
    }

    fn request(level: u32, unlocked: &[&str], target: Option<&str>) -> QuestionRequest {
        QuestionRequest {
            level,
            unlocked_words: unlocked.iter().map(|w| Word::from(*w)).collect(),
            target_word: target.map(Word::from),
        }
    }

    #[test]
    fn test_unknown_level_is_content_unavailable() {
        let mut p = provider(vec![vec!["hello", "bye"]], &[]);
        let err = p.next_question(&request(5, &[], None)).unwrap_err();
        assert!(matches!(err, QuizError::ContentUnavailable { .. }));
        assert!(err.to_string().contains("Level 5"));
    }

    #[test]
    fn test_no_type_in_before_unlock() {
        let mut p = provider(vec![vec!["hello", "bye", "father"]], &["mother"]);
        for _ in 0..50 {
            let q = p.next_question(&request(1, &[], None)).unwrap();
            assert_ne!(q.mode(), QuizMode::TypeIn);
            assert!(["hello", "bye", "father"].contains(&q.word.as_str()));
            assert_eq!(q.level_word_count, 3);
        }
    }

    #[test]
    fn test_type_in_only_for_unlocked_words() {
        let mut p = provider(vec![vec!["hello", "bye", "father"]], &[]);
        let mut saw_type_in = false;
        for _ in 0..100 {
            let q = p.next_question(&request(1, &["bye"], None)).unwrap();
            if q.mode() == QuizMode::TypeIn {
                saw_type_in = true;
                assert_eq!(q.word.as_str(), "bye");
            }
        }
        assert!(saw_type_in);
    }

    #[test]
    fn test_review_target_from_other_level_is_served() {
        let mut p = provider(vec![vec!["hello", "bye"], vec!["father", "mother"]], &[]);
        for _ in 0..20 {
            let q = p.next_question(&request(2, &[], Some("hello"))).unwrap();
            assert_eq!(q.word.as_str(), "hello");
            assert_ne!(q.mode(), QuizMode::TypeIn);
        }
    }

    #[test]
    fn test_unknown_review_target_falls_back_to_level() {
        let mut p = provider(vec![vec!["hello", "bye"]], &[]);
        let q = p.next_question(&request(1, &[], Some("zebra"))).unwrap();
        assert!(["hello", "bye"].contains(&q.word.as_str()));
    }

    #[test]
    fn test_options_include_answer_and_distinct_distractors() {
        let mut p = provider(vec![vec!["hello", "bye"]], &["father", "mother", "yes"]);
        for _ in 0..50 {
            let q = p.next_question(&request(1, &[], None)).unwrap();
            let words: Vec<Word> = match &q.payload {
                QuestionPayload::MultipleChoice { options, .. } => options.clone(),
                QuestionPayload::VideoSelect { options } => {
                    options.iter().map(|o| o.word.clone()).collect()
                }
                QuestionPayload::TypeIn { .. } => unreachable!("nothing is unlocked"),
            };
            assert_eq!(words.len(), 4);
            assert!(words.contains(&q.word));
            let unique: BTreeSet<&Word> = words.iter().collect();
            assert_eq!(unique.len(), 4);
        }
    }

    #[test]
    fn test_small_library_gets_fewer_distractors() {
        let mut p = provider(vec![vec!["hello", "bye"]], &[]);
        let q = p.next_question(&request(1, &[], None)).unwrap();
        match &q.payload {
            QuestionPayload::MultipleChoice { options, .. } => assert_eq!(options.len(), 2),
            QuestionPayload::VideoSelect { options } => assert_eq!(options.len(), 2),
            QuestionPayload::TypeIn { .. } => panic!("nothing is unlocked"),
        }
    }

    #[test]
    fn test_seeded_levels_cover_library() {
        let p = LocalContentProvider::new(
            library(&["a", "b", "c", "d", "e"]),
            2,
            42,
            StdRng::seed_from_u64(0),
        );
        let catalog = p.level_catalog().unwrap();
        assert_eq!(catalog.total_levels(), 3);
        assert_eq!(catalog.words_for(3).len(), 1);
    }
}
