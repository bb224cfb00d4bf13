//! Levels are ordered difficulty tiers, each with its own word list.
use super::Word;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Levels are numbered from 1.
pub type LevelNumber = u32;

pub const FIRST_LEVEL: LevelNumber = 1;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<Vec<Word>>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<Vec<Word>>) -> Self {
        Self { levels }
    }

    pub fn total_levels(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Words of `level`, or an empty slice for a level outside the catalog.
    pub fn words_for(&self, level: LevelNumber) -> &[Word] {
        level
            .checked_sub(1)
            .and_then(|idx| self.levels.get(idx as usize))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_level(&self, level: LevelNumber) -> bool {
        level >= FIRST_LEVEL && level <= self.total_levels()
    }

    pub fn level_of(&self, word: &Word) -> Option<LevelNumber> {
        self.levels
            .iter()
            .position(|words| words.contains(word))
            .map(|idx| idx as LevelNumber + 1)
    }
}

/// Display name of a level, as shown in the header and in provider errors.
pub fn level_name(level: LevelNumber) -> String {
    format!("Level {}", level)
}

/// Shuffles `words` and cuts them into consecutive levels of `words_per_level`.
/// The last level holds the remainder.
pub fn assign_gated_levels<R: Rng + ?Sized>(
    words: &[Word],
    words_per_level: usize,
    rng: &mut R,
) -> LevelCatalog {
    if words.is_empty() || words_per_level == 0 {
        return LevelCatalog::default();
    }

    let mut shuffled = words.to_vec();
    shuffled.shuffle(rng);

    let levels: Vec<Vec<Word>> = shuffled
        .chunks(words_per_level)
        .map(<[Word]>::to_vec)
        .collect();

    tracing::info!(
        words = words.len(),
        levels = levels.len(),
        words_per_level,
        "assigned words to gated levels"
    );
    LevelCatalog::new(levels)
}
