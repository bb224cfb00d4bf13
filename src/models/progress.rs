//! Everything about a learner that survives a restart.
use super::{MasteryStore, Progression, ReviewQueue, Stats};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(rename = "currentLevel", default)]
    pub progression: Progression,
    #[serde(default)]
    pub mastery: MasteryStore,
    #[serde(default)]
    pub review_queue: ReviewQueue,
    #[serde(default)]
    pub stats: Stats,
}

impl Progress {
    pub fn current_level(&self) -> u32 {
        self.progression.current_level()
    }
}
