//! Quest Progress Tracking
//!
//! One persisted record per player: the active quest, accumulated progress
//! per requirement key, and the lifecycle flags the reward gate drives.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::definition::{QuestCatalog, QuestId};

pub type PlayerId = u64;

/// Per-player quest progress. Progress is cleared whenever the active quest
/// changes; values are always clamped to the requirement target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestProgress {
    pub quest_id: QuestId,
    #[serde(default)]
    pub progress: HashMap<String, i32>,
    /// Player has explicitly opted in with the quest command.
    #[serde(default)]
    pub started: bool,
    /// Requirements met and rewards delivered; with no successor quest this
    /// marks the chain complete.
    #[serde(default)]
    pub completed: bool,
    /// Reward delivery is owed: blocked on capacity or waiting on the
    /// delivery delay. The durable resume indicator across restarts.
    #[serde(default)]
    pub reward_pending: bool,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl QuestProgress {
    pub fn new(quest_id: QuestId) -> Self {
        Self {
            quest_id,
            progress: HashMap::new(),
            started: false,
            completed: false,
            reward_pending: false,
            started_at: None,
            completed_at: None,
        }
    }

    /// Move to the next quest in the chain.
    pub fn advance(&mut self) {
        self.quest_id += 1;
        self.progress = HashMap::new();
        self.completed = false;
        self.reward_pending = false;
        self.started_at = Some(Utc::now());
        self.completed_at = None;
    }

    /// Reset to a specific quest, keeping the record opted in.
    pub fn reset_to(&mut self, quest_id: QuestId) {
        self.quest_id = quest_id;
        self.progress = HashMap::new();
        self.completed = false;
        self.reward_pending = false;
        self.started = true;
        self.started_at = Some(Utc::now());
        self.completed_at = None;
    }

    pub fn amount_for(&self, key: &str) -> i32 {
        self.progress.get(key).copied().unwrap_or(0)
    }
}

// ============================================================================
// Progress Store
// ============================================================================

/// All loaded player progress records. Records are created lazily and
/// migrated forward when found completed with a successor quest available
/// (self-healing after a crash between delivery and advance).
#[derive(Default)]
pub struct ProgressStore {
    records: HashMap<PlayerId, QuestProgress>,
}

impl ProgressStore {
    pub fn from_records(records: HashMap<PlayerId, QuestProgress>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &HashMap<PlayerId, QuestProgress> {
        &self.records
    }

    /// Ensure a record exists and is migrated. Returns true when the record
    /// was created or changed and should be persisted.
    pub fn prepare(&mut self, player: PlayerId, catalog: &QuestCatalog) -> bool {
        let record = self
            .records
            .entry(player)
            .or_insert_with(|| QuestProgress::new(catalog.first_id()));

        if record.completed && catalog.contains(record.quest_id + 1) {
            record.advance();
            return true;
        }

        false
    }

    pub fn get(&self, player: PlayerId) -> Option<&QuestProgress> {
        self.records.get(&player)
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut QuestProgress> {
        self.records.get_mut(&player)
    }

    pub fn replace(&mut self, player: PlayerId, record: QuestProgress) {
        self.records.insert(player, record);
    }
}
