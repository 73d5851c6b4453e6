//! Quest Definition Structures
//!
//! Quest definitions are deserialized from TOML and resolved into an
//! immutable catalog at startup. The chain is a dense integer sequence
//! starting at 1; chain order is numeric order.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::normalize::is_reconciled_key;

pub type QuestId = u32;

/// A quest definition loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalogFile {
    pub quests: Vec<RawQuest>,
}

/// Raw quest data as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuest {
    pub id: QuestId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: BTreeMap<String, i32>,
    #[serde(default)]
    pub rewards: Vec<RawReward>,
}

/// Reward entry as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawReward {
    pub item: String,
    #[serde(default = "default_amount")]
    pub amount: i32,
}

fn default_amount() -> i32 {
    1
}

// ============================================================================
// Resolved Quest Structures
// ============================================================================

/// A single reward line. Order matters: panels truncate to the first two.
#[derive(Debug, Clone)]
pub struct QuestReward {
    pub item: String,
    pub amount: i32,
}

/// A fully resolved quest definition
#[derive(Debug, Clone)]
pub struct QuestDefinition {
    pub id: QuestId,
    pub title: String,
    pub description: String,
    /// Normalized requirement key -> required amount
    pub requirements: BTreeMap<String, i32>,
    pub rewards: Vec<QuestReward>,
    /// True iff any requirement key is in the reconciled (spendable
    /// resource) set. Computed once at catalog load.
    pub has_reconciled_requirements: bool,
}

impl QuestDefinition {
    fn from_raw(raw: &RawQuest) -> Result<Self, String> {
        if raw.requirements.is_empty() {
            return Err(format!("Quest {} has no requirements", raw.id));
        }
        if let Some((key, amount)) = raw.requirements.iter().find(|(_, a)| **a < 1) {
            return Err(format!(
                "Quest {} requirement '{}' has invalid amount {}",
                raw.id, key, amount
            ));
        }

        let has_reconciled_requirements =
            raw.requirements.keys().any(|k| is_reconciled_key(k));

        Ok(Self {
            id: raw.id,
            title: raw.title.clone(),
            description: raw.description.clone(),
            requirements: raw.requirements.clone(),
            rewards: raw
                .rewards
                .iter()
                .map(|r| QuestReward { item: r.item.clone(), amount: r.amount })
                .collect(),
            has_reconciled_requirements,
        })
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// The ordered chain of quest definitions. Read-only after load.
pub struct QuestCatalog {
    quests: BTreeMap<QuestId, Arc<QuestDefinition>>,
}

impl QuestCatalog {
    /// Parse and validate a catalog from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let raw: RawCatalogFile = toml::from_str(content)
            .map_err(|e| format!("Failed to parse quest catalog: {}", e))?;

        if raw.quests.is_empty() {
            return Err("Quest catalog is empty".to_string());
        }

        let mut quests = BTreeMap::new();
        for raw_quest in &raw.quests {
            let quest = QuestDefinition::from_raw(raw_quest)?;
            if quests.insert(quest.id, Arc::new(quest)).is_some() {
                return Err(format!("Duplicate quest id {}", raw_quest.id));
            }
        }

        // The chain must be dense: ids exactly 1..=n.
        for (expected, id) in (1..).zip(quests.keys()) {
            if *id != expected {
                return Err(format!("Quest chain has a gap: expected id {}, found {}", expected, id));
            }
        }

        info!("Loaded {} quest definitions", quests.len());
        Ok(Self { quests })
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
        Self::from_toml_str(&content)
    }

    /// The built-in starter chain.
    pub fn builtin() -> Result<Self, String> {
        Self::from_toml_str(include_str!("../../data/quests.toml"))
    }

    /// Get a quest by ID
    pub fn get(&self, id: QuestId) -> Option<Arc<QuestDefinition>> {
        self.quests.get(&id).cloned()
    }

    pub fn contains(&self, id: QuestId) -> bool {
        self.quests.contains_key(&id)
    }

    /// The id new players start on. The catalog is dense from 1.
    pub fn first_id(&self) -> QuestId {
        1
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}
