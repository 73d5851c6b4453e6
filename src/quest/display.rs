//! Panel View Models
//!
//! The core builds plain-text view models for the two overlay panels; the
//! display collaborator owns actual rendering.

use crate::data::ItemRegistry;

use super::definition::QuestDefinition;
use super::state::QuestProgress;

const MAX_CHARS_PER_LINE: usize = 85;
const MAX_LINES: usize = 2;
const MISSING_DESCRIPTION_FALLBACK: &str = "Description coming soon.";

/// View model for the active-quest panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuestView {
    pub title: String,
    pub description_lines: Vec<String>,
    pub goal_text: String,
}

impl ActiveQuestView {
    pub fn build(quest: &QuestDefinition, progress: &QuestProgress, items: &ItemRegistry) -> Self {
        Self {
            title: quest.title.clone(),
            description_lines: description_lines(quest),
            goal_text: goal_text(progress, quest, items),
        }
    }
}

/// View model for the quest-complete panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestCompleteView {
    pub heading: String,
    pub reward_line: String,
}

impl QuestCompleteView {
    pub fn build(quest: &QuestDefinition, items: &ItemRegistry) -> Self {
        Self {
            heading: "QUEST COMPLETE".to_string(),
            reward_line: reward_line(quest, items),
        }
    }
}

fn description_lines(quest: &QuestDefinition) -> Vec<String> {
    let description = quest.description.trim();
    let description = if description.is_empty() {
        MISSING_DESCRIPTION_FALLBACK
    } else {
        description
    };

    let mut lines = wrap_text(description, MAX_CHARS_PER_LINE);
    if lines.is_empty() {
        lines.push(MISSING_DESCRIPTION_FALLBACK.to_string());
    }
    lines.truncate(MAX_LINES);
    lines
}

fn goal_text(progress: &QuestProgress, quest: &QuestDefinition, items: &ItemRegistry) -> String {
    let mut text = String::from("Goal: ");
    for (key, required) in &quest.requirements {
        let current = progress.amount_for(key);
        text.push_str(&format!(
            "{} {}/{}  ",
            requirement_display_name(key, items),
            current,
            required
        ));
    }
    text
}

/// Reward summary, truncated to the first two lines.
fn reward_line(quest: &QuestDefinition, items: &ItemRegistry) -> String {
    let mut parts = Vec::new();
    for reward in quest.rewards.iter().take(2) {
        parts.push(format!("x{} {}", reward.amount, item_display_name(&reward.item, items)));
    }
    parts.join("   ")
}

fn item_display_name(key: &str, items: &ItemRegistry) -> String {
    items
        .find_with_fallback(key)
        .map(|d| d.display_name.clone())
        .unwrap_or_else(|| key.to_string())
}

/// Display names for synthetic requirement keys that are not items.
fn requirement_display_name(key: &str, items: &ItemRegistry) -> String {
    match key {
        "boar.kill" => "Slay Boars".to_string(),
        "tc_auth" => "Authorization".to_string(),
        "building_block" => "Building pieces".to_string(),
        "road.barrel" => "Road barrels".to_string(),
        "recycler_use" => "Recycler".to_string(),
        "furnace.placed" => "Furnace placed".to_string(),
        "box.wooden.crafted" => "Boxes crafted".to_string(),
        "box.wooden.placed" => "Boxes placed".to_string(),
        "door.hinged.wood" => "Wood door".to_string(),
        "door.hinged.metal" => "Metal door".to_string(),
        "iotable" => "Engineering Workbench".to_string(),
        "repair.bench" => "Repair Bench".to_string(),
        _ => item_display_name(key, items),
    }
}

/// Greedy word wrap. Words longer than the limit get their own line.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > max_chars {
            lines.push(std::mem::take(&mut current));
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
