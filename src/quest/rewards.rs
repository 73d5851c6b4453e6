//! Reward Capacity & Delivery
//!
//! The capacity check walks the player's main and belt containers per reward
//! line, summing free room in partially-filled stacks of the same item plus
//! empty-slot capacity. Lines are checked independently: no slot reservation
//! is shared between lines, so a multi-line reward can pass the check and
//! still overflow if lines compete for the same empty slots. Known
//! limitation, kept as-is.

use tracing::warn;

use crate::data::{ItemDefinition, ItemRegistry};
use crate::inventory::{Container, InventorySnapshot};

use super::definition::QuestDefinition;

/// Whether every reward line of the quest individually fits the snapshot.
/// Reward lines whose item cannot be resolved are skipped, mirroring
/// delivery (which also skips them).
pub fn has_space_for_rewards(
    snapshot: &InventorySnapshot,
    quest: &QuestDefinition,
    items: &ItemRegistry,
) -> bool {
    for reward in &quest.rewards {
        let Some(def) = items.find_with_fallback(&reward.item) else {
            continue;
        };

        let mut remaining = reward.amount;
        remaining = remaining_after_container(&snapshot.main, def, remaining);
        remaining = remaining_after_container(&snapshot.belt, def, remaining);

        if remaining > 0 {
            return false;
        }
    }

    true
}

/// Room left for `remaining` units of `def` after filling this container:
/// partial stacks of the same item first, then empty slots at full stack
/// size.
fn remaining_after_container(container: &Container, def: &ItemDefinition, remaining: i32) -> i32 {
    if remaining <= 0 {
        return remaining;
    }

    let max_stack = def.max_stack.max(1);
    let mut remaining = remaining;

    for stack in &container.slots {
        if !stack.item.eq_ignore_ascii_case(&def.id) {
            continue;
        }

        let room = max_stack - stack.amount;
        if room <= 0 {
            continue;
        }

        remaining -= room.min(remaining);
        if remaining <= 0 {
            return 0;
        }
    }

    let empty_slots = container.empty_slots() as i32;
    if empty_slots > 0 {
        remaining = (remaining - empty_slots * max_stack).max(0);
    }

    remaining
}

/// Resolved reward lines ready to hand to the host. Unresolvable lines are
/// logged and skipped; they never block the rest of the delivery.
pub fn resolve_reward_lines<'a>(
    quest: &QuestDefinition,
    items: &'a ItemRegistry,
) -> Vec<(&'a ItemDefinition, i32)> {
    let mut lines = Vec::with_capacity(quest.rewards.len());
    for reward in &quest.rewards {
        match items.find_with_fallback(&reward.item) {
            Some(def) => lines.push((def, reward.amount)),
            None => warn!("Quest reward item not found: {}", reward.item),
        }
    }
    lines
}
