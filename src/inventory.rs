//! Inventory Snapshots
//!
//! The core never owns live inventories. The host hands over an immutable
//! snapshot of the player's two relevant containers (main and belt) whenever
//! progress needs to be reconciled or reward capacity checked.

use serde::{Deserialize, Serialize};

/// A single occupied slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: String,
    pub amount: i32,
}

impl ItemStack {
    pub fn new(item: &str, amount: i32) -> Self {
        Self { item: item.to_string(), amount }
    }
}

/// One container: occupied slots plus a fixed slot capacity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Container {
    pub capacity: usize,
    pub slots: Vec<ItemStack>,
}

impl Container {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, slots: Vec::new() }
    }

    pub fn with_slots(capacity: usize, slots: Vec<ItemStack>) -> Self {
        Self { capacity, slots }
    }

    /// Slots not holding any stack
    pub fn empty_slots(&self) -> usize {
        self.capacity.saturating_sub(self.slots.len())
    }

    /// Total held amount of an item (case-insensitive on the item key)
    pub fn count_of(&self, item: &str) -> i32 {
        self.slots
            .iter()
            .filter(|s| s.item.eq_ignore_ascii_case(item))
            .map(|s| s.amount)
            .sum()
    }
}

/// The player's main and belt containers at a single instant.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    pub main: Container,
    pub belt: Container,
}

impl InventorySnapshot {
    pub fn new(main: Container, belt: Container) -> Self {
        Self { main, belt }
    }

    /// Total held amount of an item across both containers
    pub fn count_item(&self, item: &str) -> i32 {
        self.main.count_of(item) + self.belt.count_of(item)
    }
}
