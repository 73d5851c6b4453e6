//! Item Registry
//!
//! Loads item definitions from TOML and resolves quest reward/requirement
//! keys to definitions. Lookup falls back to a fixed alias table and finally
//! to a case-insensitive substring match on display names, so quest content
//! can use legacy or human-readable names for items.

use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use super::item_def::{ItemDefinition, RawItemDefinition};

/// Known aliases for reward/requirement short names. Quest content written
/// against older item names keeps working after renames.
const SHORT_NAME_ALIASES: &[(&str, &str)] = &[
    ("teas.wood", "woodtea"),
    ("teas.ore", "oretea"),
    ("tea.wood", "woodtea"),
    ("tea.ore", "oretea"),
    ("teawood", "woodtea"),
    ("teaore", "oretea"),
    ("basic wood tea", "woodtea"),
    ("basic ore tea", "oretea"),
    ("basic.wood.tea", "woodtea"),
    ("basic.ore.tea", "oretea"),
    ("wood tea", "woodtea"),
    ("ore tea", "oretea"),
    ("harvesting tea", "teabasic.pick"),
    ("fish pie", "pie.fish"),
    ("fishpie", "pie.fish"),
    ("boneknife", "knife.bone"),
    ("advanced ore tea", "oretea.advanced"),
    ("oretea.adv", "oretea.advanced"),
    ("advancedoretea", "oretea.advanced"),
    ("basicblueprintfragment", "blueprint.fragment.basic"),
    ("basic blueprint fragment", "blueprint.fragment.basic"),
    ("basic blueprint", "blueprint.fragment.basic"),
    ("wall.torch", "torchholder"),
    ("torch holder", "torchholder"),
];

/// Registry for all item definitions
pub struct ItemRegistry {
    items: HashMap<String, ItemDefinition>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Load item definitions from a TOML file (a table of id -> definition).
    pub fn load_from_file(&mut self, path: &Path) -> Result<(), String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
        self.load_from_str(&content)
    }

    pub fn load_from_str(&mut self, content: &str) -> Result<(), String> {
        let table: HashMap<String, RawItemDefinition> = toml::from_str(content)
            .map_err(|e| format!("Failed to parse item definitions: {}", e))?;

        for (id, raw) in table {
            if self.items.contains_key(&id) {
                warn!("Duplicate item ID '{}', overwriting", id);
            }
            let item = ItemDefinition::from_raw(&id, &raw);
            self.items.insert(id, item);
        }

        info!("Loaded {} item definitions", self.items.len());
        Ok(())
    }

    /// Registry with the built-in item set for the starter chain.
    pub fn builtin() -> Result<Self, String> {
        let mut registry = Self::new();
        registry.load_from_str(include_str!("../../data/items.toml"))?;
        Ok(registry)
    }

    /// Register a single definition (hosts with their own catalogs, tests).
    pub fn insert(&mut self, item: ItemDefinition) {
        self.items.insert(item.id.clone(), item);
    }

    /// Get an item definition by exact ID
    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    /// Resolve a reward/requirement key to a definition. Tries, in order:
    /// exact ID, the alias table, a case-insensitive ID scan, an exact
    /// display-name match, and finally a display-name substring match.
    pub fn find_with_fallback(&self, key: &str) -> Option<&ItemDefinition> {
        if key.is_empty() {
            return None;
        }

        if let Some(def) = self.items.get(key) {
            return Some(def);
        }

        let lower = key.to_ascii_lowercase();
        if let Some((_, mapped)) = SHORT_NAME_ALIASES.iter().find(|(alias, _)| *alias == lower) {
            if let Some(def) = self.items.get(*mapped) {
                return Some(def);
            }
        }

        if let Some(def) = self.items.values().find(|d| d.id.eq_ignore_ascii_case(key)) {
            return Some(def);
        }

        if let Some(def) = self
            .items
            .values()
            .find(|d| d.display_name.eq_ignore_ascii_case(key))
        {
            return Some(def);
        }

        self.items
            .values()
            .find(|d| d.display_name.to_ascii_lowercase().contains(&lower))
    }

    /// Get the number of loaded items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}
