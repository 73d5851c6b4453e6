//! questline - a starter quest chain engine for game servers
//!
//! Players work through an ordered chain of quests by playing normally:
//! harvesting, crafting, building, and fighting feed typed game events into
//! the engine, which tracks per-player progress, delivers rewards through a
//! capacity-checked gate, and drives the quest UI through a host trait.
//!
//! The engine is single-threaded by design. The host forwards events and
//! commands from its main thread and pumps deferred work with `tick`.

pub mod data;
pub mod inventory;
pub mod persist;
pub mod quest;

pub use data::{ItemDefinition, ItemRegistry};
pub use inventory::{Container, InventorySnapshot, ItemStack};
pub use persist::{DataStore, JsonFileStore, MemoryStore};
pub use quest::{GameEvent, PlayerId, QuestCatalog, QuestEngine, QuestHost};
